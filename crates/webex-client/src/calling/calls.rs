//! Call control for the authenticated user's Webex Calling line

use crate::rest::{require, QueryParams, RestSession};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const CALLS: &str = "telephony/calls";

/// An active call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Call {
    /// Call ID
    #[serde(default)]
    pub id: String,
    /// Call ID used by call control
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
    /// Call session ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_session_id: Option<String>,
    /// "originator", "terminator" or "clickToDial"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    /// "connecting", "alerting", "connected", "held", ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// The other party
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_party: Option<RemoteParty>,
    /// Appearance slot on the device
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance: Option<u32>,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Time the call connected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected: Option<DateTime<Utc>>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u64,
    /// Whether the call is held
    #[serde(default)]
    pub held: bool,
    /// Why the call was redirected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_reason: Option<String>,
    /// "pending", "started", "paused", "stopped" or "failed"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_state: Option<String>,
}

/// The other side of a call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteParty {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Person ID, if a Webex user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    /// Place ID, if a workspace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Whether caller ID is hidden
    #[serde(default)]
    pub privacy_enabled: bool,
    /// "location", "organization", "external"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_type: Option<String>,
}

/// Call identifiers returned when a call is placed, retrieved, picked up or barged into
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallHandle {
    /// Call ID
    #[serde(default)]
    pub call_id: String,
    /// Call session ID
    #[serde(default)]
    pub call_session_id: String,
}

/// Result of [`CallsService::park`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkResult {
    /// Extension or number the call was parked against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parked_against: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CallIdBody<'a> {
    call_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DestinationBody<'a> {
    destination: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TargetBody<'a> {
    target: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    call_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    call_id1: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    call_id2: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DivertBody<'a> {
    call_id: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    destination: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    to_voicemail: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParkBody<'a> {
    call_id: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    destination: &'a str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_group_park: bool,
}

#[derive(Serialize)]
struct DtmfBody<'a> {
    #[serde(rename = "callId")]
    call_id: &'a str,
    dtmf: &'a str,
}

/// Service for `telephony/calls` call control
#[derive(Debug, Clone)]
pub struct CallsService {
    session: Arc<RestSession>,
}

impl CallsService {
    /// Create a calls service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// Place a call to a number or SIP URI
    pub async fn dial(&self, destination: &str) -> Result<CallHandle> {
        require("destination", destination)?;
        self.post_for_handle("dial", &DestinationBody { destination })
            .await
    }

    /// Answer an incoming call
    pub async fn answer(&self, call_id: &str) -> Result<()> {
        self.call_action("answer", call_id).await
    }

    /// Reject an incoming call
    pub async fn reject(&self, call_id: &str) -> Result<()> {
        self.call_action("reject", call_id).await
    }

    /// Put a call on hold
    pub async fn hold(&self, call_id: &str) -> Result<()> {
        self.call_action("hold", call_id).await
    }

    /// Resume a held call
    pub async fn resume(&self, call_id: &str) -> Result<()> {
        self.call_action("resume", call_id).await
    }

    /// End a call
    pub async fn hangup(&self, call_id: &str) -> Result<()> {
        self.call_action("hangup", call_id).await
    }

    /// Blind-transfer a call to a destination
    pub async fn transfer(&self, call_id: &str, destination: &str) -> Result<()> {
        require("callId", call_id)?;
        require("destination", destination)?;
        let body = TransferBody {
            call_id: Some(call_id),
            destination: Some(destination),
            call_id1: None,
            call_id2: None,
        };
        self.session
            .post_no_content(&format!("{}/transfer", CALLS), &body)
            .await
    }

    /// Join two of the user's calls together
    pub async fn consult_transfer(&self, call_id1: &str, call_id2: &str) -> Result<()> {
        require("callId1", call_id1)?;
        require("callId2", call_id2)?;
        let body = TransferBody {
            call_id: None,
            destination: None,
            call_id1: Some(call_id1),
            call_id2: Some(call_id2),
        };
        self.session
            .post_no_content(&format!("{}/consultTransfer", CALLS), &body)
            .await
    }

    /// Divert a call to a destination or to voicemail
    ///
    /// The destination may only be empty when diverting to voicemail.
    pub async fn divert(&self, call_id: &str, destination: &str, to_voicemail: bool) -> Result<()> {
        require("callId", call_id)?;
        if !to_voicemail && destination.is_empty() {
            return Err(Error::invalid("destination"));
        }
        let body = DivertBody {
            call_id,
            destination,
            to_voicemail,
        };
        self.session
            .post_no_content(&format!("{}/divert", CALLS), &body)
            .await
    }

    /// Park a call; an empty destination parks against the user's own line
    pub async fn park(&self, call_id: &str, destination: &str) -> Result<ParkResult> {
        require("callId", call_id)?;
        let body = ParkBody {
            call_id,
            destination,
            is_group_park: false,
        };
        let result: Option<ParkResult> = self
            .session
            .post(&format!("{}/park", CALLS), &body)
            .await?;
        Ok(result.unwrap_or_default())
    }

    /// Retrieve a parked call
    pub async fn retrieve(&self, destination: &str) -> Result<CallHandle> {
        require("destination", destination)?;
        self.post_for_handle("retrieve", &DestinationBody { destination })
            .await
    }

    /// Pick up a call ringing on another line
    pub async fn pickup(&self, target: &str) -> Result<CallHandle> {
        require("target", target)?;
        self.post_for_handle("pickup", &TargetBody { target }).await
    }

    /// Barge into another user's call
    pub async fn barge_in(&self, target: &str) -> Result<CallHandle> {
        require("target", target)?;
        self.post_for_handle("bargein", &TargetBody { target }).await
    }

    /// Start recording
    pub async fn start_recording(&self, call_id: &str) -> Result<()> {
        self.call_action("startRecording", call_id).await
    }

    /// Stop recording
    pub async fn stop_recording(&self, call_id: &str) -> Result<()> {
        self.call_action("stopRecording", call_id).await
    }

    /// Pause recording
    pub async fn pause_recording(&self, call_id: &str) -> Result<()> {
        self.call_action("pauseRecording", call_id).await
    }

    /// Resume recording
    pub async fn resume_recording(&self, call_id: &str) -> Result<()> {
        self.call_action("resumeRecording", call_id).await
    }

    /// Send DTMF digits on a call
    pub async fn transmit_dtmf(&self, call_id: &str, dtmf: &str) -> Result<()> {
        require("callId", call_id)?;
        require("dtmf", dtmf)?;
        self.session
            .post_no_content(&format!("{}/transmitDTMF", CALLS), &DtmfBody { call_id, dtmf })
            .await
    }

    /// Push a call to the user's executive assistant
    pub async fn push(&self, call_id: &str) -> Result<()> {
        self.call_action("push", call_id).await
    }

    /// List the user's active calls
    pub async fn list_calls(&self) -> Result<Vec<Call>> {
        self.session.list(CALLS, QueryParams::new()).await
    }

    /// Get details of an active call
    pub async fn get_call_details(&self, call_id: &str) -> Result<Call> {
        require("callId", call_id)?;
        let call: Option<Call> = self
            .session
            .get(&format!("{}/{}", CALLS, call_id), QueryParams::new())
            .await?;
        Ok(call.unwrap_or_default())
    }

    async fn call_action(&self, action: &str, call_id: &str) -> Result<()> {
        require("callId", call_id)?;
        self.session
            .post_no_content(&format!("{}/{}", CALLS, action), &CallIdBody { call_id })
            .await
    }

    async fn post_for_handle<B: Serialize>(&self, action: &str, body: &B) -> Result<CallHandle> {
        let handle: Option<CallHandle> = self
            .session
            .post(&format!("{}/{}", CALLS, action), body)
            .await?;
        Ok(handle.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::RestSessionConfig;

    fn service() -> CallsService {
        CallsService::new(Arc::new(
            RestSession::new(RestSessionConfig::new("token")).unwrap(),
        ))
    }

    #[test]
    fn test_divert_body() {
        let to_voicemail = DivertBody {
            call_id: "C1",
            destination: "",
            to_voicemail: true,
        };
        assert_eq!(
            serde_json::to_value(&to_voicemail).unwrap(),
            serde_json::json!({"callId": "C1", "toVoicemail": true})
        );

        let to_number = DivertBody {
            call_id: "C1",
            destination: "+15551234",
            to_voicemail: false,
        };
        assert_eq!(
            serde_json::to_value(&to_number).unwrap(),
            serde_json::json!({"callId": "C1", "destination": "+15551234"})
        );
    }

    #[test]
    fn test_transfer_bodies() {
        let consult = TransferBody {
            call_id: None,
            destination: None,
            call_id1: Some("A"),
            call_id2: Some("B"),
        };
        assert_eq!(
            serde_json::to_value(&consult).unwrap(),
            serde_json::json!({"callId1": "A", "callId2": "B"})
        );
    }

    #[test]
    fn test_call_deserialization() {
        let json = r#"{
            "id": "C1",
            "callSessionId": "S1",
            "state": "connected",
            "remoteParty": {"name": "Bob", "number": "+1555", "callType": "external"},
            "held": false
        }"#;
        let call: Call = serde_json::from_str(json).unwrap();
        assert_eq!(call.id, "C1");
        assert_eq!(
            call.remote_party.and_then(|p| p.call_type),
            Some("external".to_string())
        );
    }

    #[tokio::test]
    async fn test_validation() {
        let service = service();
        assert!(service.dial("").await.unwrap_err().is_invalid_parameter());
        assert!(service.answer("").await.unwrap_err().is_invalid_parameter());
        assert!(service.hangup("").await.unwrap_err().is_invalid_parameter());
        assert!(service.transfer("C1", "").await.unwrap_err().is_invalid_parameter());
        assert!(service.consult_transfer("C1", "").await.unwrap_err().is_invalid_parameter());
        assert!(service.divert("C1", "", false).await.unwrap_err().is_invalid_parameter());
        assert!(service.park("", "").await.unwrap_err().is_invalid_parameter());
        assert!(service.retrieve("").await.unwrap_err().is_invalid_parameter());
        assert!(service.pickup("").await.unwrap_err().is_invalid_parameter());
        assert!(service.barge_in("").await.unwrap_err().is_invalid_parameter());
        assert!(service.transmit_dtmf("C1", "").await.unwrap_err().is_invalid_parameter());
        assert!(service.get_call_details("").await.unwrap_err().is_invalid_parameter());
    }
}
