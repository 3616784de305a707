//! Voicemail for the authenticated user

use crate::rest::{require, QueryParams, RestSession};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const VOICE_MESSAGES: &str = "telephony/voiceMessages";

/// A voicemail message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceMessage {
    /// Message ID
    #[serde(default)]
    pub id: String,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u64,
    /// Who left the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calling_party: Option<VoiceMessageParty>,
    /// Marked urgent
    #[serde(default)]
    pub urgent: bool,
    /// Marked confidential
    #[serde(default)]
    pub confidential: bool,
    /// Already read
    #[serde(default)]
    pub read: bool,
    /// Time received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Media MIME type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// "voicemail" or "fax"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
}

/// The caller who left a voicemail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceMessageParty {
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
}

/// Counts of new and old voicemail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceMessageSummary {
    /// Unread messages
    #[serde(default)]
    pub new_messages: u32,
    /// Read messages
    #[serde(default)]
    pub old_messages: u32,
    /// Unread urgent messages
    #[serde(default)]
    pub new_urgent_messages: u32,
    /// Read urgent messages
    #[serde(default)]
    pub old_urgent_messages: u32,
}

#[derive(Serialize)]
struct ReadState {
    read: bool,
}

/// Service for `telephony/voiceMessages`
#[derive(Debug, Clone)]
pub struct VoicemailService {
    session: Arc<RestSession>,
}

impl VoicemailService {
    /// Create a voicemail service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List voicemail messages
    pub async fn list(&self, max: Option<u32>) -> Result<Vec<VoiceMessage>> {
        let mut params = QueryParams::new();
        params.set_max(max);
        self.session.list(VOICE_MESSAGES, params).await
    }

    /// Get new/old message counts
    pub async fn summary(&self) -> Result<VoiceMessageSummary> {
        let summary: Option<VoiceMessageSummary> = self
            .session
            .get(&format!("{}/summary", VOICE_MESSAGES), QueryParams::new())
            .await?;
        Ok(summary.unwrap_or_default())
    }

    /// Mark a message as read
    pub async fn mark_as_read(&self, message_id: &str) -> Result<()> {
        self.set_read(message_id, true).await
    }

    /// Mark a message as unread
    pub async fn mark_as_unread(&self, message_id: &str) -> Result<()> {
        self.set_read(message_id, false).await
    }

    /// Delete a message
    pub async fn delete(&self, message_id: &str) -> Result<()> {
        require("messageId", message_id)?;
        self.session
            .delete(&format!("{}/{}", VOICE_MESSAGES, message_id))
            .await
    }

    async fn set_read(&self, message_id: &str, read: bool) -> Result<()> {
        require("messageId", message_id)?;
        self.session
            .put_no_content(&format!("{}/{}", VOICE_MESSAGES, message_id), &ReadState { read })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::RestSessionConfig;

    #[test]
    fn test_read_state_body() {
        assert_eq!(
            serde_json::to_value(ReadState { read: false }).unwrap(),
            serde_json::json!({"read": false})
        );
    }

    #[test]
    fn test_summary_defaults() {
        let summary: VoiceMessageSummary = serde_json::from_str(r#"{"newMessages": 2}"#).unwrap();
        assert_eq!(summary.new_messages, 2);
        assert_eq!(summary.old_urgent_messages, 0);
    }

    #[tokio::test]
    async fn test_validation() {
        let service = VoicemailService::new(std::sync::Arc::new(
            RestSession::new(RestSessionConfig::new("token")).unwrap(),
        ));
        assert!(service.mark_as_read("").await.unwrap_err().is_invalid_parameter());
        assert!(service.mark_as_unread("").await.unwrap_err().is_invalid_parameter());
        assert!(service.delete("").await.unwrap_err().is_invalid_parameter());
    }
}
