//! Meeting invitees

use crate::rest::{require, ItemsResponse, QueryParams, RestSession};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MEETING_INVITEES: &str = "meetingInvitees";

/// A person invited to a meeting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInvitee {
    /// Unique invitee ID
    #[serde(default)]
    pub id: String,
    /// Meeting ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    /// Email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Co-host
    #[serde(default)]
    pub co_host: bool,
    /// Panelist
    #[serde(default)]
    pub panelist: bool,
}

/// Filters for [`MeetingInviteesService::list`]
#[derive(Debug, Clone, Default)]
pub struct InviteeListOptions {
    /// Meeting to list invitees for (required)
    pub meeting_id: String,
    /// Host on whose behalf to list (admin only)
    pub host_email: Option<String>,
    /// Only panelists (`panelistOnly=true`)
    pub panelist_only: bool,
    /// Maximum number of invitees
    pub max: Option<u32>,
}

impl InviteeListOptions {
    /// Invitees of a meeting
    pub fn new(meeting_id: impl Into<String>) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            ..Default::default()
        }
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set("meetingId", self.meeting_id.as_str())
            .set_opt("hostEmail", self.host_email.as_deref())
            .set_flag("panelistOnly", self.panelist_only)
            .set_max(self.max);
        params
    }
}

/// Body for [`MeetingInviteesService::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteeCreateRequest {
    /// Meeting ID (required)
    pub meeting_id: String,
    /// Email (required)
    pub email: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Co-host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co_host: Option<bool>,
    /// Panelist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panelist: Option<bool>,
    /// Send an invitation email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,
    /// Host on whose behalf to invite (admin only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
}

impl InviteeCreateRequest {
    /// Invite an email to a meeting
    pub fn new(meeting_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            email: email.into(),
            ..Default::default()
        }
    }
}

/// One entry of [`InviteeBulkCreateRequest::items`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkInviteeItem {
    /// Email
    pub email: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Co-host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co_host: Option<bool>,
    /// Panelist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panelist: Option<bool>,
}

/// Body for [`MeetingInviteesService::bulk_create`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteeBulkCreateRequest {
    /// Meeting ID (required)
    pub meeting_id: String,
    /// Host on whose behalf to invite (admin only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
    /// Send invitation emails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,
    /// Invitees (at least one)
    pub items: Vec<BulkInviteeItem>,
}

/// Body for [`MeetingInviteesService::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteeUpdateRequest {
    /// Email (required)
    pub email: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Co-host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co_host: Option<bool>,
    /// Panelist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panelist: Option<bool>,
    /// Send an update email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,
    /// Host on whose behalf to update (admin only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
}

/// Service for the `meetingInvitees` resource
#[derive(Debug, Clone)]
pub struct MeetingInviteesService {
    session: Arc<RestSession>,
}

impl MeetingInviteesService {
    /// Create an invitees service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List invitees of a meeting
    pub async fn list(&self, options: &InviteeListOptions) -> Result<Vec<MeetingInvitee>> {
        require("meetingId", &options.meeting_id)?;
        self.session.list(MEETING_INVITEES, options.to_params()).await
    }

    /// Invite one person
    pub async fn create(&self, request: &InviteeCreateRequest) -> Result<MeetingInvitee> {
        require("meetingId", &request.meeting_id)?;
        require("email", &request.email)?;
        let invitee: Option<MeetingInvitee> = self.session.post(MEETING_INVITEES, request).await?;
        Ok(invitee.unwrap_or_default())
    }

    /// Invite several people in one call
    pub async fn bulk_create(
        &self,
        request: &InviteeBulkCreateRequest,
    ) -> Result<Vec<MeetingInvitee>> {
        require("meetingId", &request.meeting_id)?;
        if request.items.is_empty() {
            return Err(Error::invalid("items"));
        }
        let response: Option<ItemsResponse<MeetingInvitee>> = self
            .session
            .post(&format!("{}/bulkInsert", MEETING_INVITEES), request)
            .await?;
        Ok(response.map(|r| r.items).unwrap_or_default())
    }

    /// Get an invitee by ID
    pub async fn get(&self, invitee_id: &str) -> Result<MeetingInvitee> {
        require("inviteeId", invitee_id)?;
        let invitee: Option<MeetingInvitee> = self
            .session
            .get(&format!("{}/{}", MEETING_INVITEES, invitee_id), QueryParams::new())
            .await?;
        Ok(invitee.unwrap_or_default())
    }

    /// Update an invitee
    pub async fn update(
        &self,
        invitee_id: &str,
        request: &InviteeUpdateRequest,
    ) -> Result<MeetingInvitee> {
        require("inviteeId", invitee_id)?;
        require("email", &request.email)?;
        let invitee: Option<MeetingInvitee> = self
            .session
            .put(&format!("{}/{}", MEETING_INVITEES, invitee_id), request)
            .await?;
        Ok(invitee.unwrap_or_default())
    }

    /// Remove an invitee
    pub async fn delete(&self, invitee_id: &str) -> Result<()> {
        require("inviteeId", invitee_id)?;
        self.session
            .delete(&format!("{}/{}", MEETING_INVITEES, invitee_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::RestSessionConfig;

    fn service() -> MeetingInviteesService {
        MeetingInviteesService::new(Arc::new(
            RestSession::new(RestSessionConfig::new("token")).unwrap(),
        ))
    }

    #[test]
    fn test_list_params() {
        let mut options = InviteeListOptions::new("MTG1");
        options.panelist_only = true;
        let params = options.to_params();
        assert_eq!(params.get("meetingId"), Some("MTG1"));
        assert_eq!(params.get("panelistOnly"), Some("true"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_bulk_request_serialization() {
        let request = InviteeBulkCreateRequest {
            meeting_id: "MTG1".to_string(),
            items: vec![BulkInviteeItem {
                email: "a@example.com".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"meetingId": "MTG1", "items": [{"email": "a@example.com"}]})
        );
    }

    #[tokio::test]
    async fn test_validation() {
        let service = service();
        assert!(service
            .list(&InviteeListOptions::default())
            .await
            .unwrap_err()
            .is_invalid_parameter());
        assert!(service
            .create(&InviteeCreateRequest::new("MTG1", ""))
            .await
            .unwrap_err()
            .is_invalid_parameter());

        let empty_bulk = InviteeBulkCreateRequest {
            meeting_id: "MTG1".to_string(),
            ..Default::default()
        };
        assert!(service.bulk_create(&empty_bulk).await.unwrap_err().is_invalid_parameter());

        assert!(service
            .update("I1", &InviteeUpdateRequest::default())
            .await
            .unwrap_err()
            .is_invalid_parameter());
        assert!(service.get("").await.unwrap_err().is_invalid_parameter());
        assert!(service.delete("").await.unwrap_err().is_invalid_parameter());
    }
}
