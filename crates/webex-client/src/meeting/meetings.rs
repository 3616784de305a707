//! Meetings: schedule, update, cancel and join Webex meetings

use crate::rest::{require, QueryParams, RestSession};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A scheduled meeting, series or instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    /// Unique meeting ID
    #[serde(default)]
    pub id: String,
    /// Meeting number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_number: Option<String>,
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Agenda
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    /// Meeting password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// "meetingSeries", "scheduledMeeting" or "meeting"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<String>,
    /// "active", "scheduled", "ended", ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// IANA time zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    /// End time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// iCalendar RRULE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    /// Host's user ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_user_id: Option<String>,
    /// Host's display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_display_name: Option<String>,
    /// Host's email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
    /// Host key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_key: Option<String>,
    /// Webex site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    /// Join link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
    /// SIP address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sip_address: Option<String>,
    /// Video dial-in IP address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dial_in_ip_address: Option<String>,
    /// Record automatically
    #[serde(default)]
    pub enabled_auto_record_meeting: bool,
    /// Any user may become co-host
    #[serde(default)]
    pub allow_any_user_to_be_co_host: bool,
    /// Attendees may join before the host
    #[serde(default)]
    pub enabled_join_before_host: bool,
    /// How early attendees may join
    #[serde(default)]
    pub join_before_host_minutes: u32,
    /// Listed publicly on the site
    #[serde(default)]
    pub public_meeting: bool,
    /// Reminder lead time in minutes
    #[serde(default)]
    pub reminder_time: u32,
    /// "meeting", "webinar" or "personalRoomMeeting"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_type: Option<String>,
    /// Series the meeting belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_series_id: Option<String>,
    /// Scheduled meeting the instance belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_meeting_id: Option<String>,
    /// In-meeting feature toggles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_options: Option<MeetingOptions>,
    /// Audio settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_connection_options: Option<AudioConnectionOptions>,
    /// Integration tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub integration_tags: Vec<String>,
    /// Invitees supplied at creation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invitees: Vec<Invitee>,
    /// Registration settings for webinars
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<Registration>,
}

/// In-meeting feature toggles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingOptions {
    /// Chat
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_chat: Option<bool>,
    /// Video
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_video: Option<bool>,
    /// Polling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_polling: Option<bool>,
    /// Notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_note: Option<bool>,
    /// "allAttendees" or "singleNoteTaker"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_type: Option<String>,
    /// Closed captions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_closed_caption: Option<bool>,
    /// File transfer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_file_transfer: Option<bool>,
}

/// Audio connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConnectionOptions {
    /// "webexAudio", "VoIP", "other" or "none"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_connection_type: Option<String>,
    /// Toll-free call-in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_toll_free_call_in: Option<bool>,
    /// Global call-in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_global_call_in: Option<bool>,
    /// Callback for attendees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_audience_call_back: Option<bool>,
    /// "beep", "noTone", "announceName"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_and_exit_tone: Option<String>,
    /// Host may unmute participants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_host_to_unmute_participants: Option<bool>,
    /// Attendees may unmute themselves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_attendee_to_unmute_self: Option<bool>,
    /// Mute attendees on entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute_attendee_upon_entry: Option<bool>,
}

/// Webinar registration settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Register automatically
    #[serde(default)]
    pub auto_accept_request: bool,
    /// First name is mandatory
    #[serde(default)]
    pub require_first_name: bool,
    /// Last name is mandatory
    #[serde(default)]
    pub require_last_name: bool,
    /// Email is mandatory
    #[serde(default)]
    pub require_email: bool,
    /// Job title is mandatory
    #[serde(default)]
    pub require_job_title: bool,
    /// Company name is mandatory
    #[serde(default)]
    pub require_company_name: bool,
    /// Registration cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_register_num: Option<u32>,
}

/// A person invited when the meeting is created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitee {
    /// Email
    pub email: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Make co-host
    #[serde(default)]
    pub co_host: bool,
    /// Make panelist (webinars)
    #[serde(default)]
    pub panelist: bool,
}

/// Join link returned by [`MeetingsService::join`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingJoinInfo {
    /// Join URL
    #[serde(default)]
    pub join_link: String,
    /// When the link stops working
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DateTime<Utc>>,
}

/// Filters for [`MeetingsService::list`]
#[derive(Debug, Clone, Default)]
pub struct MeetingListOptions {
    /// Meeting number
    pub meeting_number: Option<String>,
    /// Join link
    pub web_link: Option<String>,
    /// Room the meeting is associated with
    pub room_id: Option<String>,
    /// "meetingSeries", "scheduledMeeting" or "meeting"
    pub meeting_type: Option<String>,
    /// Meeting state
    pub state: Option<String>,
    /// "meeting", "webinar" or "personalRoomMeeting"
    pub scheduled_type: Option<String>,
    /// Meetings this email participates in
    pub participant_email: Option<String>,
    /// Only the current instance (`current=true`)
    pub current: bool,
    /// Start of the time window
    pub from: Option<DateTime<Utc>>,
    /// End of the time window
    pub to: Option<DateTime<Utc>>,
    /// Meetings hosted by this email (admin only)
    pub host_email: Option<String>,
    /// Webex site
    pub site_url: Option<String>,
    /// Integration tag
    pub integration_tag: Option<String>,
    /// Maximum number of meetings
    pub max: Option<u32>,
}

impl MeetingListOptions {
    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set_opt("meetingNumber", self.meeting_number.as_deref())
            .set_opt("webLink", self.web_link.as_deref())
            .set_opt("roomId", self.room_id.as_deref())
            .set_opt("meetingType", self.meeting_type.as_deref())
            .set_opt("state", self.state.as_deref())
            .set_opt("scheduledType", self.scheduled_type.as_deref())
            .set_opt("participantEmail", self.participant_email.as_deref())
            .set_flag("current", self.current)
            .set_time("from", self.from.as_ref())
            .set_time("to", self.to.as_ref())
            .set_opt("hostEmail", self.host_email.as_deref())
            .set_opt("siteUrl", self.site_url.as_deref())
            .set_opt("integrationTag", self.integration_tag.as_deref())
            .set_max(self.max);
        params
    }
}

/// Body for [`MeetingsService::create`] and [`MeetingsService::update`]
///
/// Title, start and end are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRequest {
    /// Title
    pub title: String,
    /// Start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    /// End time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// Agenda
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,
    /// Password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// IANA time zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// iCalendar RRULE
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    /// Record automatically
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_auto_record_meeting: Option<bool>,
    /// Any user may become co-host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_any_user_to_be_co_host: Option<bool>,
    /// Attendees may join before the host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_join_before_host: Option<bool>,
    /// How early attendees may join
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_before_host_minutes: Option<u32>,
    /// Listed publicly on the site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_meeting: Option<bool>,
    /// Reminder lead time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<u32>,
    /// "meeting" or "webinar"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_type: Option<String>,
    /// Schedule on behalf of this host (admin only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
    /// Webex site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    /// In-meeting feature toggles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_options: Option<MeetingOptions>,
    /// Audio settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_connection_options: Option<AudioConnectionOptions>,
    /// Integration tags
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub integration_tags: Vec<String>,
    /// Email invitees about changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,
    /// Invitees (create only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invitees: Vec<Invitee>,
    /// Registration settings (create only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<Registration>,
}

impl MeetingRequest {
    /// Request with the required fields
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    /// Set the agenda
    pub fn with_agenda(mut self, agenda: impl Into<String>) -> Self {
        self.agenda = Some(agenda.into());
        self
    }

    /// Invite someone
    pub fn with_invitee(mut self, invitee: Invitee) -> Self {
        self.invitees.push(invitee);
        self
    }

    fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        if self.start.is_none() {
            return Err(Error::invalid("start"));
        }
        if self.end.is_none() {
            return Err(Error::invalid("end"));
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinRequest<'a> {
    meeting_id: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    email: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    display_name: &'a str,
}

/// Service for the `meetings` resource
#[derive(Debug, Clone)]
pub struct MeetingsService {
    session: Arc<RestSession>,
}

impl MeetingsService {
    /// Create a meetings service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List meetings
    pub async fn list(&self, options: &MeetingListOptions) -> Result<Vec<Meeting>> {
        self.session.list("meetings", options.to_params()).await
    }

    /// Schedule a meeting
    pub async fn create(&self, request: &MeetingRequest) -> Result<Meeting> {
        request.validate()?;
        let meeting: Option<Meeting> = self.session.post("meetings", request).await?;
        Ok(meeting.unwrap_or_default())
    }

    /// Get a meeting by ID
    pub async fn get(&self, meeting_id: &str) -> Result<Meeting> {
        require("meetingId", meeting_id)?;
        let meeting: Option<Meeting> = self
            .session
            .get(&format!("meetings/{}", meeting_id), QueryParams::new())
            .await?;
        Ok(meeting.unwrap_or_default())
    }

    /// Replace a meeting's details
    pub async fn update(&self, meeting_id: &str, request: &MeetingRequest) -> Result<Meeting> {
        require("meetingId", meeting_id)?;
        request.validate()?;
        let meeting: Option<Meeting> = self
            .session
            .put(&format!("meetings/{}", meeting_id), request)
            .await?;
        Ok(meeting.unwrap_or_default())
    }

    /// Cancel a meeting
    pub async fn delete(&self, meeting_id: &str) -> Result<()> {
        require("meetingId", meeting_id)?;
        self.session
            .delete(&format!("meetings/{}", meeting_id))
            .await
    }

    /// Get a join link; empty email or display name are left out
    pub async fn join(
        &self,
        meeting_id: &str,
        email: &str,
        display_name: &str,
    ) -> Result<MeetingJoinInfo> {
        require("meetingId", meeting_id)?;
        let body = JoinRequest {
            meeting_id,
            email,
            display_name,
        };
        let info: Option<MeetingJoinInfo> = self.session.post("meetings/join", &body).await?;
        Ok(info.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::RestSessionConfig;
    use chrono::TimeZone;

    fn service() -> MeetingsService {
        MeetingsService::new(Arc::new(
            RestSession::new(RestSessionConfig::new("token")).unwrap(),
        ))
    }

    #[test]
    fn test_list_params_current_only() {
        let options = MeetingListOptions {
            current: true,
            ..Default::default()
        };
        let params = options.to_params();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("current"), Some("true"));
    }

    #[test]
    fn test_list_params_time_window() {
        let options = MeetingListOptions {
            from: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).unwrap()),
            max: Some(50),
            ..Default::default()
        };
        let params = options.to_params();
        assert_eq!(params.get("from"), Some("2024-03-01T00:00:00Z"));
        assert_eq!(params.get("to"), Some("2024-03-31T23:59:59Z"));
        assert_eq!(params.get("max"), Some("50"));
        assert_eq!(params.get("current"), None);
    }

    #[test]
    fn test_request_serialization() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let request = MeetingRequest::new("Standup", start, end).with_invitee(Invitee {
            email: "a@example.com".to_string(),
            ..Default::default()
        });

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["title"], "Standup");
        assert_eq!(json["start"], "2024-05-01T09:00:00Z");
        assert_eq!(json["invitees"][0]["email"], "a@example.com");
        assert!(json.get("agenda").is_none());
    }

    #[test]
    fn test_join_body_omits_empty_fields() {
        let body = JoinRequest {
            meeting_id: "MTG1",
            email: "",
            display_name: "Guest",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"meetingId": "MTG1", "displayName": "Guest"})
        );
    }

    #[test]
    fn test_meeting_deserialization() {
        let json = r#"{
            "id": "MTG1",
            "title": "Weekly",
            "start": "2024-05-01T09:00:00Z",
            "meetingOptions": {"enabledChat": true},
            "integrationTags": ["crm"]
        }"#;
        let meeting: Meeting = serde_json::from_str(json).unwrap();
        assert_eq!(meeting.id, "MTG1");
        assert_eq!(
            meeting.meeting_options.and_then(|o| o.enabled_chat),
            Some(true)
        );
        assert_eq!(meeting.integration_tags, vec!["crm".to_string()]);
    }

    #[tokio::test]
    async fn test_validation() {
        let service = service();
        let start = Utc::now();

        let missing_end = MeetingRequest {
            title: "x".to_string(),
            start: Some(start),
            ..Default::default()
        };
        assert!(service.create(&missing_end).await.unwrap_err().is_invalid_parameter());

        let missing_title = MeetingRequest::new("", start, start);
        assert!(service.create(&missing_title).await.unwrap_err().is_invalid_parameter());

        let valid = MeetingRequest::new("t", start, start);
        assert!(service.update("", &valid).await.unwrap_err().is_invalid_parameter());

        assert!(service.join("", "", "").await.unwrap_err().is_invalid_parameter());
        assert!(service.get("").await.unwrap_err().is_invalid_parameter());
        assert!(service.delete("").await.unwrap_err().is_invalid_parameter());
    }
}
