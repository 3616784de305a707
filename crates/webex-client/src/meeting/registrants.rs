//! Webinar and meeting registrants, and the registration form

use crate::rest::{require, ItemsResponse, QueryParams, RestSession};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MEETING_REGISTRANTS: &str = "meetingRegistrants";

/// A person registered for a meeting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRegistrant {
    /// Unique registrant ID
    #[serde(default)]
    pub id: String,
    /// Meeting ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    /// Registration time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub register_time: Option<DateTime<Utc>>,
    /// "approved", "pending" or "rejected"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Job title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Address line 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// Address line 2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    /// Country or region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_region: Option<String>,
    /// Work phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<String>,
    /// Fax
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    /// Source tracking ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Answers to custom questions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customized_questions: Vec<CustomizedQuestion>,
}

/// Answer to a custom registration question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizedQuestion {
    /// Question ID
    #[serde(default)]
    pub question_id: String,
    /// Answer
    #[serde(default)]
    pub answer: String,
}

/// Filters for [`MeetingRegistrantsService::list`]
#[derive(Debug, Clone, Default)]
pub struct RegistrantListOptions {
    /// Meeting to list registrants for (required)
    pub meeting_id: String,
    /// Host on whose behalf to list (admin only)
    pub host_email: Option<String>,
    /// "DESC" or "ASC"
    pub order_type: Option<String>,
    /// "firstName", "lastName", "status" or "email"
    pub order_by: Option<String>,
    /// Only the current instance (`current=true`)
    pub current: bool,
    /// Only this registrant email
    pub email: Option<String>,
    /// Maximum number of registrants
    pub max: Option<u32>,
}

impl RegistrantListOptions {
    /// Registrants of a meeting
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
            .set_opt("orderType", self.order_type.as_deref())
            .set_opt("orderBy", self.order_by.as_deref())
            .set_flag("current", self.current)
            .set_opt("email", self.email.as_deref())
            .set_max(self.max);
        params
    }
}

/// Body for [`MeetingRegistrantsService::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrantCreateRequest {
    /// Meeting ID (required)
    pub meeting_id: String,
    /// First name (required)
    pub first_name: String,
    /// Last name (required)
    pub last_name: String,
    /// Email (required)
    pub email: String,
    /// Job title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Country or region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_region: Option<String>,
    /// Work phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<String>,
    /// Send a confirmation email
    pub send_email: bool,
    /// Host on whose behalf to register (admin only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
    /// Answers to custom questions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub customized_questions: Vec<CustomizedQuestion>,
}

impl RegistrantCreateRequest {
    /// Request with the required fields
    pub fn new(
        meeting_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            meeting_id: meeting_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            ..Default::default()
        }
    }
}

/// One entry of [`RegistrantBulkCreateRequest::items`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRegistrantItem {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email
    pub email: String,
    /// Job title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Body for [`MeetingRegistrantsService::bulk_create`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrantBulkCreateRequest {
    /// Meeting ID (required)
    pub meeting_id: String,
    /// Host on whose behalf to register (admin only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
    /// Send confirmation emails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,
    /// Registrants (at least one)
    pub items: Vec<BulkRegistrantItem>,
}

/// Body for [`MeetingRegistrantsService::update_status`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrantStatusRequest {
    /// "approved", "pending" or "rejected" (required)
    pub status: String,
    /// Notify the registrant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,
    /// Host on whose behalf to update (admin only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
}

impl RegistrantStatusRequest {
    /// Request with a status
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Default::default()
        }
    }
}

/// Query options for [`MeetingRegistrantsService::get_registration_form`]
#[derive(Debug, Clone, Default)]
pub struct RegistrationFormOptions {
    /// Host on whose behalf to read (admin only)
    pub host_email: Option<String>,
    /// Only the current instance (`current=true`)
    pub current: bool,
}

/// Registration form settings of a meeting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    /// Registrations are approved automatically
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_register_num: Option<u32>,
    /// Custom questions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customized_questions: Vec<RegistrationQuestion>,
}

/// A custom question on the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationQuestion {
    /// Question ID
    #[serde(rename = "questionID", default)]
    pub question_id: u64,
    /// Question text
    #[serde(default)]
    pub question: String,
    /// Whether an answer is mandatory
    #[serde(default)]
    pub required: bool,
    /// "singleLineTextBox", "checkbox", ...
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    /// Choices for list-style questions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Service for the `meetingRegistrants` resource
#[derive(Debug, Clone)]
pub struct MeetingRegistrantsService {
    session: Arc<RestSession>,
}

impl MeetingRegistrantsService {
    /// Create a registrants service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List registrants of a meeting
    pub async fn list(&self, options: &RegistrantListOptions) -> Result<Vec<MeetingRegistrant>> {
        require("meetingId", &options.meeting_id)?;
        self.session
            .list(MEETING_REGISTRANTS, options.to_params())
            .await
    }

    /// Register one person
    pub async fn create(&self, request: &RegistrantCreateRequest) -> Result<MeetingRegistrant> {
        require("meetingId", &request.meeting_id)?;
        require("firstName", &request.first_name)?;
        require("lastName", &request.last_name)?;
        require("email", &request.email)?;
        let registrant: Option<MeetingRegistrant> =
            self.session.post(MEETING_REGISTRANTS, request).await?;
        Ok(registrant.unwrap_or_default())
    }

    /// Register several people in one call
    pub async fn bulk_create(
        &self,
        request: &RegistrantBulkCreateRequest,
    ) -> Result<Vec<MeetingRegistrant>> {
        require("meetingId", &request.meeting_id)?;
        if request.items.is_empty() {
            return Err(Error::invalid("items"));
        }
        let response: Option<ItemsResponse<MeetingRegistrant>> = self
            .session
            .post(&format!("{}/bulkInsert", MEETING_REGISTRANTS), request)
            .await?;
        Ok(response.map(|r| r.items).unwrap_or_default())
    }

    /// Get a registrant by ID
    pub async fn get(&self, registrant_id: &str) -> Result<MeetingRegistrant> {
        require("registrantId", registrant_id)?;
        let registrant: Option<MeetingRegistrant> = self
            .session
            .get(
                &format!("{}/{}", MEETING_REGISTRANTS, registrant_id),
                QueryParams::new(),
            )
            .await?;
        Ok(registrant.unwrap_or_default())
    }

    /// Approve, reject or set a registrant back to pending
    pub async fn update_status(
        &self,
        registrant_id: &str,
        request: &RegistrantStatusRequest,
    ) -> Result<MeetingRegistrant> {
        require("registrantId", registrant_id)?;
        require("status", &request.status)?;
        let registrant: Option<MeetingRegistrant> = self
            .session
            .put(&format!("{}/{}", MEETING_REGISTRANTS, registrant_id), request)
            .await?;
        Ok(registrant.unwrap_or_default())
    }

    /// Remove a registrant
    pub async fn delete(&self, registrant_id: &str) -> Result<()> {
        require("registrantId", registrant_id)?;
        self.session
            .delete(&format!("{}/{}", MEETING_REGISTRANTS, registrant_id))
            .await
    }

    /// Get the registration form of a meeting
    pub async fn get_registration_form(
        &self,
        meeting_id: &str,
        options: &RegistrationFormOptions,
    ) -> Result<RegistrationForm> {
        require("meetingId", meeting_id)?;
        let mut params = QueryParams::new();
        params
            .set_opt("hostEmail", options.host_email.as_deref())
            .set_flag("current", options.current);
        let form: Option<RegistrationForm> = self
            .session
            .get(&format!("meetings/{}/registration", meeting_id), params)
            .await?;
        Ok(form.unwrap_or_default())
    }
}
