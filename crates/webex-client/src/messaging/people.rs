//! People: look up, provision and update users

use crate::rest::{require, QueryParams, RestSession};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A Webex user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique person ID
    #[serde(default)]
    pub id: String,
    /// Email addresses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
    /// Phone numbers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<PhoneNumber>,
    /// SIP addresses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sip_addresses: Vec<SipAddress>,
    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Nickname
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Organization ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Role IDs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// License IDs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<String>,
    /// Department
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Manager name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    /// Manager person ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    /// Job title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Postal addresses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last modification time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Last activity time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    /// Presence status, e.g. "active"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Whether the invitation has not been accepted yet
    #[serde(default)]
    pub invite_pending: bool,
    /// Whether the user may sign in
    #[serde(default)]
    pub login_enabled: bool,
    /// "person", "bot" or "appuser"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub person_type: Option<String>,
    /// IANA time zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Phone number entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// "work", "mobile", ...
    #[serde(rename = "type", default)]
    pub number_type: String,
    /// The number
    #[serde(default)]
    pub value: String,
}

/// SIP address entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipAddress {
    /// Address type
    #[serde(rename = "type", default)]
    pub address_type: String,
    /// SIP URI
    #[serde(default)]
    pub value: String,
    /// Whether this is the primary address
    #[serde(default)]
    pub primary: bool,
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Address type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
    /// Country code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    /// State or region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Street
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    /// Postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// Filters for [`PeopleService::list`]
#[derive(Debug, Clone, Default)]
pub struct PeopleListOptions {
    /// Exact email match
    pub email: Option<String>,
    /// Display name prefix
    pub display_name: Option<String>,
    /// Comma-separated person IDs
    pub id: Option<String>,
    /// Organization to search
    pub org_id: Option<String>,
    /// Include calling data (`callingData=true`)
    pub calling_data: bool,
    /// Location filter
    pub location_id: Option<String>,
    /// Maximum number of people
    pub max: Option<u32>,
}

impl PeopleListOptions {
    /// Search by email
    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set_opt("email", self.email.as_deref())
            .set_opt("displayName", self.display_name.as_deref())
            .set_opt("id", self.id.as_deref())
            .set_opt("orgId", self.org_id.as_deref())
            .set_flag("callingData", self.calling_data)
            .set_opt("locationId", self.location_id.as_deref())
            .set_max(self.max);
        params
    }
}

/// Body for [`PeopleService::create`] and [`PeopleService::update`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    /// Email addresses (at least one is required to create)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Organization ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Role IDs
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// License IDs
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub licenses: Vec<String>,
    /// Department
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Manager person ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    /// Job title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Postal addresses
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    /// Phone numbers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phone_numbers: Vec<PhoneNumber>,
    /// Meeting site URLs
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub site_urls: Vec<String>,
    /// Location ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    /// Enable or disable sign-in (update only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_enabled: Option<bool>,
}

impl PersonRequest {
    /// Request with a single email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            emails: vec![email.into()],
            ..Default::default()
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Service for the `people` resource
#[derive(Debug, Clone)]
pub struct PeopleService {
    session: Arc<RestSession>,
}

impl PeopleService {
    /// Create a people service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// Search people
    pub async fn list(&self, options: &PeopleListOptions) -> Result<Vec<Person>> {
        self.session.list("people", options.to_params()).await
    }

    /// Get a person by ID
    pub async fn get(&self, person_id: &str) -> Result<Person> {
        require("personId", person_id)?;
        self.fetch(&format!("people/{}", person_id)).await
    }

    /// Get the authenticated user
    pub async fn get_me(&self) -> Result<Person> {
        self.fetch("people/me").await
    }

    /// Provision a person
    pub async fn create(&self, request: &PersonRequest) -> Result<Person> {
        if request.emails.iter().all(String::is_empty) {
            return Err(Error::invalid("emails"));
        }
        let person: Option<Person> = self.session.post("people", request).await?;
        Ok(person.unwrap_or_default())
    }

    /// Update a person
    pub async fn update(&self, person_id: &str, request: &PersonRequest) -> Result<Person> {
        require("personId", person_id)?;
        let person: Option<Person> = self
            .session
            .put(&format!("people/{}", person_id), request)
            .await?;
        Ok(person.unwrap_or_default())
    }

    /// Remove a person
    pub async fn delete(&self, person_id: &str) -> Result<()> {
        require("personId", person_id)?;
        self.session.delete(&format!("people/{}", person_id)).await
    }

    async fn fetch(&self, path: &str) -> Result<Person> {
        let person: Option<Person> = self.session.get(path, QueryParams::new()).await?;
        Ok(person.unwrap_or_default())
    }
}
