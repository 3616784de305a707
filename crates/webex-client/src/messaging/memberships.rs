//! Room and team memberships

use crate::rest::{is_set, require, QueryParams, RestSession};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Room Memberships
// =============================================================================

/// A person's membership in a room
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// Unique membership ID
    #[serde(default)]
    pub id: String,
    /// Room ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    /// Member's person ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    /// Member's email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_email: Option<String>,
    /// Member's display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_display_name: Option<String>,
    /// Member's organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_org_id: Option<String>,
    /// Whether the member moderates the room
    #[serde(default)]
    pub is_moderator: bool,
    /// Whether the member is a monitor
    #[serde(default)]
    pub is_monitor: bool,
    /// Whether the room is hidden in the member's client
    #[serde(default)]
    pub is_room_hidden: bool,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Filters for [`MembershipsService::list`]
#[derive(Debug, Clone, Default)]
pub struct MembershipListOptions {
    /// Only memberships in this room
    pub room_id: Option<String>,
    /// Only memberships of this person
    pub person_id: Option<String>,
    /// Only memberships of this email
    pub person_email: Option<String>,
    /// Maximum number of memberships
    pub max: Option<u32>,
}

impl MembershipListOptions {
    /// Members of a room
    pub fn for_room(room_id: impl Into<String>) -> Self {
        Self {
            room_id: Some(room_id.into()),
            ..Default::default()
        }
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set_opt("roomId", self.room_id.as_deref())
            .set_opt("personId", self.person_id.as_deref())
            .set_opt("personEmail", self.person_email.as_deref())
            .set_max(self.max);
        params
    }
}

/// Body for [`MembershipsService::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipCreateRequest {
    /// Room to add to (required)
    pub room_id: String,
    /// Person to add
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    /// Email to add
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_email: Option<String>,
    /// Grant moderator rights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_moderator: Option<bool>,
}

impl MembershipCreateRequest {
    /// Add a person to a room by email
    pub fn by_email(room_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            person_email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Add a person to a room by person ID
    pub fn by_person_id(room_id: impl Into<String>, person_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            person_id: Some(person_id.into()),
            ..Default::default()
        }
    }
}

/// Body for [`MembershipsService::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipUpdateRequest {
    /// Grant or revoke moderator rights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_moderator: Option<bool>,
    /// Hide or show the room
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_room_hidden: Option<bool>,
}

/// Service for the `memberships` resource
#[derive(Debug, Clone)]
pub struct MembershipsService {
    session: Arc<RestSession>,
}

impl MembershipsService {
    /// Create a memberships service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List memberships
    pub async fn list(&self, options: &MembershipListOptions) -> Result<Vec<Membership>> {
        self.session.list("memberships", options.to_params()).await
    }

    /// Add a person to a room
    pub async fn create(&self, request: &MembershipCreateRequest) -> Result<Membership> {
        require("roomId", &request.room_id)?;
        if !is_set(&request.person_id) && !is_set(&request.person_email) {
            return Err(Error::invalid("personId or personEmail"));
        }
        let membership: Option<Membership> = self.session.post("memberships", request).await?;
        Ok(membership.unwrap_or_default())
    }

    /// Get a membership by ID
    pub async fn get(&self, membership_id: &str) -> Result<Membership> {
        require("membershipId", membership_id)?;
        let membership: Option<Membership> = self
            .session
            .get(&format!("memberships/{}", membership_id), QueryParams::new())
            .await?;
        Ok(membership.unwrap_or_default())
    }

    /// Change moderator or hidden status
    pub async fn update(
        &self,
        membership_id: &str,
        request: &MembershipUpdateRequest,
    ) -> Result<Membership> {
        require("membershipId", membership_id)?;
        let membership: Option<Membership> = self
            .session
            .put(&format!("memberships/{}", membership_id), request)
            .await?;
        Ok(membership.unwrap_or_default())
    }

    /// Remove a person from a room
    pub async fn delete(&self, membership_id: &str) -> Result<()> {
        require("membershipId", membership_id)?;
        self.session
            .delete(&format!("memberships/{}", membership_id))
            .await
    }
}

// =============================================================================
// Team Memberships
// =============================================================================

const TEAM_MEMBERSHIPS: &str = "team/memberships";

/// A person's membership in a team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembership {
    /// Unique membership ID
    #[serde(default)]
    pub id: String,
    /// Team ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Member's person ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    /// Member's email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_email: Option<String>,
    /// Member's display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_display_name: Option<String>,
    /// Member's organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_org_id: Option<String>,
    /// Whether the member moderates the team
    #[serde(default)]
    pub is_moderator: bool,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Body for [`TeamMembershipsService::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembershipCreateRequest {
    /// Team to add to (required)
    pub team_id: String,
    /// Person to add
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    /// Email to add
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_email: Option<String>,
    /// Grant moderator rights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_moderator: Option<bool>,
}

impl TeamMembershipCreateRequest {
    /// Add a person to a team by email
    pub fn by_email(team_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            person_email: Some(email.into()),
            ..Default::default()
        }
    }
}

/// Body for [`TeamMembershipsService::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembershipUpdateRequest {
    /// Grant or revoke moderator rights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_moderator: Option<bool>,
}

/// Service for the `team/memberships` resource
#[derive(Debug, Clone)]
pub struct TeamMembershipsService {
    session: Arc<RestSession>,
}

impl TeamMembershipsService {
    /// Create a team memberships service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List the members of a team
    pub async fn list(&self, team_id: &str, max: Option<u32>) -> Result<Vec<TeamMembership>> {
        require("teamId", team_id)?;
        let mut params = QueryParams::new();
        params.set("teamId", team_id).set_max(max);
        self.session.list(TEAM_MEMBERSHIPS, params).await
    }

    /// Add a person to a team
    pub async fn create(&self, request: &TeamMembershipCreateRequest) -> Result<TeamMembership> {
        require("teamId", &request.team_id)?;
        if !is_set(&request.person_id) && !is_set(&request.person_email) {
            return Err(Error::invalid("personId or personEmail"));
        }
        let membership: Option<TeamMembership> =
            self.session.post(TEAM_MEMBERSHIPS, request).await?;
        Ok(membership.unwrap_or_default())
    }

    /// Get a team membership by ID
    pub async fn get(&self, membership_id: &str) -> Result<TeamMembership> {
        require("membershipId", membership_id)?;
        let membership: Option<TeamMembership> = self
            .session
            .get(
                &format!("{}/{}", TEAM_MEMBERSHIPS, membership_id),
                QueryParams::new(),
            )
            .await?;
        Ok(membership.unwrap_or_default())
    }

    /// Change moderator status
    pub async fn update(
        &self,
        membership_id: &str,
        request: &TeamMembershipUpdateRequest,
    ) -> Result<TeamMembership> {
        require("membershipId", membership_id)?;
        let membership: Option<TeamMembership> = self
            .session
            .put(&format!("{}/{}", TEAM_MEMBERSHIPS, membership_id), request)
            .await?;
        Ok(membership.unwrap_or_default())
    }

    /// Remove a person from a team
    pub async fn delete(&self, membership_id: &str) -> Result<()> {
        require("membershipId", membership_id)?;
        self.session
            .delete(&format!("{}/{}", TEAM_MEMBERSHIPS, membership_id))
            .await
    }
}
