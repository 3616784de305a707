//! Rooms: spaces where messages are exchanged

use crate::rest::{require, QueryParams, RestSession};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A room (space)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room ID
    #[serde(default)]
    pub id: String,
    /// Room title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// "direct" or "group"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    /// Whether the room is moderated
    #[serde(default)]
    pub is_locked: bool,
    /// Whether the room is public
    #[serde(default)]
    pub is_public: bool,
    /// Whether only moderators may post
    #[serde(default)]
    pub is_announcement_only: bool,
    /// Whether the room is read-only
    #[serde(default)]
    pub is_read_only: bool,
    /// Owning team
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Data classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_id: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Last activity time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Creator's person ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    /// SIP address for the room
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sip_address: Option<String>,
    /// Owning organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Meeting details for a room
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMeetingInfo {
    /// Room ID
    #[serde(default)]
    pub room_id: String,
    /// Join link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    /// SIP address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sip_address: Option<String>,
    /// Meeting number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_number: Option<String>,
    /// Toll-free dial-in number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_in_toll_free_number: Option<String>,
    /// Toll dial-in number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_in_toll_number: Option<String>,
}

/// Filters for [`RoomsService::list`]
#[derive(Debug, Clone, Default)]
pub struct RoomListOptions {
    /// Only rooms in this team
    pub team_id: Option<String>,
    /// "direct" or "group"
    pub room_type: Option<String>,
    /// "id", "lastactivity" or "created"
    pub sort_by: Option<String>,
    /// Maximum number of rooms
    pub max: Option<u32>,
}

impl RoomListOptions {
    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set_opt("teamId", self.team_id.as_deref())
            .set_opt("type", self.room_type.as_deref())
            .set_opt("sortBy", self.sort_by.as_deref())
            .set_max(self.max);
        params
    }
}

/// Body for [`RoomsService::create`] and [`RoomsService::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    /// Room title (required)
    pub title: String,
    /// Team to create the room in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Data classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_id: Option<String>,
    /// Make the room moderated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
    /// Make the room public
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    /// Description (required for public rooms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Restrict posting to moderators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_announcement_only: Option<bool>,
    /// Make the room read-only (update only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read_only: Option<bool>,
}

impl RoomRequest {
    /// Request with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Create in a team
    pub fn with_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }
}

/// Service for the `rooms` resource
#[derive(Debug, Clone)]
pub struct RoomsService {
    session: Arc<RestSession>,
}

impl RoomsService {
    /// Create a rooms service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List rooms the user belongs to
    pub async fn list(&self, options: &RoomListOptions) -> Result<Vec<Room>> {
        self.session.list("rooms", options.to_params()).await
    }

    /// Create a room
    pub async fn create(&self, request: &RoomRequest) -> Result<Room> {
        require("title", &request.title)?;
        let room: Option<Room> = self.session.post("rooms", request).await?;
        Ok(room.unwrap_or_default())
    }

    /// Get a room by ID
    pub async fn get(&self, room_id: &str) -> Result<Room> {
        require("roomId", room_id)?;
        let room: Option<Room> = self
            .session
            .get(&format!("rooms/{}", room_id), QueryParams::new())
            .await?;
        Ok(room.unwrap_or_default())
    }

    /// Get meeting join details for a room
    pub async fn get_meeting_info(&self, room_id: &str) -> Result<RoomMeetingInfo> {
        require("roomId", room_id)?;
        let info: Option<RoomMeetingInfo> = self
            .session
            .get(&format!("rooms/{}/meetingInfo", room_id), QueryParams::new())
            .await?;
        Ok(info.unwrap_or_default())
    }

    /// Update a room
    pub async fn update(&self, room_id: &str, request: &RoomRequest) -> Result<Room> {
        require("roomId", room_id)?;
        require("title", &request.title)?;
        let room: Option<Room> = self
            .session
            .put(&format!("rooms/{}", room_id), request)
            .await?;
        Ok(room.unwrap_or_default())
    }

    /// Delete a room
    pub async fn delete(&self, room_id: &str) -> Result<()> {
        require("roomId", room_id)?;
        self.session.delete(&format!("rooms/{}", room_id)).await
    }
}
