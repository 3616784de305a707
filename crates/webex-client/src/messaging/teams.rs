//! Teams: groups of people with a set of shared rooms

use crate::rest::{require, QueryParams, RestSession};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A team
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Unique team ID
    #[serde(default)]
    pub id: String,
    /// Team name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Creator's person ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
}

/// Body for [`TeamsService::create`] and [`TeamsService::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRequest {
    /// Team name (required)
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TeamRequest {
    /// Request with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// Service for the `teams` resource
#[derive(Debug, Clone)]
pub struct TeamsService {
    session: Arc<RestSession>,
}

impl TeamsService {
    /// Create a teams service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List teams the user belongs to
    pub async fn list(&self, max: Option<u32>) -> Result<Vec<Team>> {
        let mut params = QueryParams::new();
        params.set_max(max);
        self.session.list("teams", params).await
    }

    /// Create a team
    pub async fn create(&self, request: &TeamRequest) -> Result<Team> {
        require("name", &request.name)?;
        let team: Option<Team> = self.session.post("teams", request).await?;
        Ok(team.unwrap_or_default())
    }

    /// Get a team by ID
    pub async fn get(&self, team_id: &str) -> Result<Team> {
        require("teamId", team_id)?;
        let team: Option<Team> = self
            .session
            .get(&format!("teams/{}", team_id), QueryParams::new())
            .await?;
        Ok(team.unwrap_or_default())
    }

    /// Rename or describe a team
    pub async fn update(&self, team_id: &str, request: &TeamRequest) -> Result<Team> {
        require("teamId", team_id)?;
        require("name", &request.name)?;
        let team: Option<Team> = self
            .session
            .put(&format!("teams/{}", team_id), request)
            .await?;
        Ok(team.unwrap_or_default())
    }

    /// Delete a team
    pub async fn delete(&self, team_id: &str) -> Result<()> {
        require("teamId", team_id)?;
        self.session.delete(&format!("teams/{}", team_id)).await
    }
}
