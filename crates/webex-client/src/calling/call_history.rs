//! Call history for the authenticated user

use crate::rest::{QueryParams, RestSession};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const CALL_HISTORY: &str = "telephony/calls/history";

/// A placed, missed or received call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallHistoryRecord {
    /// Record ID
    #[serde(default)]
    pub id: String,
    /// Other party's name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Other party's number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// "placed", "missed" or "received"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    /// "inbound" or "outbound"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u64,
    /// Start time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    /// Answer time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_time: Option<DateTime<Utc>>,
    /// End time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Whether the call was a callback
    #[serde(default)]
    pub is_callback: bool,
    /// Callback number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_number: Option<String>,
    /// Call session ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_session_id: Option<String>,
    /// Whether the call was answered
    #[serde(default)]
    pub is_answered: bool,
    /// Whether the call was international
    #[serde(default)]
    pub is_international: bool,
    /// Why the call was originally redirected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_reason: Option<CallReason>,
    /// Why the call was last redirected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_reason: Option<CallReason>,
    /// Which party released the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_party: Option<String>,
}

/// Redirect reason
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallReason {
    /// Reason text
    #[serde(default)]
    pub reason: String,
    /// Reason code
    #[serde(default)]
    pub code: String,
}

/// Filters for [`CallHistoryService::list`]
#[derive(Debug, Clone, Default)]
pub struct CallHistoryListOptions {
    /// "placed", "missed" or "received"
    pub record_type: Option<String>,
    /// Maximum number of records
    pub max: Option<u32>,
}

/// Service for `telephony/calls/history`
#[derive(Debug, Clone)]
pub struct CallHistoryService {
    session: Arc<RestSession>,
}

impl CallHistoryService {
    /// Create a call history service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List call history
    pub async fn list(&self, options: &CallHistoryListOptions) -> Result<Vec<CallHistoryRecord>> {
        let mut params = QueryParams::new();
        params
            .set_opt("type", options.record_type.as_deref())
            .set_max(options.max);
        self.session.list(CALL_HISTORY, params).await
    }

    /// List placed calls
    pub async fn list_placed(&self, max: Option<u32>) -> Result<Vec<CallHistoryRecord>> {
        self.list_type("placed", max).await
    }

    /// List missed calls
    pub async fn list_missed(&self, max: Option<u32>) -> Result<Vec<CallHistoryRecord>> {
        self.list_type("missed", max).await
    }

    /// List received calls
    pub async fn list_received(&self, max: Option<u32>) -> Result<Vec<CallHistoryRecord>> {
        self.list_type("received", max).await
    }

    /// Clear the user's entire call history
    pub async fn delete_all(&self) -> Result<()> {
        self.session.delete(CALL_HISTORY).await
    }

    async fn list_type(&self, record_type: &str, max: Option<u32>) -> Result<Vec<CallHistoryRecord>> {
        let options = CallHistoryListOptions {
            record_type: Some(record_type.to_string()),
            max,
        };
        self.list(&options).await
    }
}
