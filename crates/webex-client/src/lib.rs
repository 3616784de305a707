//! Webex REST API Client Library
//!
//! This crate provides a typed Rust client for the Webex collaboration
//! platform: messaging (rooms, messages, people, teams, memberships,
//! webhooks), meetings (meetings, invitees, registrants) and calling (calls,
//! call history, voicemail).
//!
//! Every operation is a single authenticated request/response exchange
//! performed by the shared [`rest::RestSession`] executor. Nothing is retried,
//! paginated or cached; rate-limit errors carry the server's `Retry-After`
//! hint so callers can apply their own policy. Per-call deadlines belong to
//! the caller as well: wrap any call in `tokio::time::timeout` and the elapsed
//! deadline drops the in-flight request.
//!
//! # Example
//!
//! ```rust,no_run
//! use webex_client::messaging::MessageCreateRequest;
//! use webex_client::{ClientConfig, WebexClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WebexClient::new(ClientConfig::new("my-token"))?;
//!
//!     let request = MessageCreateRequest::to_room("ROOM_ID").with_text("hello");
//!     let message = client.messages().create(&request).await?;
//!     println!("sent {}", message.id);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod calling;
pub mod client;
pub mod meeting;
pub mod messaging;
pub mod rest;

pub use client::{ClientConfig, WebexClient};
pub use rest::{ApiError, ErrorDetail, RateLimitError, RestSession, RestSessionConfig};

use std::path::PathBuf;

/// Result type for Webex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Webex operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required identifier or body field was missing or empty.
    /// Raised before any network I/O.
    #[error("Invalid or missing required parameter: {0}")]
    InvalidParameter(String),

    /// The request body could not be encoded as JSON
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body was not the expected JSON
    #[error("Failed to deserialize response body: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Network, TLS, timeout or other transport failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API rejected the request
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The API rejected the request with 429 Too Many Requests
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    /// A local file for a multipart upload could not be read
    #[error("Failed to read file {} for field {field}: {source}", .path.display())]
    File {
        /// Form field the file was meant for
        field: String,
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// No access token was supplied or found in the environment
    #[error("Access token is required")]
    MissingAccessToken,

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`]
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Error::InvalidParameter(what.into())
    }

    /// HTTP status of an API or rate-limit error
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => Some(err.status()),
            Error::RateLimited(err) => Some(err.status()),
            _ => None,
        }
    }

    /// Tracking ID reported by the service, if any
    pub fn tracking_id(&self) -> Option<&str> {
        match self {
            Error::Api(err) => err.tracking_id(),
            Error::RateLimited(err) => err.tracking_id(),
            _ => None,
        }
    }

    /// How long the service asked us to wait, for rate-limit errors
    pub fn retry_after(&self) -> Option<std::time::Duration> {
        match self {
            Error::RateLimited(err) => Some(err.retry_after()),
            _ => None,
        }
    }

    /// Whether this error came from a 429 response
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited(_))
    }

    /// Whether the caller supplied a missing/empty required field
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::InvalidParameter(_))
    }
}
