//! Webex client
//!
//! [`WebexClient`] is the composition root: it builds one shared
//! [`RestSession`] from a [`ClientConfig`] and hands it to every resource
//! service. Environment variables are only consulted by
//! [`ClientConfig::from_env`] and [`WebexClient::from_env`].

use crate::calling::{CallHistoryService, CallsService, VoicemailService};
use crate::meeting::{MeetingInviteesService, MeetingRegistrantsService, MeetingsService};
use crate::messaging::{
    MembershipsService, MessagesService, PeopleService, RoomsService, TeamMembershipsService,
    TeamsService, WebhooksService,
};
use crate::rest::{default_user_agent, RestSession, RestSessionConfig};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use crate::rest::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

/// Environment variable holding the bearer token
pub const ACCESS_TOKEN_ENV_VAR: &str = "WEBEX_ACCESS_TOKEN";

/// Environment variable overriding the API root
pub const BASE_URL_ENV_VAR: &str = "WEBEX_BASE_URL";

/// Environment variable overriding the timeout, in whole seconds
pub const TIMEOUT_ENV_VAR: &str = "WEBEX_TIMEOUT";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for [`WebexClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// Bearer token (required)
    pub access_token: String,
    /// API root
    pub base_url: String,
    /// Transport timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create a configuration with a bearer token and defaults for the rest
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    /// Read configuration from `WEBEX_ACCESS_TOKEN`, `WEBEX_BASE_URL` and
    /// `WEBEX_TIMEOUT`
    ///
    /// A missing token yields [`Error::MissingAccessToken`]; a timeout that is
    /// not a whole number of seconds yields [`Error::Config`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let access_token = read(ACCESS_TOKEN_ENV_VAR).ok_or(Error::MissingAccessToken)?;
        let mut config = Self::new(access_token);

        if let Some(base_url) = read(BASE_URL_ENV_VAR) {
            config.base_url = base_url;
        }

        if let Some(timeout) = read(TIMEOUT_ENV_VAR) {
            let secs = timeout.parse::<u64>().map_err(|e| {
                Error::Config(format!("{} must be whole seconds, got {:?}: {}", TIMEOUT_ENV_VAR, timeout, e))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn session_config(self) -> RestSessionConfig {
        RestSessionConfig::new(self.access_token)
            .with_base_url(self.base_url)
            .with_timeout(self.timeout)
            .with_user_agent(self.user_agent)
    }
}

/// Entry point to the Webex API
///
/// All services share one [`RestSession`], so rotating the token through
/// [`WebexClient::set_access_token`] affects every service at once.
///
/// # Example
///
/// ```rust,no_run
/// use webex_client::messaging::RoomListOptions;
/// use webex_client::{ClientConfig, WebexClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = WebexClient::new(ClientConfig::new("my-token"))?;
///
///     for room in client.rooms().list(&RoomListOptions::default()).await? {
///         println!("{} {:?}", room.id, room.title);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct WebexClient {
    session: Arc<RestSession>,
    messages: MessagesService,
    rooms: RoomsService,
    people: PeopleService,
    teams: TeamsService,
    memberships: MembershipsService,
    team_memberships: TeamMembershipsService,
    webhooks: WebhooksService,
    meetings: MeetingsService,
    meeting_invitees: MeetingInviteesService,
    meeting_registrants: MeetingRegistrantsService,
    calls: CallsService,
    call_history: CallHistoryService,
    voicemail: VoicemailService,
}

impl WebexClient {
    /// Create a client
    ///
    /// Fails with [`Error::MissingAccessToken`] if the token is empty.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.access_token.trim().is_empty() {
            return Err(Error::MissingAccessToken);
        }
        let session = RestSession::new(config.session_config())?;
        Ok(Self::with_session(Arc::new(session)))
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a client around an existing session
    pub fn with_session(session: Arc<RestSession>) -> Self {
        tracing::debug!(base_url = session.base_url(), "creating Webex client");
        Self {
            messages: MessagesService::new(session.clone()),
            rooms: RoomsService::new(session.clone()),
            people: PeopleService::new(session.clone()),
            teams: TeamsService::new(session.clone()),
            memberships: MembershipsService::new(session.clone()),
            team_memberships: TeamMembershipsService::new(session.clone()),
            webhooks: WebhooksService::new(session.clone()),
            meetings: MeetingsService::new(session.clone()),
            meeting_invitees: MeetingInviteesService::new(session.clone()),
            meeting_registrants: MeetingRegistrantsService::new(session.clone()),
            calls: CallsService::new(session.clone()),
            call_history: CallHistoryService::new(session.clone()),
            voicemail: VoicemailService::new(session.clone()),
            session,
        }
    }

    /// Messages
    pub fn messages(&self) -> &MessagesService {
        &self.messages
    }

    /// Rooms
    pub fn rooms(&self) -> &RoomsService {
        &self.rooms
    }

    /// People
    pub fn people(&self) -> &PeopleService {
        &self.people
    }

    /// Teams
    pub fn teams(&self) -> &TeamsService {
        &self.teams
    }

    /// Room memberships
    pub fn memberships(&self) -> &MembershipsService {
        &self.memberships
    }

    /// Team memberships
    pub fn team_memberships(&self) -> &TeamMembershipsService {
        &self.team_memberships
    }

    /// Webhooks
    pub fn webhooks(&self) -> &WebhooksService {
        &self.webhooks
    }

    /// Meetings
    pub fn meetings(&self) -> &MeetingsService {
        &self.meetings
    }

    /// Meeting invitees
    pub fn meeting_invitees(&self) -> &MeetingInviteesService {
        &self.meeting_invitees
    }

    /// Meeting registrants
    pub fn meeting_registrants(&self) -> &MeetingRegistrantsService {
        &self.meeting_registrants
    }

    /// Call control
    pub fn calls(&self) -> &CallsService {
        &self.calls
    }

    /// Call history
    pub fn call_history(&self) -> &CallHistoryService {
        &self.call_history
    }

    /// Voicemail
    pub fn voicemail(&self) -> &VoicemailService {
        &self.voicemail
    }

    /// Current bearer token
    pub fn access_token(&self) -> String {
        self.session.access_token()
    }

    /// Replace the bearer token for all services
    pub fn set_access_token(&self, token: impl Into<String>) {
        self.session.set_access_token(token);
    }

    /// The shared session
    pub fn session(&self) -> &Arc<RestSession> {
        &self.session
    }
}
