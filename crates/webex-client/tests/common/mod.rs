//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use webex_client::rest::{RestSession, RestSessionConfig};
use webex_client::{ClientConfig, WebexClient};
use wiremock::{MockServer, Request};

/// Route `tracing` output to the test harness; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";

/// Start a mock server and return it with its `/v1` base URL
pub async fn start_server() -> (MockServer, String) {
    let server = MockServer::start().await;
    let base_url = format!("{}/v1", server.uri());
    (server, base_url)
}

/// Session pointed at the mock server
pub fn session(base_url: &str) -> Arc<RestSession> {
    let config = RestSessionConfig::new(TOKEN)
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5));
    Arc::new(RestSession::new(config).unwrap())
}

/// Client pointed at the mock server
pub fn client(base_url: &str) -> WebexClient {
    let config = ClientConfig::new(TOKEN)
        .with_base_url(base_url)
        .with_timeout(Duration::from_secs(5));
    WebexClient::new(config).unwrap()
}

/// Matcher requiring the query string to be exactly `expected`
pub fn exact_query(expected: &'static str) -> impl Fn(&Request) -> bool + Send + Sync {
    move |req: &Request| req.url.query() == Some(expected)
}

/// Matcher requiring no query string at all
pub fn no_query(req: &Request) -> bool {
    req.url.query().map_or(true, str::is_empty)
}

/// `{ "items": [...] }` body
pub fn items(values: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({ "items": values })
}
