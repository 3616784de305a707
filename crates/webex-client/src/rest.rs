//! REST session implementation
//!
//! This module implements the shared request executor used by every Webex
//! resource service. It owns the base URL, bearer token, user agent and HTTP
//! transport, performs exactly one HTTP exchange per call, classifies error
//! responses and decodes JSON bodies.
//!
//! Nothing here retries, paginates or caches.

use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response as ReqwestResponse, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://webexapis.com/v1/";

/// Transport timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Wait hint used when a 429 carries no usable `Retry-After` header
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Response header carrying the service's correlation identifier
pub const TRACKING_ID_HEADER: &str = "trackingid";

const JSON_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// Error Types
// =============================================================================

/// A single entry of the `errors` array in an error response body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

/// Error returned by the Webex API for any status >= 400 other than 429
///
/// # Examples
/// ```
/// use webex_client::ApiError;
///
/// let error = ApiError::new(404, Some("Not found".to_string()), None, vec![]);
/// assert_eq!(error.status(), 404);
/// assert!(error.is_not_found());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: u16,
    message: Option<String>,
    tracking_id: Option<String>,
    errors: Vec<ErrorDetail>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(
        status: u16,
        message: Option<String>,
        tracking_id: Option<String>,
        errors: Vec<ErrorDetail>,
    ) -> Self {
        Self {
            status,
            message,
            tracking_id,
            errors,
        }
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the error message from the response body
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Get the tracking ID from the response headers
    pub fn tracking_id(&self) -> Option<&str> {
        self.tracking_id.as_deref()
    }

    /// Get the structured error details from the response body
    pub fn errors(&self) -> &[ErrorDetail] {
        &self.errors
    }

    /// 401 Unauthorized
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// 404 Not Found
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Any 5xx status
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Webex API error: status={}", self.status)?;
        if let Some(message) = &self.message {
            write!(f, ", message={}", message)?;
        }
        if let Some(tracking_id) = &self.tracking_id {
            write!(f, ", trackingId={}", tracking_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Error returned for 429 Too Many Requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitError {
    error: ApiError,
    retry_after: Duration,
}

impl RateLimitError {
    /// Create a new rate-limit error
    pub fn new(error: ApiError, retry_after: Duration) -> Self {
        Self { error, retry_after }
    }

    /// How long the service asked the caller to wait
    pub fn retry_after(&self) -> Duration {
        self.retry_after
    }

    /// The underlying API error
    pub fn api_error(&self) -> &ApiError {
        &self.error
    }

    /// Get the HTTP status code (always 429 when built from a response)
    pub fn status(&self) -> u16 {
        self.error.status()
    }

    /// Get the error message from the response body
    pub fn message(&self) -> Option<&str> {
        self.error.message()
    }

    /// Get the tracking ID from the response headers
    pub fn tracking_id(&self) -> Option<&str> {
        self.error.tracking_id()
    }
}

impl fmt::Display for RateLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rate limit exceeded: retry after {}s",
            self.retry_after.as_secs()
        )
    }
}

impl std::error::Error for RateLimitError {}

/// Pull `message` and `errors` out of an error body one field at a time
///
/// A malformed or `null` field only loses that field, never the others.
fn parse_error_body(body: &[u8]) -> (Option<String>, Vec<ErrorDetail>) {
    let value: serde_json::Value = serde_json::from_slice(body).unwrap_or_default();

    let message = value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    let errors = value
        .get("errors")
        .and_then(serde_json::Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .map(|entry| ErrorDetail {
                    description: entry
                        .get("description")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    (message, errors)
}

/// Parse `Retry-After` as integer seconds, falling back to [`DEFAULT_RETRY_AFTER`]
pub fn retry_after_from_headers(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_AFTER)
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Request Types
// =============================================================================

/// HTTP method for REST requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
    /// PUT request
    Put,
    /// DELETE request
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Query string parameters
///
/// Optional filters are only added when they carry a value: empty strings,
/// `None`, zero limits and `false` flags never reach the query string.
///
/// # Examples
/// ```
/// use webex_client::rest::QueryParams;
///
/// let mut params = QueryParams::new();
/// params.set_str("roomId", "R1");
/// params.set_str("parentId", "");
/// params.set_max(Some(0));
/// params.set_flag("current", true);
///
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.get("current"), Some("true"));
/// assert_eq!(params.get("parentId"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value for the key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
        self
    }

    /// Set a parameter only if the value is non-empty
    pub fn set_str(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.set(key, value);
        }
        self
    }

    /// Set a parameter only if present and non-empty
    pub fn set_opt(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.set_str(key, value);
        }
        self
    }

    /// Set `key=true` when the flag is set; `false` is omitted
    pub fn set_flag(&mut self, key: &str, flag: bool) -> &mut Self {
        if flag {
            self.set(key, "true");
        }
        self
    }

    /// Set `max` when a positive limit is given
    pub fn set_max(&mut self, max: Option<u32>) -> &mut Self {
        if let Some(max) = max.filter(|max| *max > 0) {
            self.set("max", max.to_string());
        }
        self
    }

    /// Set an RFC 3339 timestamp when present
    pub fn set_time(&mut self, key: &str, time: Option<&DateTime<Utc>>) -> &mut Self {
        if let Some(time) = time {
            self.set(key, time.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        self
    }

    /// Look up a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameter is set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over key/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// REST request descriptor
///
/// Represents one call against a path relative to the session's base URL,
/// with optional query parameters and an optional pre-serialized JSON body.
#[derive(Debug, Clone)]
pub struct RestRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base URL (e.g., "messages" or "rooms/{id}")
    pub path: String,
    /// Query parameters
    pub params: QueryParams,
    /// Serialized JSON body
    pub body: Option<Vec<u8>>,
}

impl RestRequest {
    /// Create a request with the given method and path
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: QueryParams::new(),
            body: None,
        }
    }

    /// Create a GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Create a POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Create a PUT request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Create a DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Replace the query parameters
    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Add a single query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(key, value);
        self
    }

    /// Set the request body from JSON
    ///
    /// Fails with [`Error::Serialization`] before anything is sent.
    pub fn json_body<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value).map_err(Error::Serialization)?;
        self.body = Some(body);
        Ok(self)
    }
}

/// `{ "items": [...] }` wrapper used by every list endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ItemsResponse<T> {
    /// Returned items
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Fail with [`Error::InvalidParameter`] when a required string is empty
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid(field));
    }
    Ok(())
}

/// Whether an optional string carries a non-empty value
pub(crate) fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

// =============================================================================
// Session Configuration
// =============================================================================

/// Configuration for [`RestSession`]
#[derive(Clone)]
pub struct RestSessionConfig {
    /// Bearer token
    pub access_token: String,
    /// API root; normalized to end with a single `/`
    pub base_url: String,
    /// Transport timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Pre-built transport; when set, `timeout` is not applied to it
    pub http_client: Option<ReqwestClient>,
}

impl Default for RestSessionConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
            http_client: None,
        }
    }
}

impl fmt::Debug for RestSessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestSessionConfig")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("http_client", &self.http_client.is_some())
            .finish()
    }
}

impl RestSessionConfig {
    /// Create a new config with an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
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

    /// Use a pre-built HTTP client
    pub fn with_http_client(mut self, client: ReqwestClient) -> Self {
        self.http_client = Some(client);
        self
    }
}

/// `webex-client/<version>`
pub fn default_user_agent() -> String {
    format!("webex-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Ensure the base URL ends with exactly one `/`
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_BASE_URL.to_string();
    }
    format!("{}/", trimmed)
}

// =============================================================================
// REST Session Implementation
// =============================================================================

/// Shared executor for authenticated Webex API requests
///
/// The bearer token and transport can be replaced at any time, including
/// while other tasks have requests in flight. Each request reads the token
/// once, under a read lock, when it builds its headers.
///
/// Only the configured transport timeout surfaces as [`Error::Transport`].
/// To bound or cancel a single call, drop its future or wrap it in
/// [`tokio::time::timeout`]; the in-flight request is aborted and the caller
/// sees `tokio::time::error::Elapsed` rather than a crate error.
///
/// # Examples
/// ```no_run
/// use webex_client::rest::{QueryParams, RestSession, RestSessionConfig};
///
/// async fn example() -> webex_client::Result<()> {
///     let session = RestSession::new(RestSessionConfig::new("token"))?;
///
///     let me: Option<serde_json::Value> = session.get("people/me", QueryParams::new()).await?;
///     println!("{:?}", me);
///     Ok(())
/// }
/// ```
pub struct RestSession {
    base_url: String,
    user_agent: String,
    timeout: Duration,
    access_token: RwLock<String>,
    client: RwLock<ReqwestClient>,
}

impl fmt::Debug for RestSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestSession")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl RestSession {
    /// Create a new session
    ///
    /// Fails with [`Error::Transport`] if the HTTP client cannot be built.
    pub fn new(config: RestSessionConfig) -> Result<Self> {
        let timeout = if config.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            config.timeout
        };

        let client = match config.http_client {
            Some(client) => client,
            None => ReqwestClient::builder().timeout(timeout).build()?,
        };

        let user_agent = if config.user_agent.is_empty() {
            default_user_agent()
        } else {
            config.user_agent
        };

        Ok(Self {
            base_url: normalize_base_url(&config.base_url),
            user_agent,
            timeout,
            access_token: RwLock::new(config.access_token),
            client: RwLock::new(client),
        })
    }

    /// Current bearer token
    pub fn access_token(&self) -> String {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the bearer token used by subsequent requests
    pub fn set_access_token(&self, token: impl Into<String>) {
        let mut guard = self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = token.into();
    }

    /// Replace the HTTP transport used by subsequent requests
    pub fn set_http_client(&self, client: ReqwestClient) {
        let mut guard = self.client.write().unwrap_or_else(PoisonError::into_inner);
        *guard = client;
    }

    /// Get the normalized base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get the transport timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for a relative path, without the query string
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Execute a request and decode the JSON response
    ///
    /// Returns `Ok(None)` for 204 No Content and for empty bodies.
    pub async fn execute<T>(&self, request: RestRequest) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request).await?;
        decode_response(response).await
    }

    /// Execute a request whose response body is not needed
    pub async fn execute_no_content(&self, request: RestRequest) -> Result<()> {
        self.send(request).await?;
        Ok(())
    }

    /// GET `path` with query parameters
    pub async fn get<T>(&self, path: &str, params: QueryParams) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        self.execute(RestRequest::get(path).params(params)).await
    }

    /// POST a JSON body to `path`
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(RestRequest::post(path).json_body(body)?).await
    }

    /// PUT a JSON body to `path`
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(RestRequest::put(path).json_body(body)?).await
    }

    /// POST a JSON body to `path`, ignoring any response body
    pub async fn post_no_content<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute_no_content(RestRequest::post(path).json_body(body)?)
            .await
    }

    /// PUT a JSON body to `path`, ignoring any response body
    pub async fn put_no_content<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute_no_content(RestRequest::put(path).json_body(body)?)
            .await
    }

    /// DELETE `path`
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute_no_content(RestRequest::delete(path)).await
    }

    /// GET a list endpoint and unwrap its `items`
    pub async fn list<T>(&self, path: &str, params: QueryParams) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let response: Option<ItemsResponse<T>> = self.get(path, params).await?;
        Ok(response.map(|r| r.items).unwrap_or_default())
    }

    /// POST a `multipart/form-data` body made of text fields and local files
    ///
    /// Every file is read before the request is built; a file that cannot be
    /// read aborts the call with [`Error::File`] and nothing is sent.
    pub async fn post_multipart<T>(
        &self,
        path: &str,
        fields: Vec<(String, String)>,
        files: Vec<(String, PathBuf)>,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }

        for (field, file_path) in files {
            let data = match tokio::fs::read(&file_path).await {
                Ok(data) => data,
                Err(source) => {
                    return Err(Error::File {
                        field,
                        path: file_path,
                        source,
                    })
                }
            };
            let file_name = file_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| field.clone());
            form = form.part(field, Part::bytes(data).file_name(file_name));
        }

        let url = self.url(path);
        tracing::debug!(method = "POST", path, "sending multipart Webex API request");

        let req = self.authorize(self.http_client().post(&url)).multipart(form);
        let response = self.dispatch(req, path).await?;
        decode_response(response).await
    }

    /// Build and send a JSON request, classifying error statuses
    async fn send(&self, request: RestRequest) -> Result<ReqwestResponse> {
        let url = self.url(&request.path);
        tracing::debug!(
            method = request.method.as_str(),
            path = %request.path,
            "sending Webex API request"
        );

        let mut req = self
            .http_client()
            .request(request.method.to_reqwest(), &url);

        if !request.params.is_empty() {
            req = req.query(&request.params);
        }

        req = self.authorize(req).header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        if let Some(body) = request.body {
            req = req.body(body);
        }

        self.dispatch(req, &request.path).await
    }

    async fn dispatch(&self, req: RequestBuilder, path: &str) -> Result<ReqwestResponse> {
        let response = req.send().await?;
        let status = response.status();
        tracing::debug!(path, status = status.as_u16(), "received Webex API response");

        if status.as_u16() >= 400 {
            return Err(error_from_response(response).await);
        }
        Ok(response)
    }

    /// Attach auth, accept and user-agent headers
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let token = self.access_token();
        req.header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(USER_AGENT, &self.user_agent)
    }

    fn http_client(&self) -> ReqwestClient {
        self.client
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Turn a >= 400 response into an API or rate-limit error
async fn error_from_response(response: ReqwestResponse) -> Error {
    let status = response.status().as_u16();
    let tracking_id = header_string(response.headers(), TRACKING_ID_HEADER);
    let retry_after =
        (status == StatusCode::TOO_MANY_REQUESTS.as_u16()).then(|| retry_after_from_headers(response.headers()));

    let body = response.bytes().await.unwrap_or_default();
    let (message, errors) = parse_error_body(&body);
    let error = ApiError::new(status, message, tracking_id, errors);

    match retry_after {
        Some(retry_after) => {
            tracing::warn!(
                tracking_id = error.tracking_id().unwrap_or_default(),
                retry_after_secs = retry_after.as_secs(),
                "Webex API rate limit exceeded"
            );
            Error::RateLimited(RateLimitError::new(error, retry_after))
        }
        None => Error::Api(error),
    }
}

/// Decode a successful response body
async fn decode_response<T>(response: ReqwestResponse) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body = response.bytes().await?;
    if body.is_empty() {
        return Ok(None);
    }

    serde_json::from_slice(&body)
        .map(Some)
        .map_err(Error::Deserialization)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reqwest::header::HeaderValue;
    use std::collections::BTreeMap;

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new(
            404,
            Some("Room not found".to_string()),
            Some("ROUTER_123".to_string()),
            vec![],
        );
        let display = format!("{}", error);
        assert!(display.contains("status=404"));
        assert!(display.contains("message=Room not found"));
        assert!(display.contains("trackingId=ROUTER_123"));
    }

    #[test]
    fn test_api_error_display_without_optional_fields() {
        let error = ApiError::new(500, None, None, vec![]);
        assert_eq!(error.to_string(), "Webex API error: status=500");
        assert!(error.is_server_error());
        assert!(!error.is_unauthorized());
    }

    #[test]
    fn test_rate_limit_error() {
        let error = RateLimitError::new(
            ApiError::new(429, Some("Too many".to_string()), None, vec![]),
            Duration::from_secs(30),
        );
        assert_eq!(error.status(), 429);
        assert_eq!(error.message(), Some("Too many"));
        assert_eq!(error.retry_after(), Duration::from_secs(30));
        assert!(error.to_string().contains("retry after 30s"));
        assert_eq!(error.api_error().status(), 429);
        assert!(error.api_error().errors().is_empty());
    }

    #[test]
    fn test_retry_after_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after_from_headers(&headers), DEFAULT_RETRY_AFTER);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("30"));
        assert_eq!(retry_after_from_headers(&headers), Duration::from_secs(30));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("soon"));
        assert_eq!(retry_after_from_headers(&headers), Duration::from_secs(60));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("-5"));
        assert_eq!(retry_after_from_headers(&headers), Duration::from_secs(60));
    }

    #[test]
    fn test_query_params_skip_empty_values() {
        let mut params = QueryParams::new();
        params
            .set_str("roomId", "R1")
            .set_str("parentId", "")
            .set_opt("before", None)
            .set_opt("beforeMessage", Some(""))
            .set_flag("current", false)
            .set_max(Some(0))
            .set_max(None);

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("roomId"), Some("R1"));
    }

    #[test]
    fn test_query_params_set_replaces() {
        let mut params = QueryParams::new();
        params.set("max", "10").set("max", "20");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("max"), Some("20"));
    }

    #[test]
    fn test_query_params_time_format() {
        let time = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let mut params = QueryParams::new();
        params.set_time("from", Some(&time)).set_time("to", None);
        assert_eq!(params.get("from"), Some("2024-01-02T03:04:05Z"));
        assert_eq!(params.get("to"), None);
    }

    #[test]
    fn test_query_params_serialize_as_pairs() {
        let mut params = QueryParams::new();
        params.set("a", "1").set("b", "two");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!([["a", "1"], ["b", "two"]]));
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("a", "1"), ("b", "two")]
        );
    }

    #[test]
    fn test_rest_request_json_body() {
        let req = RestRequest::post("messages")
            .json_body(&serde_json::json!({"roomId": "R1", "text": "hi"}))
            .unwrap();

        assert_eq!(req.method, HttpMethod::Post);
        let body = String::from_utf8(req.body.unwrap()).unwrap();
        assert!(body.contains("\"roomId\":\"R1\""));
    }

    #[test]
    fn test_rest_request_param() {
        let req = RestRequest::get("people")
            .param("email", "a@example.com")
            .param("max", "5")
            .param("max", "10");

        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.params.get("email"), Some("a@example.com"));
        assert_eq!(req.params.get("max"), Some("10"));
        assert_eq!(req.params.len(), 2);
    }

    #[test]
    fn test_rest_request_json_body_serialization_error() {
        let mut bad = BTreeMap::new();
        bad.insert((1u8, 2u8), "tuple keys are not valid JSON object keys");

        let result = RestRequest::post("messages").json_body(&bad);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_http_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://localhost:1234"), "http://localhost:1234/");
        assert_eq!(normalize_base_url("http://localhost:1234///"), "http://localhost:1234/");
        assert_eq!(normalize_base_url(""), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_session_config_default() {
        let config = RestSessionConfig::default();
        assert_eq!(config.base_url, "https://webexapis.com/v1/");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.user_agent.starts_with("webex-client/"));
        assert!(config.http_client.is_none());
    }

    #[test]
    fn test_session_config_debug_redacts_token() {
        let config = RestSessionConfig::new("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_session_new() {
        let config = RestSessionConfig::new("token")
            .with_base_url("http://localhost:8080/v1")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("TestAgent/1.0");

        let session = RestSession::new(config).unwrap();
        assert_eq!(session.base_url(), "http://localhost:8080/v1/");
        assert_eq!(session.timeout(), Duration::from_secs(5));
        assert_eq!(session.user_agent(), "TestAgent/1.0");
        assert_eq!(session.url("rooms/abc"), "http://localhost:8080/v1/rooms/abc");
        assert!(!format!("{:?}", session).contains("token\""));
    }

    #[test]
    fn test_session_zero_timeout_uses_default() {
        let session =
            RestSession::new(RestSessionConfig::new("t").with_timeout(Duration::ZERO)).unwrap();
        assert_eq!(session.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_session_token_rotation() {
        let session = RestSession::new(RestSessionConfig::new("first")).unwrap();
        assert_eq!(session.access_token(), "first");

        session.set_access_token("second");
        assert_eq!(session.access_token(), "second");
    }

    #[test]
    fn test_parse_error_body_full() {
        let (message, errors) = parse_error_body(
            br#"{"message": "Room not found", "errors": [{"description": "Room not found"}]}"#,
        );
        assert_eq!(message.as_deref(), Some("Room not found"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].description, "Room not found");
    }

    #[test]
    fn test_parse_error_body_null_fields_keep_message() {
        let (message, errors) =
            parse_error_body(br#"{"message": "Room id is malformed", "errors": null}"#);
        assert_eq!(message.as_deref(), Some("Room id is malformed"));
        assert!(errors.is_empty());

        let (message, errors) = parse_error_body(
            br#"{"message": "Room id is malformed", "errors": [{"description": null}]}"#,
        );
        assert_eq!(message.as_deref(), Some("Room id is malformed"));
        assert_eq!(errors, vec![ErrorDetail::default()]);
    }

    #[test]
    fn test_parse_error_body_unusable() {
        assert_eq!(parse_error_body(b""), (None, vec![]));
        assert_eq!(parse_error_body(b"<html>oops</html>"), (None, vec![]));
        assert_eq!(parse_error_body(br#"{"message": "", "errors": "x"}"#), (None, vec![]));
    }

    #[test]
    fn test_items_response_defaults_to_empty() {
        let parsed: ItemsResponse<serde_json::Value> = serde_json::from_str("{}").unwrap();
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_require() {
        assert!(require("roomId", "R1").is_ok());
        assert!(matches!(require("roomId", ""), Err(Error::InvalidParameter(f)) if f == "roomId"));
    }
}
