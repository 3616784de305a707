//! Webhooks: HTTP callbacks for resource events

use crate::rest::{require, QueryParams, RestSession};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A registered webhook
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Unique webhook ID
    #[serde(default)]
    pub id: String,
    /// Webhook name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Callback URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    /// Watched resource, e.g. "messages"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Watched event, e.g. "created"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Owning organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Creator's person ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Integration that created the webhook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// "creator" or "org"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
    /// Event filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Payload signing secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// "active" or "inactive"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

/// Body for [`WebhooksService::create`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreateRequest {
    /// Webhook name
    pub name: String,
    /// Callback URL
    pub target_url: String,
    /// Watched resource
    pub resource: String,
    /// Watched event
    pub event: String,
    /// Event filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Payload signing secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// "creator" or "org"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
}

impl WebhookCreateRequest {
    /// Request with the four required fields
    pub fn new(
        name: impl Into<String>,
        target_url: impl Into<String>,
        resource: impl Into<String>,
        event: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target_url: target_url.into(),
            resource: resource.into(),
            event: event.into(),
            ..Default::default()
        }
    }

    /// Restrict events with a filter such as `roomId=...`
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sign payloads with a secret
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Body for [`WebhooksService::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookUpdateRequest {
    /// Webhook name
    pub name: String,
    /// Callback URL
    pub target_url: String,
    /// Payload signing secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// "creator" or "org"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
    /// "active" to reactivate a disabled webhook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl WebhookUpdateRequest {
    /// Request with the two required fields
    pub fn new(name: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_url: target_url.into(),
            ..Default::default()
        }
    }
}

/// Service for the `webhooks` resource
#[derive(Debug, Clone)]
pub struct WebhooksService {
    session: Arc<RestSession>,
}

impl WebhooksService {
    /// Create a webhooks service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List webhooks
    pub async fn list(&self, max: Option<u32>) -> Result<Vec<Webhook>> {
        let mut params = QueryParams::new();
        params.set_max(max);
        self.session.list("webhooks", params).await
    }

    /// Register a webhook
    pub async fn create(&self, request: &WebhookCreateRequest) -> Result<Webhook> {
        require("name", &request.name)?;
        require("targetUrl", &request.target_url)?;
        require("resource", &request.resource)?;
        require("event", &request.event)?;
        let webhook: Option<Webhook> = self.session.post("webhooks", request).await?;
        Ok(webhook.unwrap_or_default())
    }

    /// Get a webhook by ID
    pub async fn get(&self, webhook_id: &str) -> Result<Webhook> {
        require("webhookId", webhook_id)?;
        let webhook: Option<Webhook> = self
            .session
            .get(&format!("webhooks/{}", webhook_id), QueryParams::new())
            .await?;
        Ok(webhook.unwrap_or_default())
    }

    /// Update a webhook
    pub async fn update(&self, webhook_id: &str, request: &WebhookUpdateRequest) -> Result<Webhook> {
        require("webhookId", webhook_id)?;
        require("name", &request.name)?;
        require("targetUrl", &request.target_url)?;
        let webhook: Option<Webhook> = self
            .session
            .put(&format!("webhooks/{}", webhook_id), request)
            .await?;
        Ok(webhook.unwrap_or_default())
    }

    /// Delete a webhook
    pub async fn delete(&self, webhook_id: &str) -> Result<()> {
        require("webhookId", webhook_id)?;
        self.session
            .delete(&format!("webhooks/{}", webhook_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::RestSessionConfig;

    #[test]
    fn test_create_request_serialization() {
        let request = WebhookCreateRequest::new("hook", "https://example.com/hook", "messages", "created")
            .with_filter("roomId=R1");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "hook",
                "targetUrl": "https://example.com/hook",
                "resource": "messages",
                "event": "created",
                "filter": "roomId=R1"
            })
        );
    }

    #[tokio::test]
    async fn test_validation() {
        let service = WebhooksService::new(Arc::new(
            RestSession::new(RestSessionConfig::new("token")).unwrap(),
        ));

        let missing_event = WebhookCreateRequest::new("hook", "https://example.com", "messages", "");
        assert!(service.create(&missing_event).await.unwrap_err().is_invalid_parameter());

        let missing_url = WebhookUpdateRequest::new("hook", "");
        assert!(service.update("W1", &missing_url).await.unwrap_err().is_invalid_parameter());

        assert!(service.get("").await.unwrap_err().is_invalid_parameter());
        assert!(service.delete("").await.unwrap_err().is_invalid_parameter());
    }
}
