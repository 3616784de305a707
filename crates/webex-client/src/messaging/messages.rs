//! Messages: post, read, edit and delete room and direct messages

use crate::rest::{is_set, require, QueryParams, RestSession};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A message posted to a room or a 1:1 conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message ID
    #[serde(default)]
    pub id: String,

    /// Room the message was posted in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,

    /// "direct" or "group"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,

    /// Parent message for threaded replies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Recipient person ID for 1:1 messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_person_id: Option<String>,

    /// Recipient email for 1:1 messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_person_email: Option<String>,

    /// Plain text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Markdown content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,

    /// URLs of attached files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Author's person ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,

    /// Author's email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_email: Option<String>,

    /// People mentioned in the message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentioned_people: Vec<String>,

    /// Groups mentioned in the message (e.g. "all")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentioned_groups: Vec<String>,

    /// Card attachments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    /// Last edit time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    /// Whether the message is a voice clip
    #[serde(default)]
    pub is_voice_clip: bool,
}

/// Rich content attached to a message, such as an adaptive card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Content type, e.g. "application/vnd.microsoft.card.adaptive"
    pub content_type: String,

    /// Arbitrary JSON content
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Attachment {
    /// Adaptive card attachment
    pub fn adaptive_card(content: serde_json::Value) -> Self {
        Self {
            content_type: "application/vnd.microsoft.card.adaptive".to_string(),
            content,
        }
    }
}

/// Filters for [`MessagesService::list`]
#[derive(Debug, Clone, Default)]
pub struct MessageListOptions {
    /// Room to list messages from (required)
    pub room_id: String,
    /// Only replies to this parent message
    pub parent_id: Option<String>,
    /// Only messages mentioning this person ("me" or a person ID)
    pub mentioned_people: Option<String>,
    /// Only messages sent before this ISO 8601 time
    pub before: Option<String>,
    /// Only messages sent before this message ID
    pub before_message: Option<String>,
    /// Maximum number of messages
    pub max: Option<u32>,
}

impl MessageListOptions {
    /// List messages in a room
    pub fn new(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            ..Default::default()
        }
    }

    /// Limit the number of results
    pub fn with_max(mut self, max: u32) -> Self {
        self.max = Some(max);
        self
    }

    /// Only replies to a parent message
    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set("roomId", self.room_id.as_str())
            .set_opt("parentId", self.parent_id.as_deref())
            .set_opt("mentionedPeople", self.mentioned_people.as_deref())
            .set_opt("before", self.before.as_deref())
            .set_opt("beforeMessage", self.before_message.as_deref())
            .set_max(self.max);
        params
    }
}

/// Filters for [`MessagesService::list_direct`]
#[derive(Debug, Clone, Default)]
pub struct MessageDirectListOptions {
    /// Other participant's person ID
    pub person_id: Option<String>,
    /// Other participant's email
    pub person_email: Option<String>,
    /// Only replies to this parent message
    pub parent_id: Option<String>,
}

impl MessageDirectListOptions {
    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set_opt("personId", self.person_id.as_deref())
            .set_opt("personEmail", self.person_email.as_deref())
            .set_opt("parentId", self.parent_id.as_deref());
        params
    }
}

/// Body for [`MessagesService::create`]
///
/// A destination (room, person ID or person email) and some content (text,
/// markdown, files or attachments) are both required.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreateRequest {
    /// Destination room
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,

    /// Destination person ID (1:1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_person_id: Option<String>,

    /// Destination person email (1:1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_person_email: Option<String>,

    /// Plain text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Markdown content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,

    /// Public URLs of files to attach
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Card attachments
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    /// Parent message for a threaded reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl MessageCreateRequest {
    /// Message to a room
    pub fn to_room(room_id: impl Into<String>) -> Self {
        Self {
            room_id: Some(room_id.into()),
            ..Default::default()
        }
    }

    /// Direct message by person ID
    pub fn to_person(person_id: impl Into<String>) -> Self {
        Self {
            to_person_id: Some(person_id.into()),
            ..Default::default()
        }
    }

    /// Direct message by email
    pub fn to_person_email(email: impl Into<String>) -> Self {
        Self {
            to_person_email: Some(email.into()),
            ..Default::default()
        }
    }

    /// Set plain text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set markdown content
    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }

    /// Attach a file by public URL
    pub fn with_file_url(mut self, url: impl Into<String>) -> Self {
        self.files.push(url.into());
        self
    }

    /// Add a card attachment
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Reply in a thread
    pub fn with_parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    fn has_destination(&self) -> bool {
        is_set(&self.room_id) || is_set(&self.to_person_id) || is_set(&self.to_person_email)
    }

    fn has_content(&self) -> bool {
        is_set(&self.text)
            || is_set(&self.markdown)
            || !self.files.is_empty()
            || !self.attachments.is_empty()
    }

    /// Text fields sent alongside an uploaded file
    fn form_fields(&self) -> Vec<(String, String)> {
        [
            ("roomId", &self.room_id),
            ("toPersonId", &self.to_person_id),
            ("toPersonEmail", &self.to_person_email),
            ("text", &self.text),
            ("markdown", &self.markdown),
            ("parentId", &self.parent_id),
        ]
        .into_iter()
        .filter(|(_, value)| is_set(value))
        .filter_map(|(name, value)| value.clone().map(|v| (name.to_string(), v)))
        .collect()
    }
}

/// Body for [`MessagesService::update`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageUpdateRequest {
    /// Room containing the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,

    /// New plain text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// New markdown content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
}

/// Service for the `messages` resource
#[derive(Debug, Clone)]
pub struct MessagesService {
    session: Arc<RestSession>,
}

impl MessagesService {
    /// Create a messages service bound to a session
    pub fn new(session: Arc<RestSession>) -> Self {
        Self { session }
    }

    /// List messages in a room
    ///
    /// Fails with [`Error::InvalidParameter`] if no room ID is given.
    pub async fn list(&self, options: &MessageListOptions) -> Result<Vec<Message>> {
        require("roomId", &options.room_id)?;
        self.session.list("messages", options.to_params()).await
    }

    /// List messages in a 1:1 conversation
    pub async fn list_direct(&self, options: &MessageDirectListOptions) -> Result<Vec<Message>> {
        self.session
            .list("messages/direct", options.to_params())
            .await
    }

    /// Post a message
    pub async fn create(&self, request: &MessageCreateRequest) -> Result<Message> {
        if !request.has_destination() {
            return Err(Error::invalid("roomId, toPersonId or toPersonEmail"));
        }
        if !request.has_content() {
            return Err(Error::invalid("text, markdown, files or attachments"));
        }

        let message: Option<Message> = self.session.post("messages", request).await?;
        Ok(message.unwrap_or_default())
    }

    /// Post a message with a local file uploaded as `multipart/form-data`
    ///
    /// The file is read before anything is sent; a missing or unreadable file
    /// fails with [`Error::File`]. The upload is the only file a multipart
    /// message can carry, so `files` URLs and `attachments` are rejected.
    pub async fn create_with_file(
        &self,
        request: &MessageCreateRequest,
        file_path: impl AsRef<Path>,
    ) -> Result<Message> {
        if !request.has_destination() {
            return Err(Error::invalid("roomId, toPersonId or toPersonEmail"));
        }
        if !request.files.is_empty() || !request.attachments.is_empty() {
            return Err(Error::invalid("files or attachments with an uploaded file"));
        }

        let files = vec![("files".to_string(), file_path.as_ref().to_path_buf())];
        let message: Option<Message> = self
            .session
            .post_multipart("messages", request.form_fields(), files)
            .await?;
        Ok(message.unwrap_or_default())
    }

    /// Get a message by ID
    pub async fn get(&self, message_id: &str) -> Result<Message> {
        require("messageId", message_id)?;
        let message: Option<Message> = self
            .session
            .get(&format!("messages/{}", message_id), QueryParams::new())
            .await?;
        Ok(message.unwrap_or_default())
    }

    /// Edit a message
    pub async fn update(&self, message_id: &str, request: &MessageUpdateRequest) -> Result<Message> {
        require("messageId", message_id)?;
        let message: Option<Message> = self
            .session
            .put(&format!("messages/{}", message_id), request)
            .await?;
        Ok(message.unwrap_or_default())
    }

    /// Delete a message
    pub async fn delete(&self, message_id: &str) -> Result<()> {
        require("messageId", message_id)?;
        self.session
            .delete(&format!("messages/{}", message_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::RestSessionConfig;

    fn service() -> MessagesService {
        let session = RestSession::new(RestSessionConfig::new("token")).unwrap();
        MessagesService::new(Arc::new(session))
    }

    #[test]
    fn test_create_request_serialization() {
        let request = MessageCreateRequest::to_room("R1").with_text("hi");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"roomId": "R1", "text": "hi"}));
    }

    #[test]
    fn test_create_request_with_card() {
        let request = MessageCreateRequest::to_person_email("a@example.com")
            .with_markdown("**card**")
            .with_attachment(Attachment::adaptive_card(serde_json::json!({"type": "AdaptiveCard"})));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["toPersonEmail"], "a@example.com");
        assert_eq!(
            json["attachments"][0]["contentType"],
            "application/vnd.microsoft.card.adaptive"
        );
    }

    #[test]
    fn test_list_params() {
        let mut options = MessageListOptions::new("R1").with_max(10);
        options.before_message = Some(String::new());
        options.mentioned_people = Some("me".to_string());

        let params = options.to_params();
        assert_eq!(params.get("roomId"), Some("R1"));
        assert_eq!(params.get("mentionedPeople"), Some("me"));
        assert_eq!(params.get("max"), Some("10"));
        assert_eq!(params.get("beforeMessage"), None);
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_direct_params_empty() {
        assert!(MessageDirectListOptions::default().to_params().is_empty());
    }

    #[test]
    fn test_form_fields_skip_empty() {
        let request = MessageCreateRequest::to_room("R1").with_text("");
        assert_eq!(
            request.form_fields(),
            vec![("roomId".to_string(), "R1".to_string())]
        );
    }

    #[test]
    fn test_message_deserialization() {
        let json = r#"{
            "id": "M1",
            "roomId": "R1",
            "roomType": "group",
            "text": "hello",
            "personEmail": "a@example.com",
            "created": "2024-01-01T10:00:00.000Z",
            "mentionedPeople": ["P1"]
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.id, "M1");
        assert_eq!(message.room_type.as_deref(), Some("group"));
        assert_eq!(message.mentioned_people, vec!["P1".to_string()]);
        assert!(message.created.is_some());
        assert!(message.files.is_empty());
    }

    #[tokio::test]
    async fn test_list_requires_room() {
        let result = service().list(&MessageListOptions::default()).await;
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn test_create_requires_destination_and_content() {
        let service = service();

        let no_destination = MessageCreateRequest::default().with_text("hi");
        assert!(service.create(&no_destination).await.unwrap_err().is_invalid_parameter());

        let no_content = MessageCreateRequest::to_room("R1");
        assert!(service.create(&no_content).await.unwrap_err().is_invalid_parameter());
    }

    #[tokio::test]
    async fn test_create_with_file_rejects_urls_and_cards() {
        let service = service();

        let with_url = MessageCreateRequest::to_room("R1").with_file_url("https://example.com/a.png");
        let err = service.create_with_file(&with_url, "a.png").await.unwrap_err();
        assert!(err.is_invalid_parameter());

        let with_card = MessageCreateRequest::to_room("R1")
            .with_attachment(Attachment::adaptive_card(serde_json::json!({"type": "AdaptiveCard"})));
        let err = service.create_with_file(&with_card, "a.png").await.unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[tokio::test]
    async fn test_empty_id_rejected() {
        let service = service();
        assert!(service.get("").await.unwrap_err().is_invalid_parameter());
        assert!(service.delete("").await.unwrap_err().is_invalid_parameter());
        assert!(service
            .update("", &MessageUpdateRequest::default())
            .await
            .unwrap_err()
            .is_invalid_parameter());
    }
}
