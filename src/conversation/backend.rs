//! Chat backend client
//!
//! Sends the user's message to the assistant service and parses its reply.

use std::future::Future;

use serde_json::json;
use thiserror::Error;

use super::types::BotReply;

/// Errors that can occur while talking to the chat backend
#[derive(Debug, Error)]
pub enum ChatError {
    /// Backend endpoint missing from config
    #[error("Chat backend not configured: {0}")]
    NotConfigured(String),

    /// Network error during the request
    #[error("Network error: {0}")]
    Network(String),

    /// Backend returned an error status
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Reply body was not the expected JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// No reply within the configured time
    #[error("No reply after {0} seconds")]
    Timeout(u64),
}

/// Something that can answer a chat message
///
/// `Ok(None)` means the backend answered but had nothing to say.
pub trait ChatBackend: Send + Sync + 'static {
    fn ask_bot(
        &self,
        message: &str,
    ) -> impl Future<Output = Result<Option<BotReply>, ChatError>> + Send;
}

/// HTTP chat backend: POSTs `{"message": ...}` and expects a JSON reply
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ChatError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ChatError::NotConfigured(
                "Missing or empty endpoint in [chat] config".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ChatError::Network(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatBackend for HttpChatBackend {
    async fn ask_bot(&self, message: &str) -> Result<Option<BotReply>, ChatError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "message": message }))
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ChatError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        parse_reply(&body)
    }
}

/// Parse a reply body
///
/// Accepts the reply object directly or wrapped in `{"data": ...}`. A
/// `null` body (or `null` data) means there is no reply.
pub fn parse_reply(body: &str) -> Result<Option<BotReply>, ChatError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ChatError::Parse(e.to_string()))?;

    let payload = if value.get("text").is_none() {
        value.get("data").cloned().unwrap_or(value)
    } else {
        value
    };
    if payload.is_null() {
        return Ok(None);
    }

    serde_json::from_value(payload)
        .map(Some)
        .map_err(|e| ChatError::Parse(e.to_string()))
}
