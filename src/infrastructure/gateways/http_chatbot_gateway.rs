use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::{json, Value};

use crate::config::RelayConfig;
use crate::domain::chatbot::{ChatbotError, ChatbotResult, UpstreamReply, UserMessage};
use crate::domain::gateways::ChatbotGateway;

/// Largest reply body read from the backend
pub const DEFAULT_MAX_REPLY_BYTES: usize = 1024 * 1024;

/// HTTP implementation of ChatbotGateway
///
/// POSTs `{"message": ...}` as JSON to the backend chat endpoint.
#[derive(Debug, Clone)]
pub struct HttpChatbotGateway {
    client: Client,
    endpoint: Url,
    max_reply_bytes: usize,
}

impl HttpChatbotGateway {
    /// Creates a gateway with explicit timeouts
    pub fn new(
        endpoint: Url,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            max_reply_bytes: DEFAULT_MAX_REPLY_BYTES,
        })
    }

    /// Overrides the reply body size limit
    pub fn with_max_reply_bytes(mut self, max_reply_bytes: usize) -> Self {
        self.max_reply_bytes = max_reply_bytes;
        self
    }

    /// Creates a gateway from relay configuration
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            config.chatbot_endpoint.clone(),
            config.request_timeout,
            config.connect_timeout,
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Reads the reply body, refusing anything over `limit` bytes
async fn read_capped(mut response: Response, limit: usize) -> ChatbotResult<String> {
    let too_large = || ChatbotError::InvalidReply(format!("Reply exceeds {} bytes", limit));

    if response.content_length().is_some_and(|len| len > limit as u64) {
        return Err(too_large());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| ChatbotError::Unreachable(format!("Failed to read reply body: {}", e)))?
    {
        if body.len() + chunk.len() > limit {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Parses an error body as JSON, falling back to the raw text
fn error_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait]
impl ChatbotGateway for HttpChatbotGateway {
    async fn send(&self, message: &UserMessage) -> ChatbotResult<UpstreamReply> {
        let started = Instant::now();

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "message": message.as_str() }))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Chatbot request failed: {}",
                    e
                );
                ChatbotError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        let text = read_capped(response, self.max_reply_bytes).await.map_err(|e| {
            tracing::warn!(endpoint = %self.endpoint, status = status.as_u16(), "{}", e);
            e
        })?;

        tracing::info!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Chatbot replied"
        );

        if !status.is_success() {
            return Err(ChatbotError::UpstreamStatus {
                status: status.as_u16(),
                body: error_body(text),
            });
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| ChatbotError::InvalidReply(format!("Body is not JSON: {}", e)))?;

        if !body.is_object() {
            return Err(ChatbotError::InvalidReply(
                "Body is not a JSON object".to_string(),
            ));
        }

        Ok(UpstreamReply {
            status: status.as_u16(),
            body,
        })
    }
}
