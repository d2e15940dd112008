use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::domain::chatbot::UserMessage;

const MESSAGE_REQUIRED: &str = "The message field is required.";
const MESSAGE_NOT_STRING: &str = "The message field must be a string.";

/// Validated `{"message": string}` request body
///
/// Usage:
/// ```rust,ignore
/// async fn handler(ChatRequest(message): ChatRequest) -> String {
///     message.to_string()
/// }
/// ```
#[derive(Debug)]
pub struct ChatRequest(pub UserMessage);

#[async_trait]
impl<S> FromRequest<S> for ChatRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Missing content type and malformed JSON are not validation failures
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        message_from_body(&body).map(ChatRequest)
    }
}

/// Applies the `required|string` rule to the `message` field
fn message_from_body(body: &Value) -> Result<UserMessage, ApiError> {
    match body.get("message") {
        None | Some(Value::Null) => Err(ApiError::validation("message", MESSAGE_REQUIRED)),
        Some(Value::Array(items)) if items.is_empty() => {
            Err(ApiError::validation("message", MESSAGE_REQUIRED))
        }
        Some(Value::String(text)) => UserMessage::new(text)
            .map_err(|_| ApiError::validation("message", MESSAGE_REQUIRED)),
        Some(_) => Err(ApiError::validation("message", MESSAGE_NOT_STRING)),
    }
}
