use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::domain::chatbot::ChatbotError;

/// Shape of the JSON body rendered for an error
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetails {
    /// `{"error": message}`
    Plain,
    /// `{"message": message, "errors": {field: [message]}}`
    Validation { field: &'static str },
    /// `{"status": "error", "message": message, "error": detail}`
    Upstream(Value),
}

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: ErrorDetails,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: ErrorDetails::Plain,
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 422 Unprocessable Entity error for a single request field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
            details: ErrorDetails::Validation { field },
        }
    }

    /// Creates an error describing a failed chatbot call
    pub fn upstream(status: StatusCode, message: impl Into<String>, error: Value) -> Self {
        Self {
            status,
            message: message.into(),
            details: ErrorDetails::Upstream(error),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            ErrorDetails::Plain => json!({
                "error": self.message
            }),
            ErrorDetails::Validation { field } => json!({
                "message": self.message,
                "errors": { field: [self.message] }
            }),
            ErrorDetails::Upstream(error) => json!({
                "status": "error",
                "message": self.message,
                "error": error
            }),
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<ChatbotError> for ApiError {
    fn from(err: ChatbotError) -> Self {
        match err {
            ChatbotError::Unreachable(reason) => Self::upstream(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to reach chatbot service",
                Value::String(reason),
            ),
            ChatbotError::UpstreamStatus { status, body } => Self::upstream(
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                "Chatbot service returned an error",
                body,
            ),
            ChatbotError::InvalidReply(reason) => Self::upstream(
                StatusCode::BAD_GATEWAY,
                "Chatbot service returned an invalid reply",
                Value::String(reason),
            ),
        }
    }
}
