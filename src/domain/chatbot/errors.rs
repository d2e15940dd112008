use thiserror::Error;

/// Errors that can occur while relaying a message to the chatbot backend
#[derive(Debug, Error)]
pub enum ChatbotError {
    #[error("Chatbot backend unreachable: {0}")]
    Unreachable(String),

    #[error("Chatbot backend returned HTTP {status}")]
    UpstreamStatus {
        status: u16,
        body: serde_json::Value,
    },

    #[error("Chatbot backend returned an invalid reply: {0}")]
    InvalidReply(String),
}

pub type ChatbotResult<T> = Result<T, ChatbotError>;
