use async_trait::async_trait;

use crate::domain::chatbot::{ChatbotResult, UpstreamReply, UserMessage};

/// Port to the conversational backend
#[async_trait]
pub trait ChatbotGateway: Send + Sync {
    /// Forward a user message and return the backend's successful reply
    ///
    /// Non-2xx answers, transport failures and unusable bodies are returned
    /// as `ChatbotError`.
    async fn send(&self, message: &UserMessage) -> ChatbotResult<UpstreamReply>;
}
