use std::sync::Arc;

use crate::domain::gateways::ChatbotGateway;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Backend the chat routes relay to
    pub gateway: Arc<dyn ChatbotGateway>,
    /// Bot response used when the backend reply carries no message
    pub fallback_reply: Arc<str>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ChatbotGateway>, fallback_reply: impl Into<Arc<str>>) -> Self {
        Self {
            gateway,
            fallback_reply: fallback_reply.into(),
        }
    }
}
