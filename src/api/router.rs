use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{chat, health};
use crate::api::middleware::cors_layer;
use crate::api::state::AppState;

/// Builds the Axum router with all routes, middleware and shared state
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Chat routes
        .route("/api/chatbot", post(chat::send_message))
        .route("/api/chat", post(chat::relay_message))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        // Shared state
        .with_state(state)
}
