use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::ChatRequest;
use crate::api::state::AppState;
use crate::domain::chatbot::{BotReply, ChatbotError, ReplyKind};

/// Response from `POST /api/chatbot`
#[derive(Debug, Serialize)]
pub struct ChatbotReplyResponse {
    pub user_message: String,
    pub bot_response: String,
    pub redirect_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: ReplyKind,
}

impl ChatbotReplyResponse {
    fn from_reply(user_message: String, reply: BotReply, fallback_reply: &str) -> Self {
        let kind = reply.kind_or_default();
        Self {
            user_message,
            bot_response: reply
                .message
                .unwrap_or_else(|| fallback_reply.to_string()),
            redirect_url: reply.url,
            kind,
        }
    }
}

/// Successful response from `POST /api/chat`
#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub status: &'static str,
    pub data: Value,
}

/// Send a message and reshape the bot's answer for the web client
///
/// POST /api/chatbot
pub async fn send_message(
    State(state): State<AppState>,
    ChatRequest(message): ChatRequest,
) -> Result<Json<ChatbotReplyResponse>, ApiError> {
    let correlation_id = Uuid::new_v4();
    tracing::info!(%correlation_id, "Relaying chatbot message");

    let reply = match state.gateway.send(&message).await {
        Ok(upstream) => upstream.bot_reply(),
        // An unusable 2xx body is answered with the default reply
        Err(ChatbotError::InvalidReply(reason)) => {
            tracing::warn!(%correlation_id, "Chatbot reply ignored: {}", reason);
            BotReply::default()
        }
        Err(e) => {
            tracing::error!(%correlation_id, "Chatbot relay failed: {}", e);
            return Err(e.into());
        }
    };

    Ok(Json(ChatbotReplyResponse::from_reply(
        message.to_string(),
        reply,
        &state.fallback_reply,
    )))
}

/// Send a message and return the bot's answer unchanged
///
/// POST /api/chat
pub async fn relay_message(
    State(state): State<AppState>,
    ChatRequest(message): ChatRequest,
) -> Result<(StatusCode, Json<RelayResponse>), ApiError> {
    let correlation_id = Uuid::new_v4();
    tracing::info!(%correlation_id, "Relaying chat message");

    let upstream = state.gateway.send(&message).await.map_err(|e| {
        tracing::error!(%correlation_id, "Chat relay failed: {}", e);
        ApiError::from(e)
    })?;

    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::OK);

    Ok((
        status,
        Json(RelayResponse {
            status: "success",
            data: upstream.body,
        }),
    ))
}
