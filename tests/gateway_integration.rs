//! Integration tests for the HTTP chatbot gateway
//!
//! These tests run the gateway against a throwaway chatbot backend bound to
//! an ephemeral local port, covering successful replies, upstream error
//! statuses, unusable bodies, timeouts and unreachable hosts.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::post,
    Json, Router,
};
use chatbot_relay::api::{router, AppState};
use chatbot_relay::domain::chatbot::{ChatbotError, UserMessage};
use chatbot_relay::domain::gateways::ChatbotGateway;
use chatbot_relay::infrastructure::gateways::HttpChatbotGateway;
use reqwest::Url;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot

/// Echoes the received message the way the real backend answers small talk
async fn echo_chat(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "type": "text",
        "message": format!("echo: {}", body["message"].as_str().unwrap_or_default())
    }))
}

async fn redirect_chat() -> Json<Value> {
    Json(json!({
        "type": "redirect",
        "message": "Menampilkan semua resep...",
        "url": "http://localhost:8000/resepcari"
    }))
}

async fn unavailable_chat() -> (StatusCode, Json<Value>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": "model not loaded" })),
    )
}

async fn crashing_chat() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

async fn html_chat() -> &'static str {
    "<html>not json</html>"
}

async fn array_chat() -> Json<Value> {
    Json(json!([1, 2]))
}

async fn scalar_chat() -> Json<Value> {
    Json(json!("ok"))
}

async fn large_chat() -> Json<Value> {
    Json(json!({ "type": "text", "message": "a".repeat(4096) }))
}

async fn slow_chat() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(json!({ "message": "too late" }))
}

/// Start a fake chatbot backend and return its address
async fn spawn_backend() -> SocketAddr {
    let app = Router::new()
        .route("/echo/chat", post(echo_chat))
        .route("/redirect/chat", post(redirect_chat))
        .route("/unavailable/chat", post(unavailable_chat))
        .route("/crash/chat", post(crashing_chat))
        .route("/html/chat", post(html_chat))
        .route("/array/chat", post(array_chat))
        .route("/scalar/chat", post(scalar_chat))
        .route("/large/chat", post(large_chat))
        .route("/slow/chat", post(slow_chat));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind backend");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Address nothing is listening on
async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn gateway_for(addr: SocketAddr, prefix: &str) -> HttpChatbotGateway {
    let endpoint = Url::parse(&format!("http://{}/{}/chat", addr, prefix)).unwrap();
    HttpChatbotGateway::new(
        endpoint,
        Duration::from_millis(500),
        Duration::from_millis(500),
    )
    .expect("Failed to build gateway")
}

fn message(text: &str) -> UserMessage {
    UserMessage::new(text).unwrap()
}

#[tokio::test]
async fn test_successful_reply() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "echo");

    let reply = gateway.send(&message("halo")).await.unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(
        reply.body,
        json!({ "type": "text", "message": "echo: halo" })
    );
}

#[tokio::test]
async fn test_redirect_reply_fields() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "redirect");

    let reply = gateway.send(&message("resep")).await.unwrap().bot_reply();

    assert_eq!(reply.url.as_deref(), Some("http://localhost:8000/resepcari"));
    assert_eq!(reply.kind_or_default().as_str(), "redirect");
}

#[tokio::test]
async fn test_error_status_keeps_json_body() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "unavailable");

    match gateway.send(&message("halo")).await {
        Err(ChatbotError::UpstreamStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, json!({ "error": "model not loaded" }));
        }
        other => panic!("expected upstream status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_keeps_text_body() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "crash");

    match gateway.send(&message("halo")).await {
        Err(ChatbotError::UpstreamStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, json!("Internal Server Error"));
        }
        other => panic!("expected upstream status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_route_is_upstream_404() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "missing");

    match gateway.send(&message("halo")).await {
        Err(ChatbotError::UpstreamStatus { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, Value::Null);
        }
        other => panic!("expected upstream status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_success_is_invalid_reply() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "html");

    assert!(matches!(
        gateway.send(&message("halo")).await,
        Err(ChatbotError::InvalidReply(_))
    ));
}

#[tokio::test]
async fn test_json_array_success_is_invalid_reply() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "array");

    match gateway.send(&message("halo")).await {
        Err(ChatbotError::InvalidReply(reason)) => {
            assert_eq!(reason, "Body is not a JSON object");
        }
        other => panic!("expected invalid reply, got {:?}", other),
    }
}

#[tokio::test]
async fn test_json_scalar_success_is_invalid_reply() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "scalar");

    assert!(matches!(
        gateway.send(&message("halo")).await,
        Err(ChatbotError::InvalidReply(_))
    ));
}

#[tokio::test]
async fn test_oversized_reply_is_refused() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "large").with_max_reply_bytes(1024);

    match gateway.send(&message("halo")).await {
        Err(ChatbotError::InvalidReply(reason)) => {
            assert_eq!(reason, "Reply exceeds 1024 bytes");
        }
        other => panic!("expected invalid reply, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reply_within_limit_is_read() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "large").with_max_reply_bytes(8192);

    let reply = gateway.send(&message("halo")).await.unwrap().bot_reply();
    assert_eq!(reply.message.map(|m| m.len()), Some(4096));
}

#[tokio::test]
async fn test_timeout_is_unreachable() {
    let addr = spawn_backend().await;
    let gateway = gateway_for(addr, "slow");

    assert!(matches!(
        gateway.send(&message("halo")).await,
        Err(ChatbotError::Unreachable(_))
    ));
}

#[tokio::test]
async fn test_closed_port_is_unreachable() {
    let addr = closed_addr().await;
    let gateway = gateway_for(addr, "echo");

    match gateway.send(&message("halo")).await {
        Err(ChatbotError::Unreachable(reason)) => assert!(!reason.is_empty()),
        other => panic!("expected unreachable error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_router_relays_through_real_gateway() {
    let addr = spawn_backend().await;
    let state = AppState::new(Arc::new(gateway_for(addr, "echo")), "fallback");
    let app = router(state, &["http://localhost:5173".to_string()]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chatbot")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"message":" apa kabar "}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["user_message"], "apa kabar");
    assert_eq!(json["bot_response"], "echo: apa kabar");
    assert_eq!(json["type"], "text");
}

#[tokio::test]
async fn test_router_reports_unreachable_backend() {
    let addr = closed_addr().await;
    let state = AppState::new(Arc::new(gateway_for(addr, "echo")), "fallback");
    let app = router(state, &["http://localhost:5173".to_string()]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"message":"halo"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "error");
    assert!(!json["error"].as_str().unwrap().is_empty());
}
