use std::process::ExitCode;
use std::sync::Arc;

use chatbot_relay::api::{self, AppState};
use chatbot_relay::config::RelayConfig;
use chatbot_relay::infrastructure::gateways::HttpChatbotGateway;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let gateway = match HttpChatbotGateway::from_config(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!("Failed to build chatbot client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Relaying chat messages to {}", gateway.endpoint());

    let state = AppState::new(Arc::new(gateway), config.fallback_reply.as_str());
    let app = api::router(state, &config.allowed_origins);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server failed: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
