// Request extractors and HTTP layers shared by the chat routes

pub mod chat_request;
pub mod cors;

pub use chat_request::ChatRequest;
pub use cors::cors_layer;
