// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of HTTP and transport concerns

pub mod chatbot;
pub mod gateways;
