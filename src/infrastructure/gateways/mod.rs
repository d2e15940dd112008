// Gateway implementations
// Adapters that implement domain gateway interfaces

pub mod http_chatbot_gateway;

pub use http_chatbot_gateway::HttpChatbotGateway;
