// Gateway interfaces (ports) for external collaborators
// Implementations live in the infrastructure layer

pub mod chatbot_gateway;

pub use chatbot_gateway::ChatbotGateway;
