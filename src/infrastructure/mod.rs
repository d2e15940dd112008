// Infrastructure layer module
// Contains adapters for external services
// Follows Hexagonal Architecture

pub mod gateways;
