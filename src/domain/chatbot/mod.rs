// Chatbot domain module
// Contains the user message value object, the backend reply model, and relay errors

pub mod errors;
pub mod reply;
pub mod value_objects;

// Re-export main types for convenience
pub use errors::{ChatbotError, ChatbotResult};
pub use reply::{BotReply, ReplyKind, UpstreamReply};
pub use value_objects::UserMessage;
