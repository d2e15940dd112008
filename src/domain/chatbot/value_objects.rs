use serde::Serialize;
use std::fmt;

/// Message typed by the user, ready to be forwarded to the chatbot backend
///
/// # Invariants
/// - Leading and trailing whitespace is trimmed on construction
/// - Is never empty after trimming
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserMessage(String);

impl UserMessage {
    /// Creates a new UserMessage value object
    ///
    /// # Arguments
    /// * `message` - The raw message text from the request body
    ///
    /// # Returns
    /// * `Ok(UserMessage)` - If the trimmed message is non-empty
    /// * `Err(String)` - If the message is empty or whitespace only
    ///
    /// # Example
    /// ```
    /// use chatbot_relay::domain::chatbot::UserMessage;
    ///
    /// let message = UserMessage::new("  resep nasi goreng ").expect("valid message");
    /// assert_eq!(message.as_str(), "resep nasi goreng");
    /// ```
    pub fn new(message: impl AsRef<str>) -> Result<Self, String> {
        let trimmed = message.as_ref().trim();
        if trimmed.is_empty() {
            Err("Message must not be empty".to_string())
        } else {
            Ok(UserMessage(trimmed.to_string()))
        }
    }

    /// Returns the message as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
