use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Successful (2xx) response from the chatbot backend
///
/// The body is kept as raw JSON so it can be echoed back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    /// Interprets the raw body as a chatbot reply
    pub fn bot_reply(&self) -> BotReply {
        BotReply::from_json(&self.body)
    }
}

/// Kind of answer produced by the chatbot backend
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplyKind {
    /// Plain conversational text
    #[default]
    Text,
    /// The client should navigate to `url`
    Redirect,
    /// Any other value the backend sends, kept verbatim
    Other(String),
}

impl ReplyKind {
    pub fn parse(kind: &str) -> Self {
        match kind {
            "text" => ReplyKind::Text,
            "redirect" => ReplyKind::Redirect,
            other => ReplyKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReplyKind::Text => "text",
            ReplyKind::Redirect => "redirect",
            ReplyKind::Other(other) => other,
        }
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReplyKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Reply fields the relay understands
///
/// Every field is optional. A field holding a non-string value is treated
/// as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BotReply {
    pub message: Option<String>,
    pub url: Option<String>,
    pub kind: Option<ReplyKind>,
}

impl BotReply {
    /// Extracts the known fields from a backend JSON body
    pub fn from_json(body: &Value) -> Self {
        let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            message: field("message"),
            url: field("url"),
            kind: field("type").map(|kind| ReplyKind::parse(&kind)),
        }
    }

    /// Reply kind, defaulting to text when the backend omitted it
    pub fn kind_or_default(&self) -> ReplyKind {
        self.kind.clone().unwrap_or_default()
    }
}
