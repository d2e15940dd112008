//! Relay configuration.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderValue;
use reqwest::Url;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CHATBOT_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://127.0.0.1:5173,http://localhost:5173";
pub const DEFAULT_FALLBACK_REPLY: &str = "Maaf, chatbot tidak merespons.";

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("CORS_ALLOWED_ORIGINS must list at least one origin")]
    NoAllowedOrigins,
}

/// Configuration for the relay server
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Address to bind the HTTP listener
    pub bind_addr: SocketAddr,
    /// Full URL of the backend chat endpoint (`<base>/chat`)
    pub chatbot_endpoint: Url,
    /// Total time allowed for one backend call
    pub request_timeout: Duration,
    /// Time allowed to establish the backend connection
    pub connect_timeout: Duration,
    /// Browser origins allowed by CORS
    pub allowed_origins: Vec<String>,
    /// Bot response used when the backend reply carries no message
    pub fallback_reply: String,
}

impl RelayConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                       | Default                                        |
    /// |--------------------------------|------------------------------------------------|
    /// | `BIND_ADDR`                    | `0.0.0.0:3000`                                 |
    /// | `CHATBOT_URL`                  | `http://127.0.0.1:5000`                        |
    /// | `CHATBOT_TIMEOUT_SECS`         | `30`                                           |
    /// | `CHATBOT_CONNECT_TIMEOUT_SECS` | `10`                                           |
    /// | `CORS_ALLOWED_ORIGINS`         | `http://127.0.0.1:5173,http://localhost:5173`  |
    /// | `CHATBOT_FALLBACK_REPLY`       | `Maaf, chatbot tidak merespons.`               |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RelayConfig::from_env`] over an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "BIND_ADDR",
                reason: format!("{} ({})", e, bind_addr),
            })?;

        let chatbot_url = lookup("CHATBOT_URL").unwrap_or_else(|| {
            tracing::warn!("CHATBOT_URL not set, using default {}", DEFAULT_CHATBOT_URL);
            DEFAULT_CHATBOT_URL.to_string()
        });
        let chatbot_endpoint = chat_endpoint(&chatbot_url)?;

        let request_timeout =
            parse_secs(&lookup, "CHATBOT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let connect_timeout = parse_secs(
            &lookup,
            "CHATBOT_CONNECT_TIMEOUT_SECS",
            DEFAULT_CONNECT_TIMEOUT_SECS,
        )?;

        let allowed_origins = parse_origins(
            &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
        )?;

        let fallback_reply = lookup("CHATBOT_FALLBACK_REPLY")
            .filter(|reply| !reply.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FALLBACK_REPLY.to_string());

        Ok(Self {
            bind_addr,
            chatbot_endpoint,
            request_timeout,
            connect_timeout,
            allowed_origins,
            fallback_reply,
        })
    }
}

/// Builds `<base>/chat` from the configured backend base URL
fn chat_endpoint(base: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: "CHATBOT_URL",
        reason,
    };

    let url = Url::parse(&format!("{}/chat", base.trim().trim_end_matches('/')))
        .map_err(|e| invalid(format!("{} ({})", e, base)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }

    Ok(url)
}

fn parse_secs<F>(lookup: &F, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        tracing::debug!("{} not set, using default {}s", key, default);
        return Ok(Duration::from_secs(default));
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            key,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::InvalidValue {
            key,
            reason: format!("{} ({})", e, raw),
        }),
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(|origin| validate_origin(origin).map(|()| origin.to_string()))
        .collect::<Result<_, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::NoAllowedOrigins);
    }

    Ok(origins)
}

/// An origin must be a bare `scheme://host[:port]` usable as a header value
fn validate_origin(origin: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: "CORS_ALLOWED_ORIGINS",
        reason,
    };

    if origin == "*" {
        return Err(invalid(
            "wildcard origin cannot be combined with credentials".to_string(),
        ));
    }

    HeaderValue::from_str(origin)
        .map_err(|_| invalid(format!("{} is not a valid header value", origin)))?;

    let url = Url::parse(origin).map_err(|e| invalid(format!("{} ({})", e, origin)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme in {}", origin)));
    }
    if url.host_str().is_none()
        || url.path() != "/"
        || url.query().is_some()
        || url.fragment().is_some()
        || !url.username().is_empty()
    {
        return Err(invalid(format!("{} is not a bare origin", origin)));
    }

    Ok(())
}
