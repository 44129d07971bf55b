//! Error types for verdant.
//!
//! Every fetch failure is reduced to exactly one entry of a fixed taxonomy
//! before it reaches state; the store never holds a raw transport error.
//! Classification order matters: a timeout and a dead connection both
//! present as "no usable response" and differ only in the abort flag, so
//! the timeout check runs first.

use serde::Deserialize;
use thiserror::Error;

/// Message shown when the connection never reached the server.
pub const NETWORK_ERROR: &str = "Network connection failed";
/// Message shown when a request is aborted by the configured deadline.
pub const TIMEOUT_ERROR: &str = "Request timeout";
/// Message shown for failures outside the transport layer.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred";
/// Message shown when a response body is missing its expected payload.
pub const INVALID_RESPONSE_FORMAT: &str = "Invalid response format";
/// Message prefix for external links that fail validation.
pub const INVALID_URL: &str = "Invalid URL format";

/// Resource kinds served by the plant API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Categories,
    Questions,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Categories => "categories",
            Resource::Questions => "questions",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified fetch failure.
///
/// `Display` renders the exact string stored in slice state and shown to
/// the user. All variants are terminal for the current fetch attempt;
/// nothing here is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// A body was received but the expected payload field was absent.
    #[error("{}", INVALID_RESPONSE_FORMAT)]
    InvalidFormat,
    /// The request was aborted by the configured deadline.
    #[error("{}", TIMEOUT_ERROR)]
    Timeout,
    /// No response reached us at all.
    #[error("{}", NETWORK_ERROR)]
    Network,
    /// The server answered with an explicit message; surfaced verbatim.
    #[error("{0}")]
    Server(String),
    /// The server answered without a usable message.
    #[error("Failed to fetch {0}")]
    ServerGeneric(Resource),
    /// Not recognized as a transport-layer failure.
    #[error("{}", UNKNOWN_ERROR)]
    Unknown,
}

/// Error payload some endpoints attach to non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl FetchError {
    /// Classify an error raised by the HTTP client before any response
    /// body was usable.
    ///
    /// The timeout flag is checked before the no-response branch; builder
    /// and decode errors are not transport failures and fall through to
    /// `Unknown`.
    pub fn from_transport(err: &reqwest::Error, resource: Resource) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() || err.is_request() || err.is_body() {
            Self::Network
        } else if err.status().is_some() {
            Self::ServerGeneric(resource)
        } else {
            Self::Unknown
        }
    }

    /// Classify a non-success response from its body.
    ///
    /// A server-supplied `message` field is surfaced verbatim; anything
    /// else collapses to the per-resource generic failure.
    pub fn from_error_body(body: &str, resource: Resource) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { message: Some(m) }) if !m.is_empty() => Self::Server(m),
            _ => Self::ServerGeneric(resource),
        }
    }
}

/// Top-level error type for verdant.
#[derive(Debug, Error)]
pub enum VerdantError {
    #[error("Configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{}: {url}", INVALID_URL)]
    InvalidUrl { url: String },
}

/// Result type alias for verdant.
pub type Result<T> = std::result::Result<T, VerdantError>;
