//! Error types for waychat.

use thiserror::Error;

/// Primary error type for all waychat operations.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Completion task ended without a result")]
    Canceled,
}

/// Coarse failure class, used for diagnostics only.
///
/// Users always see the same failure notice; the kind goes to the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// The service could not be reached.
    Transport,
    /// The service answered, but with an error status or an unusable payload.
    Protocol,
    /// Local setup is wrong (missing key, bad config file).
    Configuration,
}

impl ChatError {
    /// Create an API error from a status code and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(err) if err.is_decode() => FailureKind::Protocol,
            Self::Network(_) | Self::Io(_) | Self::Canceled => FailureKind::Transport,
            Self::Api { .. } | Self::Serialization(_) | Self::MalformedResponse(_) => {
                FailureKind::Protocol
            }
            Self::Configuration(_) => FailureKind::Configuration,
        }
    }
}

impl From<toml::de::Error> for ChatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ChatError>;
