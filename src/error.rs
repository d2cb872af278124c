//! Error taxonomy for every BrickLink call.

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, BricklinkError>;

/// Errors returned by the client. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum BricklinkError {
    /// Missing or invalid credentials. Raised before any network call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection, timeout or TLS failure in the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] wreq::Error),

    /// BrickLink answered with an error envelope (unknown item, bad parameter, ...).
    #[error("BrickLink request error {code}: {message} ({description})")]
    UpstreamRequest { code: u16, message: String, description: String },

    /// The response body did not have the expected shape.
    #[error("Decode error at `{path}`: {message}")]
    Decode { path: String, message: String },
}

/// Fieldless discriminant of [`BricklinkError`] for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Transport,
    UpstreamRequest,
    Decode,
}

impl BricklinkError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a decode error for the given field path.
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode { path: path.into(), message: message.into() }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Transport(_) => ErrorKind::Transport,
            Self::UpstreamRequest { .. } => ErrorKind::UpstreamRequest,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// True when BrickLink reported that the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UpstreamRequest { code: 404, .. })
    }
}
