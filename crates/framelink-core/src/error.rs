//! Shared error type across framelink crates.

use thiserror::Error;

/// Stable error classifications, used for metrics labels and tracker
/// reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Host misconfiguration, surfaced at construction.
    Config,
    /// Network failure or non-success HTTP status.
    Transport,
    /// Upstream responded, but not with what the contract promises.
    BadResponse,
    /// `open()` called before a flow token was issued.
    TokenMissing,
    /// Internal fault.
    Internal,
}

impl ErrorKind {
    /// String representation used in metrics and tracker payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG",
            ErrorKind::Transport => "TRANSPORT",
            ErrorKind::BadResponse => "BAD_RESPONSE",
            ErrorKind::TokenMissing => "TOKEN_MISSING",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FramelinkError>;

/// Unified error type used by core and client.
///
/// Only the host's own mistakes surface here. Anything originating from the
/// untrusted cross-frame channel degrades to a silent drop instead, so the
/// channel stays available for subsequent legitimate messages.
#[derive(Debug, Error)]
pub enum FramelinkError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("bad response: {0}")]
    BadResponse(String),
    #[error("flow token missing: call initialize before open")]
    TokenMissing,
    #[error("internal: {0}")]
    Internal(String),
}

impl FramelinkError {
    /// Map to a stable classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FramelinkError::Config(_) => ErrorKind::Config,
            FramelinkError::Transport(_) => ErrorKind::Transport,
            FramelinkError::BadResponse(_) => ErrorKind::BadResponse,
            FramelinkError::TokenMissing => ErrorKind::TokenMissing,
            FramelinkError::Internal(_) => ErrorKind::Internal,
        }
    }
}
