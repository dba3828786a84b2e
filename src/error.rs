//! Error types for kvline
//!
//! Provides a unified error type for all client operations.

use thiserror::Error;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for kvline operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection closed by peer before any response bytes were received")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("Response too large: exceeds {limit} bytes")]
    ResponseTooLarge { limit: usize },

    // -------------------------------------------------------------------------
    // Payload Errors
    // -------------------------------------------------------------------------
    #[error("Response is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("Response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`KvError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Host unreachable, refused, timed out or reset
    Network,
    /// Response incomplete or over the size ceiling
    Truncated,
    /// Response bytes are not UTF-8
    Decode,
    /// Response text is not a JSON document
    Parse,
    /// Malformed command
    Protocol,
    /// Invalid client configuration
    Config,
}

impl KvError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            KvError::Connect { .. } | KvError::ConnectionClosed => ErrorKind::Network,
            KvError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                ErrorKind::Truncated
            }
            KvError::Io(_) => ErrorKind::Network,
            KvError::ResponseTooLarge { .. } => ErrorKind::Truncated,
            KvError::Decode(_) => ErrorKind::Decode,
            KvError::Parse(_) => ErrorKind::Parse,
            KvError::Protocol(_) => ErrorKind::Protocol,
            KvError::Config(_) => ErrorKind::Config,
        }
    }
}
