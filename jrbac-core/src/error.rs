//! Error types for jrbac.
//!
//! The main [`Error`] enum wraps the subsystem errors ([`TransportError`],
//! [`ProtocolError`]) together with the serialization and configuration
//! failures that can occur while talking to a remote agent.
//!
//! # Examples
//!
//! ```rust
//! use jrbac_core::error::{Error, Result, TransportError};
//!
//! fn example_function() -> Result<String> {
//!     Err(Error::Transport(TransportError::SendFailed("agent went away".to_string())))
//! }
//! ```

use thiserror::Error;

/// Result type alias for jrbac operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for jrbac operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport layer error (connection, send/receive failures, etc.).
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The agent answered, but not in the shape the protocol promises.
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error (invalid settings, missing config, etc.).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Catch-all for other error types.
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if the error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Transport-specific errors.
///
/// ```rust
/// use jrbac_core::error::TransportError;
///
/// let error = TransportError::ConnectionFailed("Unable to connect to agent".to_string());
/// ```
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to establish a connection to the remote endpoint.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Failed to send a batch through the transport.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Failed to read the batch answer.
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    /// The transport configuration is invalid.
    #[error("Invalid transport configuration: {0}")]
    InvalidConfiguration(String),
}

/// Protocol-level errors raised while interpreting agent answers.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The agent returned a different number of responses than requests sent.
    #[error("Expected {expected} responses, got {actual}")]
    ResponseCountMismatch {
        /// Number of requests in the batch
        expected: usize,
        /// Number of responses received
        actual: usize,
    },

    /// A single request inside a batch failed on the agent side.
    #[error("Request failed with status {status}: {message}")]
    RequestFailed {
        /// Status reported by the agent
        status: u16,
        /// Error text reported by the agent
        message: String,
    },

    /// The response value did not have the expected JSON type.
    #[error("Unexpected response value: {0}")]
    UnexpectedValue(String),
}
