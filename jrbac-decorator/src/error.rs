//! Error types for jrbac decoration

use thiserror::Error;

/// Errors that can occur while setting up decoration.
///
/// A decoration pass itself never fails; see
/// [`DecorationOutcome`](crate::processor::DecorationOutcome).
#[derive(Error, Debug)]
pub enum RbacError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
