//! # jrbac Core
//!
//! Core types for decorating a remote JMX resource tree with permissions.
//!
//! This crate provides the resource tree model, the wire types of the
//! agent's JSON batch protocol, and the [`BatchTransport`] abstraction with
//! an HTTP implementation.
//!
//! ## API Stability
//!
//! **Current Status: EXPERIMENTAL (v0.x.x)**
//!
//! During the 0.x.x series minor version bumps may include breaking changes.

#![warn(missing_docs)]

pub mod error;
pub mod protocol;
pub mod transport;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use protocol::{Request, Response};
pub use transport::BatchTransport;
pub use types::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::protocol::{Request, Response, STATUS_OK};
    pub use crate::transport::{BatchTransport, TransportStats};
    pub use crate::types::*;
    pub use crate::utils::operation_to_string;
}
