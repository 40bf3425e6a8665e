//! Permission decoration for remote JMX resource trees
//!
//! Given a resource tree fetched from an agent, [`TreeProcessor`] works out
//! for every node and every operation signature whether the current
//! principal may invoke it, and records the answer on the tree together with
//! the derived presentation state (`can-invoke` / `cant-invoke` classes and a
//! lock icon).
//!
//! # Features
//!
//! - **One round trip**: all node and operation checks travel in one batch
//! - **Overload aware**: operations are keyed by their full signature
//! - **Pre-decorated trees**: permissions embedded by an optimised agent
//!   listing are detected and reused without any remote call
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jrbac_client::{JolokiaClient, JolokiaStatus, ListMethod};
//! use jrbac_core::types::ResourceNode;
//! use jrbac_decorator::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> jrbac_core::Result<()> {
//!     let client = JolokiaClient::connect_http("http://localhost:8080/jolokia").await?;
//!     let status = Arc::new(JolokiaStatus::new(ListMethod::General));
//!     let processor = TreeProcessor::from_config(client, status, RbacConfig::default());
//!
//!     let mut tree: ResourceNode = serde_json::from_str(r#"{"title": "root", "folder": true}"#)?;
//!     processor.process(&mut tree).await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod flatten;
pub mod presentation;
pub mod processor;
pub mod requests;

pub mod prelude {
    //! Common imports for jrbac decoration

    pub use crate::config::RbacConfig;
    pub use crate::error::RbacError;
    pub use crate::flatten::{FlatTree, flatten};
    pub use crate::presentation::{CAN_INVOKE_CLASS, CANT_INVOKE_CLASS, apply_can_invoke};
    pub use crate::processor::{DecorationOutcome, TreeProcessor, has_decorated_rbac};
    pub use crate::requests::{BatchPlan, BulkRequest, Target, index_operations};
}

/// Result type for decoration setup
pub type Result<T> = std::result::Result<T, RbacError>;

// Re-export major components at crate level
pub use error::RbacError;
pub use processor::{DecorationOutcome, TreeProcessor};
