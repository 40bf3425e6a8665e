//! # jrbac Client
//!
//! A thin, typed client over a [`BatchTransport`] plus the collaborators the
//! tree decorator needs from the agent side:
//!
//! - [`AclLocator`]: finds the object that answers bulk permission queries
//! - [`JolokiaStatus`]: holds which `list` flavour the agent supports
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jrbac_client::{AclLocator, AclResourceLocator, JolokiaClient};
//!
//! #[tokio::main]
//! async fn main() -> jrbac_core::Result<()> {
//!     let client = JolokiaClient::connect_http("http://localhost:8080/jolokia").await?;
//!     let locator = AclLocator::new(client.clone());
//!     println!("ACL object: {}", locator.acl_resource().await?);
//!     Ok(())
//! }
//! ```

use jrbac_core::error::ProtocolError;
use jrbac_core::prelude::*;
use jrbac_core::transport::http::HttpTransport;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub mod acl;
pub mod status;

pub use acl::{AclLocator, AclResourceLocator, FixedAclResource};
pub use status::{JolokiaStatus, ListMethod, ListMethodProvider};

/// Typed facade over a batch transport.
///
/// Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct JolokiaClient {
    transport: Arc<dyn BatchTransport>,
}

impl JolokiaClient {
    /// Wrap an existing transport
    pub fn new(transport: Arc<dyn BatchTransport>) -> Self {
        Self { transport }
    }

    /// Connect to an agent over HTTP
    pub async fn connect_http(endpoint: &str) -> Result<Self> {
        let transport = HttpTransport::connect(endpoint).await?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// The underlying transport
    pub fn transport(&self) -> &Arc<dyn BatchTransport> {
        &self.transport
    }

    /// Send a batch and return the parallel responses
    pub async fn batch(&self, requests: &[Request]) -> Result<Vec<Response>> {
        debug!(
            transport = self.transport.transport_type(),
            count = requests.len(),
            "Sending batch"
        );
        self.transport.request(requests).await
    }

    /// Send a single request and return its value
    pub async fn single(&self, request: Request) -> Result<Value> {
        let mut responses = self.batch(std::slice::from_ref(&request)).await?;
        let response = responses
            .pop()
            .ok_or(ProtocolError::ResponseCountMismatch {
                expected: 1,
                actual: 0,
            })?;
        Ok(response.into_value()?)
    }

    /// Search object names matching `pattern`
    pub async fn search(&self, pattern: &str) -> Result<Vec<String>> {
        let value = self.single(Request::search(pattern)).await?;
        let names: Vec<String> = serde_json::from_value(value)?;
        Ok(names)
    }

    /// Invoke an operation and return its result
    pub async fn exec(&self, mbean: &str, operation: &str, arguments: Vec<Value>) -> Result<Value> {
        self.single(Request::exec(mbean, operation, arguments)).await
    }
}

/// Re-export commonly used items
pub mod prelude {
    pub use crate::JolokiaClient;
    pub use crate::acl::{AclLocator, AclResourceLocator, FixedAclResource};
    pub use crate::status::{JolokiaStatus, ListMethod, ListMethodProvider};
}
