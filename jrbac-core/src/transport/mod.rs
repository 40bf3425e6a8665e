//! Transport abstraction for batched agent calls
//!
//! A transport takes an ordered batch of [`Request`]s, delivers it in one
//! round trip and returns the [`Response`]s in the same order. Timeouts and
//! retries are the transport's business; callers see a single `Result`.

use crate::Result;
use crate::protocol::{Request, Response};
use async_trait::async_trait;

pub mod http;

/// Sends request batches to a remote agent
#[async_trait]
pub trait BatchTransport: Send + Sync {
    /// Send one batch and wait for the parallel responses
    async fn request(&self, requests: &[Request]) -> Result<Vec<Response>>;

    /// Get the transport type name
    fn transport_type(&self) -> &'static str;
}

#[async_trait]
impl<T: BatchTransport + ?Sized> BatchTransport for std::sync::Arc<T> {
    async fn request(&self, requests: &[Request]) -> Result<Vec<Response>> {
        (**self).request(requests).await
    }

    fn transport_type(&self) -> &'static str {
        (**self).transport_type()
    }
}

/// Transport statistics
#[derive(Debug, Clone, Default)]
pub struct TransportStats {
    /// Number of batches sent
    pub batches_sent: u64,
    /// Number of individual requests sent across all batches
    pub requests_sent: u64,
    /// Number of bytes sent
    pub bytes_sent: u64,
    /// Number of bytes received
    pub bytes_received: u64,
    /// Transport creation time
    pub connection_time: Option<chrono::DateTime<chrono::Utc>>,
    /// Last activity timestamp
    pub last_activity: Option<chrono::DateTime<chrono::Utc>>,
}
