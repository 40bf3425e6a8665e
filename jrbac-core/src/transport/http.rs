//! HTTP batch transport.
//!
//! Posts the request array as JSON to the agent endpoint and decodes the
//! response array.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jrbac_core::protocol::Request;
//! use jrbac_core::transport::BatchTransport;
//! use jrbac_core::transport::http::HttpTransport;
//!
//! # #[tokio::main]
//! # async fn main() -> jrbac_core::Result<()> {
//! let transport = HttpTransport::connect("http://localhost:8080/jolokia").await?;
//! let responses = transport
//!     .request(&[Request::read("java.lang:type=Memory", "HeapMemoryUsage")])
//!     .await?;
//! println!("{:?}", responses[0].value);
//! # Ok(())
//! # }
//! ```

use super::*;
use crate::error::{ProtocolError, TransportError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, trace};
use url::Url;

/// Configuration for [`HttpTransport`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpTransportConfig {
    /// Agent endpoint, e.g. `http://localhost:8080/jolokia`
    pub endpoint: String,
    /// Per-batch timeout in seconds
    pub timeout_seconds: u64,
}

impl HttpTransportConfig {
    /// Configuration with the default timeout
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            timeout_seconds: 30,
        }
    }
}

/// HTTP transport for batched agent calls
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    stats: Arc<Mutex<TransportStats>>,
}

impl HttpTransport {
    /// Create a transport without touching the network.
    ///
    /// # Errors
    ///
    /// Fails if the endpoint is not a valid URL or the HTTP client cannot be
    /// built.
    pub fn new(config: &HttpTransportConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(TransportError::InvalidConfiguration(format!(
                "Unsupported endpoint scheme: {}",
                endpoint.scheme()
            ))
            .into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                TransportError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
            })?;

        let stats = TransportStats {
            connection_time: Some(chrono::Utc::now()),
            ..Default::default()
        };

        Ok(Self {
            client,
            endpoint,
            stats: Arc::new(Mutex::new(stats)),
        })
    }

    /// Create a transport and check that the agent answers a `GET`.
    ///
    /// # Errors
    ///
    /// Fails if the endpoint is invalid, unreachable, or returns an error status.
    pub async fn connect(endpoint: &str) -> Result<Self> {
        let transport = Self::new(&HttpTransportConfig::new(endpoint))?;

        let response = transport
            .client
            .get(transport.endpoint.clone())
            .send()
            .await
            .map_err(|e| {
                TransportError::ConnectionFailed(format!("Failed to connect to agent: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(TransportError::ConnectionFailed(format!(
                "Agent returned status: {}",
                response.status()
            ))
            .into());
        }

        debug!("Connected to agent at {}", transport.endpoint);
        Ok(transport)
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Get current transport statistics
    pub async fn stats(&self) -> TransportStats {
        self.stats.lock().await.clone()
    }
}

#[async_trait]
impl BatchTransport for HttpTransport {
    async fn request(&self, requests: &[Request]) -> Result<Vec<Response>> {
        let body = serde_json::to_string(requests)?;
        trace!("Sending batch via HTTP: {}", body);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .body(body.clone())
            .send()
            .await
            .map_err(|e| TransportError::SendFailed(format!("Failed to send HTTP request: {e}")))?;

        if !response.status().is_success() {
            return Err(TransportError::SendFailed(format!(
                "HTTP request failed with status: {}",
                response.status()
            ))
            .into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::ReceiveFailed(format!("Failed to read body: {e}")))?;
        trace!("Received batch answer: {}", text);

        let responses: Vec<Response> = serde_json::from_str(&text)?;
        if responses.len() != requests.len() {
            return Err(ProtocolError::ResponseCountMismatch {
                expected: requests.len(),
                actual: responses.len(),
            }
            .into());
        }

        let mut stats = self.stats.lock().await;
        stats.batches_sent += 1;
        stats.requests_sent += requests.len() as u64;
        stats.bytes_sent += body.len() as u64;
        stats.bytes_received += text.len() as u64;
        stats.last_activity = Some(chrono::Utc::now());

        debug!("Batch of {} requests answered", requests.len());
        Ok(responses)
    }

    fn transport_type(&self) -> &'static str {
        "http"
    }
}
