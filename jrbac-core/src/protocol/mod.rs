//! Wire types of the agent's JSON batch protocol
//!
//! A batch is a JSON array of [`Request`] objects posted in one HTTP call;
//! the agent answers with an array of [`Response`] objects in the same order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;

/// Status the agent reports for a successful sub-request
pub const STATUS_OK: u16 = 200;

/// One request inside a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Request {
    /// Read an attribute (all attributes if `attribute` is absent)
    Read {
        /// Target object name
        mbean: String,
        /// Attribute name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribute: Option<String>,
    },
    /// Invoke an operation
    Exec {
        /// Target object name
        mbean: String,
        /// Canonical operation signature, e.g. `canInvoke(java.lang.String)`
        operation: String,
        /// Positional arguments
        #[serde(default)]
        arguments: Vec<Value>,
    },
    /// Search object names matching a pattern
    Search {
        /// Object name pattern
        mbean: String,
    },
}

impl Request {
    /// Create an attribute read request
    pub fn read(mbean: &str, attribute: &str) -> Self {
        Self::Read {
            mbean: mbean.to_string(),
            attribute: Some(attribute.to_string()),
        }
    }

    /// Create an operation invocation request
    pub fn exec(mbean: &str, operation: &str, arguments: Vec<Value>) -> Self {
        Self::Exec {
            mbean: mbean.to_string(),
            operation: operation.to_string(),
            arguments,
        }
    }

    /// Create a search request
    pub fn search(pattern: &str) -> Self {
        Self::Search {
            mbean: pattern.to_string(),
        }
    }

    /// Target object name or pattern
    pub fn mbean(&self) -> &str {
        match self {
            Self::Read { mbean, .. } | Self::Exec { mbean, .. } | Self::Search { mbean } => mbean,
        }
    }

    /// Request type as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::Exec { .. } => "exec",
            Self::Search { .. } => "search",
        }
    }
}

/// One response inside a batch answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Echo of the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    /// Result value
    #[serde(default)]
    pub value: Value,
    /// HTTP-like status of this sub-request
    pub status: u16,
    /// Agent timestamp (seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Error message for failed sub-requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Java exception class for failed sub-requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

impl Response {
    /// Create a successful response
    pub fn success(request: Option<Request>, value: Value) -> Self {
        Self {
            request,
            value,
            status: STATUS_OK,
            timestamp: Some(chrono::Utc::now().timestamp()),
            error: None,
            error_type: None,
        }
    }

    /// Create a failed response
    pub fn failure(request: Option<Request>, status: u16, error: &str) -> Self {
        Self {
            request,
            value: Value::Null,
            status,
            timestamp: Some(chrono::Utc::now().timestamp()),
            error: Some(error.to_string()),
            error_type: None,
        }
    }

    /// True if the sub-request succeeded
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK && self.error.is_none()
    }

    /// Convert into the value, or the agent's error
    pub fn into_value(self) -> std::result::Result<Value, ProtocolError> {
        if self.is_success() {
            Ok(self.value)
        } else {
            Err(ProtocolError::RequestFailed {
                status: self.status,
                message: self.error.unwrap_or_default(),
            })
        }
    }
}
