//! Shared fixtures for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use jrbac::core::error::TransportError;
use jrbac::core::prelude::*;
use serde_json::Value;
use std::sync::{Arc, Once};
use tokio::sync::Mutex;

pub const ACL: &str = "hawtio:type=security,area=jmx,name=ConsoleJMXSecurity";

static TRACING: Once = Once::new();

/// Install a test-friendly tracing subscriber once per test binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Answers each batch with a closure and records what was sent
pub struct RecordingTransport {
    answer: Box<dyn Fn(&[Request]) -> Result<Vec<Response>> + Send + Sync>,
    pub batches: Mutex<Vec<Vec<Request>>>,
}

impl RecordingTransport {
    pub fn new(
        answer: impl Fn(&[Request]) -> Result<Vec<Response>> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            answer: Box::new(answer),
            batches: Mutex::new(Vec::new()),
        })
    }

    /// Transport whose every batch fails
    pub fn failing() -> Arc<Self> {
        Self::new(|_| Err(TransportError::SendFailed("connection refused".to_string()).into()))
    }

    pub async fn batch_count(&self) -> usize {
        self.batches.lock().await.len()
    }

    pub async fn last_batch(&self) -> Vec<Request> {
        self.batches.lock().await.last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl BatchTransport for RecordingTransport {
    async fn request(&self, requests: &[Request]) -> Result<Vec<Response>> {
        self.batches.lock().await.push(requests.to_vec());
        (self.answer)(requests)
    }

    fn transport_type(&self) -> &'static str {
        "recording"
    }
}

/// Answer every node-level request from `allowed` and the bulk request with `bulk`
pub fn acl_answer(
    allowed: impl Fn(&str) -> bool + Send + Sync + 'static,
    bulk: Value,
) -> impl Fn(&[Request]) -> Result<Vec<Response>> + Send + Sync + 'static {
    move |requests: &[Request]| {
        Ok(requests
            .iter()
            .map(|request| match request {
                Request::Exec {
                    operation,
                    arguments,
                    ..
                } if operation == "canInvoke(java.lang.String)" => {
                    let identifier = arguments[0].as_str().unwrap_or_default();
                    Response::success(Some(request.clone()), Value::Bool(allowed(identifier)))
                }
                _ => Response::success(Some(request.clone()), bulk.clone()),
            })
            .collect())
    }
}

/// Two-node tree: `dom:type=A` without operations, `dom:type=B` with `start()`
pub fn scenario_tree() -> ResourceNode {
    ResourceNode::folder("dom")
        .with_child(ResourceNode::object("dom:type=A", "A", Descriptor::new()))
        .with_child(ResourceNode::object(
            "dom:type=B",
            "B",
            Descriptor::new().with_operation("start", OperationSignature::new(&[])),
        ))
}

/// Tree shaped like a small broker listing with nested grouping folders
pub fn broker_tree() -> ResourceNode {
    let broker = "org.apache.activemq:type=Broker,brokerName=localhost";
    let queue = "org.apache.activemq:type=Broker,brokerName=localhost,destinationType=Queue,destinationName=orders";
    ResourceNode::folder("org.apache.activemq")
        .with_class("org-apache-activemq")
        .with_child(
            ResourceNode::object(
                broker,
                "localhost",
                Descriptor::new()
                    .with_operation(
                        "addQueue",
                        OperationSignature::new(&["java.lang.String"]).with_ret("void"),
                    )
                    .with_overloads(
                        "removeQueue",
                        vec![
                            OperationSignature::new(&["java.lang.String"]),
                            OperationSignature::new(&["java.lang.String", "boolean"]),
                        ],
                    ),
            )
            .with_child(ResourceNode::folder("Queue").with_child(ResourceNode::object(
                queue,
                "orders",
                Descriptor::new().with_operation("purge", OperationSignature::new(&[])),
            ))),
        )
        .with_child(ResourceNode::object(
            "org.apache.activemq:type=Health",
            "Health",
            Descriptor::new(),
        ))
}

/// Every node reachable through the container structure
pub fn all_nodes(root: &ResourceNode) -> Vec<&ResourceNode> {
    let mut out = vec![root];
    if root.is_container {
        for child in &root.children {
            out.extend(all_nodes(child));
        }
    }
    out
}
