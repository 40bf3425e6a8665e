//! Building the single batch that resolves every permission of a tree

use jrbac_core::protocol::Request;
use jrbac_core::types::{Descriptor, ResourceNode, SignatureSlot};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::flatten::FlatTree;

/// ACL operation answering for one object
pub const CAN_INVOKE_OBJECT: &str = "canInvoke(java.lang.String)";

/// ACL operation answering for many objects and signatures at once
pub const CAN_INVOKE_BULK: &str = "canInvoke(java.util.Map)";

/// Identifier to the canonical signatures of its operations
pub type BulkRequest = BTreeMap<String, Vec<String>>;

/// What a request in the batch asks about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Node-level gate of one identifier
    Node(String),
    /// The bulk signature query
    Bulk,
}

/// Requests of one batch and what each of them resolves
#[derive(Debug, Clone, Default)]
pub struct BatchPlan {
    /// Requests in send order
    pub requests: Vec<Request>,
    /// Target of each request, parallel to `requests`
    pub targets: Vec<Target>,
    /// Argument of the bulk request
    pub bulk: BulkRequest,
}

impl BatchPlan {
    /// Plan the batch for every node in `flat`.
    ///
    /// Rebuilds the signature index of every node that declares operations.
    pub fn build(tree: &mut ResourceNode, flat: &FlatTree, acl_mbean: &str) -> Self {
        let mut plan = BatchPlan::default();

        for (identifier, path) in flat {
            plan.requests.push(Request::exec(
                acl_mbean,
                CAN_INVOKE_OBJECT,
                vec![Value::String(identifier.clone())],
            ));
            plan.targets.push(Target::Node(identifier.clone()));

            if let Some(node) = tree.node_at_mut(path)
                && let Some(descriptor) = node.descriptor.as_mut()
                && descriptor.has_operations()
            {
                let signatures = index_operations(descriptor);
                if !signatures.is_empty() {
                    plan.bulk.insert(identifier.clone(), signatures);
                }
            }
        }

        plan.requests.push(Request::exec(
            acl_mbean,
            CAN_INVOKE_BULK,
            vec![bulk_argument(&plan.bulk)],
        ));
        plan.targets.push(Target::Bulk);
        plan
    }

    /// Number of node-level requests
    pub fn node_requests(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t, Target::Node(_)))
            .count()
    }
}

/// Rebuild the signature index of `descriptor`, expanding overloads.
///
/// Returns the canonical signatures in index order of insertion, without
/// duplicates.
pub fn index_operations(descriptor: &mut Descriptor) -> Vec<String> {
    descriptor.operations_by_signature.clear();
    let mut signatures = Vec::new();
    for (name, entry) in &descriptor.operations {
        for (overload, signature) in entry.signatures() {
            let canonical = signature.canonical(name);
            let slot = SignatureSlot::new(name, overload);
            if descriptor
                .operations_by_signature
                .insert(canonical.clone(), slot)
                .is_none()
            {
                signatures.push(canonical);
            }
        }
    }
    signatures
}

fn bulk_argument(bulk: &BulkRequest) -> Value {
    Value::Object(
        bulk.iter()
            .map(|(identifier, signatures)| (identifier.clone(), Value::from(signatures.clone())))
            .collect(),
    )
}
