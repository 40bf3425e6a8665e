//! Permission decoration of a fetched resource tree

use jrbac_client::{
    AclLocator, AclResourceLocator, JolokiaClient, ListMethod, ListMethodProvider,
};
use jrbac_core::error::ProtocolError;
use jrbac_core::protocol::Response;
use jrbac_core::types::ResourceNode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::RbacConfig;
use crate::flatten::{FlatTree, flatten};
use crate::presentation::apply_can_invoke;
use crate::requests::{BatchPlan, Target};

/// What a decoration pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecorationOutcome {
    /// Permissions were already embedded; only presentation was updated
    AlreadyDecorated {
        /// Nodes tagged
        nodes: usize,
    },
    /// Permissions were fetched in one batch and merged
    Resolved {
        /// Nodes whose node-level permission was set
        nodes: usize,
        /// Operation signatures whose permission was set
        operations: usize,
    },
    /// Nothing could be fetched; the tree was left untouched
    Dropped {
        /// Why the pass gave up
        reason: String,
    },
}

/// Bulk answer: identifier to canonical signature to result
type BulkAnswer = BTreeMap<String, BTreeMap<String, SignatureAnswer>>;

#[derive(Debug, Deserialize)]
struct SignatureAnswer {
    #[serde(rename = "CanInvoke")]
    can_invoke: bool,
}

/// Decorates resource trees with node and operation permissions.
///
/// A pass issues at most one batch, whatever the size of the tree. Passes
/// never fail: a lost batch leaves the tree as it was and is reported as
/// [`DecorationOutcome::Dropped`].
///
/// ```rust,no_run
/// use jrbac_client::{JolokiaClient, JolokiaStatus};
/// use jrbac_core::types::ResourceNode;
/// use jrbac_decorator::prelude::*;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> jrbac_core::Result<()> {
/// let client = JolokiaClient::connect_http("http://localhost:8080/jolokia").await?;
/// let status = Arc::new(JolokiaStatus::default());
/// status.detect(&client).await;
///
/// let processor = TreeProcessor::from_config(client, status, RbacConfig::default());
/// let mut tree = ResourceNode::folder("root");
/// let outcome = processor.process(&mut tree).await;
/// println!("{:?}", outcome);
/// # Ok(())
/// # }
/// ```
pub struct TreeProcessor {
    client: JolokiaClient,
    status: Arc<dyn ListMethodProvider>,
    locator: Arc<dyn AclResourceLocator>,
    locked_icon: String,
}

impl TreeProcessor {
    /// Create a processor from its collaborators
    pub fn new(
        client: JolokiaClient,
        status: Arc<dyn ListMethodProvider>,
        locator: Arc<dyn AclResourceLocator>,
    ) -> Self {
        Self {
            client,
            status,
            locator,
            locked_icon: RbacConfig::default().locked_icon,
        }
    }

    /// Create a processor that discovers the ACL object as configured
    pub fn from_config(
        client: JolokiaClient,
        status: Arc<dyn ListMethodProvider>,
        config: RbacConfig,
    ) -> Self {
        let locator = AclLocator::with_names(
            client.clone(),
            &config.acl_search_pattern,
            &config.default_acl_mbean,
        );
        Self {
            client,
            status,
            locator: Arc::new(locator),
            locked_icon: config.locked_icon,
        }
    }

    /// Override the icon of denied nodes
    pub fn with_locked_icon(mut self, icon: &str) -> Self {
        self.locked_icon = icon.to_string();
        self
    }

    /// Decorate `tree` in place.
    ///
    /// Holding `&mut` for the whole pass keeps two passes from interleaving
    /// on the same tree.
    pub async fn process(&self, tree: &mut ResourceNode) -> DecorationOutcome {
        debug!(title = %tree.title, "Processing tree");

        let acl_mbean = match self.locator.acl_resource().await {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "Could not resolve ACL object, tree left undecorated");
                return DecorationOutcome::Dropped {
                    reason: e.to_string(),
                };
            }
        };

        let flat = flatten(tree);
        match self.status.list_method() {
            ListMethod::Optimised => {
                debug!("Process tree: optimised list mode");
                if has_decorated_rbac(tree, &flat) {
                    debug!("Tree already decorated with RBAC");
                    self.process_with_rbac(tree, &flat)
                } else {
                    debug!("Tree not decorated with RBAC, fetching RBAC info now");
                    self.process_general(tree, &flat, &acl_mbean).await
                }
            }
            ListMethod::General | ListMethod::CantDetermine => {
                debug!("Process tree: general mode");
                self.process_general(tree, &flat, &acl_mbean).await
            }
        }
    }

    fn process_with_rbac(&self, tree: &mut ResourceNode, flat: &FlatTree) -> DecorationOutcome {
        let mut nodes = 0;
        for path in flat.values() {
            if let Some(node) = tree.node_at_mut(path) {
                let can_invoke = node.can_invoke().unwrap_or(true);
                apply_can_invoke(node, can_invoke, &self.locked_icon);
                nodes += 1;
            }
        }
        DecorationOutcome::AlreadyDecorated { nodes }
    }

    async fn process_general(
        &self,
        tree: &mut ResourceNode,
        flat: &FlatTree,
        acl_mbean: &str,
    ) -> DecorationOutcome {
        let plan = BatchPlan::build(tree, flat, acl_mbean);
        debug!(
            acl = %acl_mbean,
            nodes = plan.node_requests(),
            bulk_entries = plan.bulk.len(),
            "Sending RBAC batch"
        );

        match self.client.batch(&plan.requests).await {
            Ok(responses) => self.merge(tree, flat, &plan, responses),
            Err(e) => {
                warn!(error = %e, "RBAC batch failed, tree left undecorated");
                DecorationOutcome::Dropped {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn merge(
        &self,
        tree: &mut ResourceNode,
        flat: &FlatTree,
        plan: &BatchPlan,
        responses: Vec<Response>,
    ) -> DecorationOutcome {
        let mut nodes = 0;
        let mut operations = 0;

        for (target, response) in plan.targets.iter().zip(responses) {
            let value = match response.into_value() {
                Ok(value) => value,
                Err(e) => {
                    debug!(?target, error = %e, "Skipping failed RBAC response");
                    continue;
                }
            };

            match target {
                Target::Node(identifier) => {
                    let Some(can_invoke) = value.as_bool() else {
                        let error = ProtocolError::UnexpectedValue(format!(
                            "canInvoke answer for {identifier} is not a boolean: {value}"
                        ));
                        debug!(%error, "Skipping node answer");
                        continue;
                    };
                    if let Some(node) = flat.get(identifier).and_then(|p| tree.node_at_mut(p)) {
                        node.set_can_invoke(can_invoke);
                        apply_can_invoke(node, can_invoke, &self.locked_icon);
                        nodes += 1;
                    }
                }
                Target::Bulk => {
                    let answer: BulkAnswer = match serde_json::from_value(value) {
                        Ok(answer) => answer,
                        Err(e) => {
                            debug!(error = %e, "Skipping malformed bulk canInvoke answer");
                            continue;
                        }
                    };
                    operations += merge_bulk(tree, flat, answer);
                }
            }
        }

        debug!(nodes, operations, "Processed tree with RBAC");
        DecorationOutcome::Resolved { nodes, operations }
    }
}

/// True if no node declares operations without a signature index.
///
/// A tree without any operations counts as decorated. An operation declared
/// with an empty overload list never gets an index entry, so a tree holding
/// one is never seen as decorated and every optimised pass falls back to the
/// general batch.
pub fn has_decorated_rbac(tree: &ResourceNode, flat: &FlatTree) -> bool {
    !flat
        .values()
        .filter_map(|path| tree.node_at(path)?.descriptor.as_ref())
        .any(|d| d.has_operations() && d.operations_by_signature.is_empty())
}

fn merge_bulk(tree: &mut ResourceNode, flat: &FlatTree, answer: BulkAnswer) -> usize {
    let mut merged = 0;
    for (identifier, signatures) in answer {
        let Some(descriptor) = flat
            .get(&identifier)
            .and_then(|p| tree.node_at_mut(p))
            .and_then(|n| n.descriptor.as_mut())
        else {
            continue;
        };
        for (canonical, result) in signatures {
            if let Some(signature) = descriptor.signature_mut(&canonical) {
                signature.can_invoke = Some(result.can_invoke);
                merged += 1;
            }
        }
    }
    merged
}
