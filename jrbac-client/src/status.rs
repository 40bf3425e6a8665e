//! Which `list` flavour the agent supports

use crate::JolokiaClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Object registered by agents that serve the optimised, pre-decorated list
pub const RBAC_REGISTRY_MBEAN: &str = "hawtio:type=security,name=RBACRegistry";

/// How the resource tree was listed from the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListMethod {
    /// Optimised listing; permission flags may already be embedded
    Optimised,
    /// Plain listing without permission data
    General,
    /// Capability not detected (yet)
    #[default]
    CantDetermine,
}

impl fmt::Display for ListMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Optimised => "optimised",
            Self::General => "general",
            Self::CantDetermine => "cant_determine",
        };
        write!(f, "{name}")
    }
}

/// Supplies the current [`ListMethod`]
pub trait ListMethodProvider: Send + Sync {
    /// Current list method
    fn list_method(&self) -> ListMethod;
}

impl ListMethodProvider for ListMethod {
    fn list_method(&self) -> ListMethod {
        *self
    }
}

/// Shared, updatable holder of the agent's list method
#[derive(Debug, Default)]
pub struct JolokiaStatus {
    list_method: RwLock<ListMethod>,
}

impl JolokiaStatus {
    /// Status with a known list method
    pub fn new(list_method: ListMethod) -> Self {
        Self {
            list_method: RwLock::new(list_method),
        }
    }

    /// Update the list method
    pub fn set_list_method(&self, list_method: ListMethod) {
        let mut guard = self
            .list_method
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = list_method;
    }

    /// Probe the agent for the RBAC registry and record the result.
    ///
    /// A registry hit means `Optimised`, a miss `General`, and a failed probe
    /// leaves `CantDetermine`.
    pub async fn detect(&self, client: &JolokiaClient) -> ListMethod {
        let detected = match client.search(RBAC_REGISTRY_MBEAN).await {
            Ok(names) if !names.is_empty() => ListMethod::Optimised,
            Ok(_) => ListMethod::General,
            Err(e) => {
                warn!(error = %e, "Could not detect list method");
                ListMethod::CantDetermine
            }
        };
        debug!(list_method = %detected, "Detected list method");
        self.set_list_method(detected);
        detected
    }
}

impl ListMethodProvider for JolokiaStatus {
    fn list_method(&self) -> ListMethod {
        *self
            .list_method
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
