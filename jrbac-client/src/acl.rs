//! Locating the access-control object on the agent

use crate::JolokiaClient;
use async_trait::async_trait;
use jrbac_core::Result;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Pattern matching the JMX security objects exposed for permission queries
pub const DEFAULT_ACL_SEARCH_PATTERN: &str = "*:type=security,area=jmx,*";

/// Fallback when the search finds nothing
pub const DEFAULT_ACL_MBEAN: &str = "hawtio:type=security,area=jmx,name=ConsoleJMXSecurity";

/// Resolves the object name that answers `canInvoke` queries
#[async_trait]
pub trait AclResourceLocator: Send + Sync {
    /// Object name of the access-control resource
    async fn acl_resource(&self) -> Result<String>;
}

/// Locator for a known, fixed object name
#[derive(Debug, Clone)]
pub struct FixedAclResource(pub String);

impl FixedAclResource {
    /// Create a new fixed locator
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }
}

#[async_trait]
impl AclResourceLocator for FixedAclResource {
    async fn acl_resource(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Discovers the ACL object by search, falling back to a default name.
///
/// The answer is looked up once and memoised for the locator's lifetime.
pub struct AclLocator {
    client: JolokiaClient,
    search_pattern: String,
    default_mbean: String,
    resolved: OnceCell<String>,
}

impl AclLocator {
    /// Locator using the default search pattern and fallback
    pub fn new(client: JolokiaClient) -> Self {
        Self::with_names(client, DEFAULT_ACL_SEARCH_PATTERN, DEFAULT_ACL_MBEAN)
    }

    /// Locator with a custom search pattern and fallback
    pub fn with_names(client: JolokiaClient, search_pattern: &str, default_mbean: &str) -> Self {
        Self {
            client,
            search_pattern: search_pattern.to_string(),
            default_mbean: default_mbean.to_string(),
            resolved: OnceCell::new(),
        }
    }

    async fn discover(&self) -> String {
        match self.client.search(&self.search_pattern).await {
            Ok(names) => match names.into_iter().next() {
                Some(name) => {
                    debug!(acl = %name, "Found ACL object");
                    name
                }
                None => {
                    debug!(
                        pattern = %self.search_pattern,
                        fallback = %self.default_mbean,
                        "No ACL object found, using fallback"
                    );
                    self.default_mbean.clone()
                }
            },
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = %self.default_mbean,
                    "ACL object search failed, using fallback"
                );
                self.default_mbean.clone()
            }
        }
    }
}

#[async_trait]
impl AclResourceLocator for AclLocator {
    async fn acl_resource(&self) -> Result<String> {
        let name = self.resolved.get_or_init(|| self.discover()).await;
        Ok(name.clone())
    }
}
