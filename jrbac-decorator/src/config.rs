//! Configuration types for jrbac decoration

use jrbac_client::acl::{DEFAULT_ACL_MBEAN, DEFAULT_ACL_SEARCH_PATTERN};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::RbacError;
use crate::presentation::DEFAULT_LOCKED_ICON;

/// Decoration configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RbacConfig {
    /// Pattern used to search for the ACL object
    pub acl_search_pattern: String,
    /// ACL object used when the search finds nothing
    pub default_acl_mbean: String,
    /// Icon set on nodes the principal may not invoke
    pub locked_icon: String,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            acl_search_pattern: DEFAULT_ACL_SEARCH_PATTERN.to_string(),
            default_acl_mbean: DEFAULT_ACL_MBEAN.to_string(),
            locked_icon: DEFAULT_LOCKED_ICON.to_string(),
        }
    }
}

impl RbacConfig {
    /// Load configuration from file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RbacError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: RbacConfig = serde_json::from_str(&content).map_err(|e| {
            RbacError::Configuration(format!("Failed to parse config: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;

        std::fs::write(path, content).map_err(|e| {
            RbacError::Configuration(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("acl_search_pattern", &self.acl_search_pattern),
            ("default_acl_mbean", &self.default_acl_mbean),
        ] {
            // object names are always domain:key=value
            if !value.contains(':') {
                return Err(RbacError::Configuration(format!(
                    "{} is not an object name: '{}'",
                    field, value
                )));
            }
        }

        if self.locked_icon.trim().is_empty() {
            return Err(RbacError::Configuration(
                "locked_icon must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}
