//! # jrbac - permission decoration for remote JMX resource trees
//!
//! This crate re-exports the functionality of the constituent crates:
//! - `jrbac-core`: Resource tree model, wire types and batch transport
//! - `jrbac-client`: Agent client, ACL locator and list-mode detection
//! - `jrbac-decorator`: The tree flattener and permission decorator

pub use jrbac_client as client;
pub use jrbac_core as core;
pub use jrbac_decorator as decorator;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::client::prelude::*;
    #[allow(unused_imports)]
    pub use crate::core::prelude::*;
    pub use crate::decorator::prelude::*;
}
