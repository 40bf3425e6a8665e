//! Data model of the resource tree
//!
//! - [`ResourceNode`]: a folder or remote object in the tree
//! - [`Descriptor`]: operations and permission flags of a remote object
//! - [`CssClasses`]: presentation state derived from permissions

pub mod css;
pub mod operations;
pub mod tree;

pub use css::*;
pub use operations::*;
pub use tree::*;
