//! The resource tree: folders and remote objects as shown in the console

use serde::{Deserialize, Serialize};

use super::{CssClasses, Descriptor};
use crate::utils::is_blank;

/// A node of the resource tree.
///
/// Nodes with a blank `identifier` are pure grouping folders. Nodes backed
/// by a remote object carry its [`Descriptor`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNode {
    /// Remote object name, blank for grouping nodes
    #[serde(default, rename = "objectName")]
    pub identifier: String,
    /// Display label
    #[serde(default)]
    pub title: String,
    /// Whether `children` should be walked
    #[serde(default, rename = "folder")]
    pub is_container: bool,
    /// Child nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResourceNode>,
    /// Remote object metadata
    #[serde(default, rename = "mbean", skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<Descriptor>,
    /// Presentation classes
    #[serde(default, rename = "class", skip_serializing_if = "CssClasses::is_empty")]
    pub classes: CssClasses,
    /// Icon override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ResourceNode {
    /// Create a grouping folder
    pub fn folder(title: &str) -> Self {
        Self {
            title: title.to_string(),
            is_container: true,
            ..Default::default()
        }
    }

    /// Create a node for a remote object
    pub fn object(identifier: &str, title: &str, descriptor: Descriptor) -> Self {
        Self {
            identifier: identifier.to_string(),
            title: title.to_string(),
            descriptor: Some(descriptor),
            ..Default::default()
        }
    }

    /// Append a child, turning this node into a container
    pub fn with_child(mut self, child: ResourceNode) -> Self {
        self.is_container = true;
        self.children.push(child);
        self
    }

    /// Set the identifier
    pub fn with_identifier(mut self, identifier: &str) -> Self {
        self.identifier = identifier.to_string();
        self
    }

    /// Add a presentation class
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class);
        self
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    /// True if the node maps to a remote object
    pub fn is_addressable(&self) -> bool {
        !is_blank(&self.identifier)
    }

    /// Node-level permission, if known
    pub fn can_invoke(&self) -> Option<bool> {
        self.descriptor.as_ref().and_then(|d| d.can_invoke)
    }

    /// Record the node-level permission.
    ///
    /// A node without descriptor gets an empty one to carry the flag.
    pub fn set_can_invoke(&mut self, can_invoke: bool) {
        self.descriptor
            .get_or_insert_with(Descriptor::default)
            .can_invoke = Some(can_invoke);
    }

    /// Resolve a path of child indices starting at this node
    pub fn node_at(&self, path: &NodePath) -> Option<&ResourceNode> {
        path.0
            .iter()
            .try_fold(self, |node, &i| node.children.get(i))
    }

    /// Resolve a path of child indices starting at this node, mutably
    pub fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut ResourceNode> {
        let mut node = self;
        for &i in &path.0 {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ResourceNode::node_count).sum::<usize>()
    }
}

/// Child-index path from the root to a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the root itself
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of the `index`-th child of the node at this path
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}
