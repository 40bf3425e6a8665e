//! Flattening the resource tree into an identifier-keyed map

use jrbac_core::types::{NodePath, ResourceNode};
use std::collections::BTreeMap;

/// Identifier to the location of its node in the tree
pub type FlatTree = BTreeMap<String, NodePath>;

/// Collect every addressable node of `root`.
///
/// Grouping nodes with a blank identifier are not collected, but their
/// children still are. A repeated identifier keeps the node visited last.
pub fn flatten(root: &ResourceNode) -> FlatTree {
    let mut nodes = FlatTree::new();
    flatten_into(&mut nodes, root, NodePath::root());
    nodes
}

fn flatten_into(nodes: &mut FlatTree, node: &ResourceNode, path: NodePath) {
    if node.is_addressable() {
        nodes.insert(node.identifier.clone(), path.clone());
    }
    if node.is_container {
        for (i, child) in node.children.iter().enumerate() {
            flatten_into(nodes, child, path.child(i));
        }
    }
}
