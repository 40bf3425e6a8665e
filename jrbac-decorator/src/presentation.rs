//! Presentation state derived from node permissions

use jrbac_core::types::ResourceNode;

/// Class of nodes the principal may invoke
pub const CAN_INVOKE_CLASS: &str = "can-invoke";

/// Class of nodes the principal may not invoke
pub const CANT_INVOKE_CLASS: &str = "cant-invoke";

/// Default icon of denied nodes
pub const DEFAULT_LOCKED_ICON: &str = "fa fa-lock";

/// Tag `node` with exactly one of the invoke classes and lock it when denied.
///
/// Other classes are preserved.
pub fn apply_can_invoke(node: &mut ResourceNode, can_invoke: bool, locked_icon: &str) {
    node.classes.remove(CAN_INVOKE_CLASS);
    node.classes.remove(CANT_INVOKE_CLASS);
    if can_invoke {
        node.classes.insert(CAN_INVOKE_CLASS);
    } else {
        node.classes.insert(CANT_INVOKE_CLASS);
        node.icon = Some(locked_icon.to_string());
    }
}
