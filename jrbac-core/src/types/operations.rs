//! Operation metadata as reported by the agent's `list` command.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::utils::operation_to_string;

/// One argument of an operation signature
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperationArgument {
    /// Argument name (often synthetic, e.g. `p1`)
    #[serde(default)]
    pub name: String,
    /// Fully qualified argument type, e.g. `java.lang.String`
    #[serde(rename = "type")]
    pub type_name: String,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl OperationArgument {
    /// Create an argument of the given type
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            desc: None,
        }
    }
}

/// One callable form of a named operation.
///
/// `can_invoke` stays `None` until a decoration pass fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSignature {
    /// Ordered arguments
    #[serde(default)]
    pub args: Vec<OperationArgument>,
    /// Return type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ret: Option<String>,
    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Whether the current principal may invoke this signature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_invoke: Option<bool>,
}

impl OperationSignature {
    /// Create a signature from its argument types, naming arguments `p1..pn`
    pub fn new(arg_types: &[&str]) -> Self {
        Self {
            args: arg_types
                .iter()
                .enumerate()
                .map(|(i, t)| OperationArgument::new(&format!("p{}", i + 1), t))
                .collect(),
            ..Default::default()
        }
    }

    /// Set the return type
    pub fn with_ret(mut self, ret: &str) -> Self {
        self.ret = Some(ret.to_string());
        self
    }

    /// Set the description
    pub fn with_desc(mut self, desc: &str) -> Self {
        self.desc = Some(desc.to_string());
        self
    }

    /// Argument types in declaration order
    pub fn argument_types(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|a| a.type_name.as_str())
    }

    /// Canonical `name(type1,type2,...)` rendering of this signature
    pub fn canonical(&self, name: &str) -> String {
        operation_to_string(name, &self.args)
    }
}

/// Value of an operation name: a single signature or an overload list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationEntry {
    /// Several signatures sharing one name
    Overloaded(Vec<OperationSignature>),
    /// Exactly one signature
    Single(OperationSignature),
}

impl OperationEntry {
    /// Iterate the signatures together with their overload position.
    ///
    /// The position is `None` for [`OperationEntry::Single`].
    pub fn signatures(&self) -> Vec<(Option<usize>, &OperationSignature)> {
        match self {
            Self::Single(sig) => vec![(None, sig)],
            Self::Overloaded(sigs) => sigs.iter().enumerate().map(|(i, s)| (Some(i), s)).collect(),
        }
    }

    /// Look up a signature by overload position
    pub fn get(&self, overload: Option<usize>) -> Option<&OperationSignature> {
        match (self, overload) {
            (Self::Single(sig), None) => Some(sig),
            (Self::Overloaded(sigs), Some(i)) => sigs.get(i),
            _ => None,
        }
    }

    /// Mutable lookup by overload position
    pub fn get_mut(&mut self, overload: Option<usize>) -> Option<&mut OperationSignature> {
        match (self, overload) {
            (Self::Single(sig), None) => Some(sig),
            (Self::Overloaded(sigs), Some(i)) => sigs.get_mut(i),
            _ => None,
        }
    }

    /// Number of concrete signatures
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Overloaded(sigs) => sigs.len(),
        }
    }

    /// True for an empty overload list
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locates one concrete signature inside [`Descriptor::operations`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignatureSlot {
    /// Operation name
    pub name: String,
    /// Position in the overload list, `None` for a single signature
    pub overload: Option<usize>,
}

impl SignatureSlot {
    /// Create a new slot
    pub fn new(name: &str, overload: Option<usize>) -> Self {
        Self {
            name: name.to_string(),
            overload,
        }
    }
}

/// Canonical signature string to slot
pub type SignatureIndex = BTreeMap<String, SignatureSlot>;

/// Metadata of a node backed by a remote object.
///
/// On the wire this is the agent's `list` entry (`desc`, `attr`, `op`) plus
/// the optional `opByString` and `canInvoke` fields a server-side decorator
/// adds. The `opByString` keys are resolved into
/// [`Descriptor::operations_by_signature`] when deserializing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawDescriptor", into = "RawDescriptor")]
pub struct Descriptor {
    /// Description of the remote object
    pub desc: Option<String>,
    /// Attribute metadata, passed through untouched
    pub attributes: Option<Value>,
    /// Operations by name
    pub operations: BTreeMap<String, OperationEntry>,
    /// Derived index, empty until built
    pub operations_by_signature: SignatureIndex,
    /// Whether the current principal may invoke the object itself
    pub can_invoke: Option<bool>,
}

impl Descriptor {
    /// Create an empty descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-signature operation
    pub fn with_operation(mut self, name: &str, signature: OperationSignature) -> Self {
        self.operations
            .insert(name.to_string(), OperationEntry::Single(signature));
        self
    }

    /// Add an overloaded operation
    pub fn with_overloads(mut self, name: &str, signatures: Vec<OperationSignature>) -> Self {
        self.operations
            .insert(name.to_string(), OperationEntry::Overloaded(signatures));
        self
    }

    /// Set the node-level permission
    pub fn with_can_invoke(mut self, can_invoke: bool) -> Self {
        self.can_invoke = Some(can_invoke);
        self
    }

    /// True if at least one operation is declared
    pub fn has_operations(&self) -> bool {
        !self.operations.is_empty()
    }

    /// Resolve a slot to its signature
    pub fn slot(&self, slot: &SignatureSlot) -> Option<&OperationSignature> {
        self.operations.get(&slot.name)?.get(slot.overload)
    }

    /// Resolve a slot to its signature, mutably
    pub fn slot_mut(&mut self, slot: &SignatureSlot) -> Option<&mut OperationSignature> {
        self.operations.get_mut(&slot.name)?.get_mut(slot.overload)
    }

    /// Look up a signature through the canonical index
    pub fn signature(&self, canonical: &str) -> Option<&OperationSignature> {
        let slot = self.operations_by_signature.get(canonical)?;
        self.slot(slot)
    }

    /// Mutable lookup through the canonical index
    pub fn signature_mut(&mut self, canonical: &str) -> Option<&mut OperationSignature> {
        let slot = self.operations_by_signature.get(canonical)?.clone();
        self.slot_mut(&slot)
    }

    /// Find the slot whose canonical rendering equals `canonical`
    fn find_slot(&self, canonical: &str) -> Option<SignatureSlot> {
        self.operations.iter().find_map(|(name, entry)| {
            entry
                .signatures()
                .into_iter()
                .find(|(_, sig)| sig.canonical(name) == canonical)
                .map(|(overload, _)| SignatureSlot::new(name, overload))
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attr: Option<Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    op: BTreeMap<String, OperationEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    op_by_string: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    can_invoke: Option<bool>,
}

impl From<RawDescriptor> for Descriptor {
    fn from(raw: RawDescriptor) -> Self {
        let mut descriptor = Descriptor {
            desc: raw.desc,
            attributes: raw.attr,
            operations: raw.op,
            operations_by_signature: SignatureIndex::new(),
            can_invoke: raw.can_invoke,
        };
        for key in raw.op_by_string.unwrap_or_default().into_keys() {
            // keys that name no declared signature are dropped
            if let Some(slot) = descriptor.find_slot(&key) {
                descriptor.operations_by_signature.insert(key, slot);
            }
        }
        descriptor
    }
}

impl From<Descriptor> for RawDescriptor {
    fn from(descriptor: Descriptor) -> Self {
        let op_by_string = if descriptor.operations_by_signature.is_empty() {
            None
        } else {
            Some(
                descriptor
                    .operations_by_signature
                    .iter()
                    .filter_map(|(key, slot)| {
                        let sig = descriptor.slot(slot)?;
                        Some((key.clone(), serde_json::to_value(sig).ok()?))
                    })
                    .collect(),
            )
        };
        RawDescriptor {
            desc: descriptor.desc,
            attr: descriptor.attributes,
            op: descriptor.operations,
            op_by_string,
            can_invoke: descriptor.can_invoke,
        }
    }
}
