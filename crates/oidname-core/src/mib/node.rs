//! MIB tree node and module records.

use super::ids::{ModuleId, NodeId, StrId};

/// A node in the MIB tree.
///
/// Nodes at one level form a singly linked sibling chain; a node's children
/// are reached only through `first_child`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MibNode {
    /// The arc (subidentifier) this node matches at its level.
    pub subid: u32,
    /// Symbolic name.
    pub label: StrId,
    /// Defining module, if the node belongs to one.
    pub module: Option<ModuleId>,
    /// Parent node, `None` for top-level nodes.
    pub parent: Option<NodeId>,
    /// First node of the next level down.
    pub first_child: Option<NodeId>,
    /// Next node at the same level.
    pub next_sibling: Option<NodeId>,
}

impl MibNode {
    /// Create a detached node with no links.
    #[must_use]
    pub fn new(subid: u32, label: StrId, module: Option<ModuleId>) -> Self {
        Self {
            subid,
            label,
            module,
            parent: None,
            first_child: None,
            next_sibling: None,
        }
    }

    /// Check if this is a leaf node.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

/// A MIB module that nodes may be affiliated with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MibModule {
    /// Module name, e.g. `SNMPv2-SMI`.
    pub name: StrId,
}
