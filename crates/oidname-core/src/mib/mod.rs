//! MIB symbol tree.
//!
//! The tree is an arena of [`MibNode`]s cross-referenced by [`NodeId`]
//! handles: each node links to its first child and next sibling, the shape
//! MIB loaders naturally produce. It has two phases:
//!
//! ```text
//! MibTreeBuilder (mutable, loading) → finish() → MibTree (immutable, shared)
//! ```
//!
//! Only a finished [`MibTree`] implements [`MibRepository`], so resolution
//! can never observe a half-loaded tree. A finished tree is `Send + Sync`
//! and may be shared by any number of resolving threads.
//!
//! # Usage
//!
//! ```
//! use oidname_core::mib::MibTreeBuilder;
//! use oidname_core::{abbreviate, Oid};
//!
//! let mut builder = MibTreeBuilder::with_builtins();
//! let module = builder.add_module("CISCO-SMI").unwrap();
//! let oid: Oid = "1.3.6.1.4.1.9".parse().unwrap();
//! builder.define(oid.arcs(), "cisco", Some(module)).unwrap();
//! let tree = builder.finish();
//!
//! assert_eq!(abbreviate(&tree, oid.child(1).arcs()), "CISCO-SMI::cisco.1");
//! ```

mod builder;
pub mod builtins;
mod ids;
mod interner;
mod node;
mod repository;

pub use builder::MibTreeBuilder;
pub use ids::{ModuleId, NodeId, StrId};
pub use interner::StringInterner;
pub use node::{MibModule, MibNode};
pub use repository::{MibRepository, Siblings};

use crate::oid::Oid;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Error raised while building a tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A definition needs an OID with at least one arc.
    #[error("cannot define a node at the empty OID")]
    EmptyOid,
    /// The parent of a definition is not in the tree yet.
    #[error("parent of {oid} is not defined")]
    MissingParent {
        /// The OID being defined.
        oid: Oid,
    },
    /// A node handle does not belong to this tree.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// A module handle does not belong to this tree.
    #[error("unknown module {0:?}")]
    UnknownModule(ModuleId),
    /// A string handle does not belong to this tree.
    #[error("unknown string {0:?}")]
    UnknownString(StrId),
    /// String table offsets are unordered, out of bounds or split a character.
    #[error("malformed string table")]
    MalformedStrings,
    /// A node is reached twice while following child and sibling links.
    #[error("node {0:?} is linked more than once")]
    RevisitedNode(NodeId),
    /// A node's parent link disagrees with where it is linked from.
    #[error("node {0:?} has an inconsistent parent link")]
    ParentMismatch(NodeId),
    /// A node cannot be reached from the top level.
    #[error("node {0:?} is not reachable from the root")]
    Unreachable(NodeId),
    /// Arena storage is exhausted.
    #[error("tree capacity exceeded: too many {kind} (limit: {})", u32::MAX - 1)]
    Capacity {
        /// The kind of storage that overflowed.
        kind: CapacityKind,
    },
}

/// The kind of storage that exceeded capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityKind {
    /// Too many nodes.
    Nodes,
    /// Too many modules.
    Modules,
    /// Too many distinct strings, or too much string data.
    Strings,
}

impl core::fmt::Display for CapacityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Nodes => "nodes",
            Self::Modules => "modules",
            Self::Strings => "strings",
        })
    }
}

/// Decomposed tree for serialization.
///
/// Lookup indices are not part of it; they are rebuilt by
/// [`MibTree::from_parts`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeParts {
    /// String interner data (concatenated strings).
    pub strings_data: String,
    /// String interner offsets.
    pub strings_offsets: Vec<u32>,
    /// All modules.
    pub modules: Vec<MibModule>,
    /// All nodes.
    pub nodes: Vec<MibNode>,
    /// First node of the top level.
    pub root: Option<NodeId>,
}

/// A loaded, immutable MIB tree.
#[derive(Clone, Debug)]
pub struct MibTree {
    strings: StringInterner,
    modules: Vec<MibModule>,
    nodes: Vec<MibNode>,
    root: Option<NodeId>,

    // Lookup indices (rebuilt on load)
    label_to_nodes: BTreeMap<StrId, Vec<NodeId>>,
    module_name_to_id: BTreeMap<StrId, ModuleId>,
}

impl Default for MibTree {
    fn default() -> Self {
        Self::from_storage(StringInterner::new(), Vec::new(), Vec::new(), None)
    }
}

impl MibTree {
    /// Create an empty tree; every OID resolves to plain dotted decimal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding only the built-in SNMPv2-SMI roots.
    #[must_use]
    pub fn builtin() -> Self {
        MibTreeBuilder::with_builtins().finish()
    }

    pub(crate) fn from_storage(
        strings: StringInterner,
        modules: Vec<MibModule>,
        nodes: Vec<MibNode>,
        root: Option<NodeId>,
    ) -> Self {
        let mut tree = Self {
            strings,
            modules,
            nodes,
            root,
            label_to_nodes: BTreeMap::new(),
            module_name_to_id: BTreeMap::new(),
        };
        tree.rebuild_indices();
        tree
    }

    // === Nodes ===

    /// Get a node by ID.
    #[must_use]
    pub fn get_node(&self, id: NodeId) -> Option<&MibNode> {
        self.nodes.get(id.to_index())
    }

    /// Get the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a string by its ID.
    #[must_use]
    pub fn get_str(&self, id: StrId) -> &str {
        self.strings.get(id)
    }

    /// Compute the full OID of a node.
    #[must_use]
    pub fn oid_of(&self, id: NodeId) -> Oid {
        let mut arcs = Vec::new();
        let mut current = self.get_node(id);
        while let Some(node) = current {
            arcs.push(node.subid);
            current = node.parent.and_then(|parent| self.get_node(parent));
        }
        arcs.reverse();
        Oid::new(arcs)
    }

    /// Find the node at exactly `arcs`, following first matches.
    #[must_use]
    pub fn find(&self, arcs: &[u32]) -> Option<NodeId> {
        find_path(&self.nodes, self.root, arcs)
    }

    /// All nodes carrying `label`, in the order they were defined.
    #[must_use]
    pub fn nodes_by_label(&self, label: &str) -> &[NodeId] {
        self.strings
            .find(label)
            .and_then(|id| self.label_to_nodes.get(&id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The node named `label` defined by module `module`.
    #[must_use]
    pub fn node_by_qualified_name(&self, module: &str, label: &str) -> Option<NodeId> {
        let module_id = self.module_by_name(module)?;
        self.nodes_by_label(label)
            .iter()
            .copied()
            .find(|&id| self.get_node(id).is_some_and(|n| n.module == Some(module_id)))
    }

    // === Modules ===

    /// Get a module by ID.
    #[must_use]
    pub fn get_module(&self, id: ModuleId) -> Option<&MibModule> {
        self.modules.get(id.to_index())
    }

    /// Get a module ID by name.
    #[must_use]
    pub fn module_by_name(&self, name: &str) -> Option<ModuleId> {
        let str_id = self.strings.find(name)?;
        self.module_name_to_id.get(&str_id).copied()
    }

    /// Get the number of modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    // === Serialization ===

    /// Decompose the tree into parts for serialization.
    #[must_use]
    pub fn into_parts(self) -> TreeParts {
        let (strings_data, strings_offsets) = self.strings.into_parts();
        TreeParts {
            strings_data,
            strings_offsets,
            modules: self.modules,
            nodes: self.nodes,
            root: self.root,
        }
    }

    /// Reconstruct a tree from serialized parts.
    ///
    /// Parts may come from untrusted bytes, so every handle and link is
    /// checked before the tree is handed out for resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if a handle is out of range, the string table is
    /// malformed, or the links do not form a single tree under `root` with
    /// matching parent links.
    pub fn from_parts(parts: TreeParts) -> Result<Self, TreeError> {
        if !strings_well_formed(&parts.strings_data, &parts.strings_offsets) {
            return Err(TreeError::MalformedStrings);
        }
        let strings = StringInterner::from_parts(parts.strings_data, parts.strings_offsets);
        validate_links(&strings, &parts.modules, &parts.nodes, parts.root)?;
        Ok(Self::from_storage(
            strings,
            parts.modules,
            parts.nodes,
            parts.root,
        ))
    }

    /// Reopen the tree for further definitions.
    #[must_use]
    pub fn into_builder(self) -> MibTreeBuilder {
        MibTreeBuilder::from_storage(self.strings, self.modules, self.nodes, self.root)
    }

    fn rebuild_indices(&mut self) {
        self.label_to_nodes.clear();
        self.module_name_to_id.clear();

        for (idx, module) in self.modules.iter().enumerate() {
            if let Some(id) = ModuleId::from_index(idx) {
                self.module_name_to_id.entry(module.name).or_insert(id);
            }
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            if let Some(id) = NodeId::from_index(idx) {
                self.label_to_nodes.entry(node.label).or_default().push(id);
            }
        }
    }
}

impl MibRepository for MibTree {
    type Node = NodeId;
    type Module = ModuleId;

    fn root_level(&self) -> Option<NodeId> {
        self.root
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.get_node(node).and_then(|n| n.first_child)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.get_node(node).and_then(|n| n.next_sibling)
    }

    fn subid(&self, node: NodeId) -> u32 {
        self.get_node(node).map_or(0, |n| n.subid)
    }

    fn label(&self, node: NodeId) -> &str {
        self.get_node(node).map_or("", |n| self.strings.get(n.label))
    }

    fn module_of(&self, node: NodeId) -> Option<ModuleId> {
        self.get_node(node).and_then(|n| n.module)
    }

    fn module_name(&self, module: ModuleId) -> &str {
        self.get_module(module)
            .map_or("", |m| self.strings.get(m.name))
    }
}

/// Offsets start at zero, never decrease, end at the data length and fall
/// on character boundaries.
fn strings_well_formed(data: &str, offsets: &[u32]) -> bool {
    let Some((&first, _)) = offsets.split_first() else {
        return data.is_empty();
    };
    let last = offsets.last().copied().unwrap_or(first);
    first == 0
        && last as usize == data.len()
        && offsets.windows(2).all(|w| w[0] <= w[1])
        && offsets.iter().all(|&o| data.is_char_boundary(o as usize))
}

/// Check that the links form one tree: every node reached exactly once from
/// `root`, each under the parent it names, with in-range handles.
fn validate_links(
    strings: &StringInterner,
    modules: &[MibModule],
    nodes: &[MibNode],
    root: Option<NodeId>,
) -> Result<(), TreeError> {
    let check_str = |id: StrId| {
        if id.to_index() < strings.len() {
            Ok(())
        } else {
            Err(TreeError::UnknownString(id))
        }
    };
    for module in modules {
        check_str(module.name)?;
    }

    let mut visited = alloc::vec![false; nodes.len()];
    // (first node of a level, parent that level hangs from)
    let mut pending: Vec<(Option<NodeId>, Option<NodeId>)> = alloc::vec![(root, None)];

    while let Some((head, parent)) = pending.pop() {
        let mut current = head;
        while let Some(id) = current {
            let node = nodes.get(id.to_index()).ok_or(TreeError::UnknownNode(id))?;
            let seen = &mut visited[id.to_index()];
            if *seen {
                return Err(TreeError::RevisitedNode(id));
            }
            *seen = true;

            if node.parent != parent {
                return Err(TreeError::ParentMismatch(id));
            }
            check_str(node.label)?;
            if let Some(module) = node.module {
                if modules.get(module.to_index()).is_none() {
                    return Err(TreeError::UnknownModule(module));
                }
            }

            if node.first_child.is_some() {
                pending.push((node.first_child, Some(id)));
            }
            current = node.next_sibling;
        }
    }

    match visited.iter().position(|&seen| !seen) {
        Some(idx) => Err(NodeId::from_index(idx)
            .map_or(TreeError::Capacity { kind: CapacityKind::Nodes }, TreeError::Unreachable)),
        None => Ok(()),
    }
}

/// First-match descent used by both the builder and the finished tree.
fn find_path(nodes: &[MibNode], root: Option<NodeId>, arcs: &[u32]) -> Option<NodeId> {
    let mut level = root;
    let mut found = None;
    for &arc in arcs {
        let mut current = level;
        let node_id = loop {
            let id = current?;
            let node = nodes.get(id.to_index())?;
            if node.subid == arc {
                break id;
            }
            current = node.next_sibling;
        };
        found = Some(node_id);
        level = nodes.get(node_id.to_index())?.first_child;
    }
    found
}
