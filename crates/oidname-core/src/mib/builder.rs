//! Loading phase of the MIB tree.

use super::builtins::BUILTIN_OID_NODES;
use super::ids::{ModuleId, NodeId, StrId};
use super::interner::StringInterner;
use super::node::{MibModule, MibNode};
use super::{find_path, CapacityKind, MibTree, TreeError};
use crate::oid::Oid;
use alloc::vec::Vec;

/// Mutable tree under construction.
///
/// Children are appended to the end of their parent's sibling chain, so the
/// finished tree presents siblings in the order they were defined.
#[derive(Clone, Debug, Default)]
pub struct MibTreeBuilder {
    strings: StringInterner,
    modules: Vec<MibModule>,
    nodes: Vec<MibNode>,
    root: Option<NodeId>,
}

impl MibTreeBuilder {
    /// Start from an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the built-in roots (`iso`, `internet`, `enterprises`, ...).
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut builder = Self::new();
        builder
            .add_builtins()
            .map(|()| builder)
            .unwrap_or_default()
    }

    pub(super) fn from_storage(
        strings: StringInterner,
        modules: Vec<MibModule>,
        nodes: Vec<MibNode>,
        root: Option<NodeId>,
    ) -> Self {
        Self {
            strings,
            modules,
            nodes,
            root,
        }
    }

    fn add_builtins(&mut self) -> Result<(), TreeError> {
        let mut ids: Vec<NodeId> = Vec::with_capacity(BUILTIN_OID_NODES.len());
        for builtin in BUILTIN_OID_NODES {
            let module = builtin.module.map(|name| self.add_module(name)).transpose()?;
            let parent = builtin.parent.and_then(|idx| ids.get(idx).copied());
            let id = self.append_child(parent, builtin.arc, builtin.name, module)?;
            ids.push(id);
        }
        Ok(())
    }

    /// Register a module, returning the existing ID if the name is known.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Capacity`] if the module table is full.
    pub fn add_module(&mut self, name: &str) -> Result<ModuleId, TreeError> {
        if let Some(id) = self.module_id(name) {
            return Ok(id);
        }
        let name = self.intern(name)?;
        let id = ModuleId::from_index(self.modules.len()).ok_or(TreeError::Capacity {
            kind: CapacityKind::Modules,
        })?;
        self.modules.push(MibModule { name });
        Ok(id)
    }

    /// Get a module ID by name.
    #[must_use]
    pub fn module_id(&self, name: &str) -> Option<ModuleId> {
        let name = self.strings.find(name)?;
        self.modules
            .iter()
            .position(|m| m.name == name)
            .and_then(ModuleId::from_index)
    }

    /// Append a node to the end of `parent`'s children, or to the top level
    /// when `parent` is `None`.
    ///
    /// No check is made for an existing sibling with the same sub-identifier;
    /// resolution takes whichever comes first.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] / [`TreeError::UnknownModule`] for
    /// foreign handles and [`TreeError::Capacity`] when storage is full.
    pub fn append_child(
        &mut self,
        parent: Option<NodeId>,
        subid: u32,
        label: &str,
        module: Option<ModuleId>,
    ) -> Result<NodeId, TreeError> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        if let Some(module) = module {
            if self.modules.get(module.to_index()).is_none() {
                return Err(TreeError::UnknownModule(module));
            }
        }

        let label = self.intern(label)?;
        let id = NodeId::from_index(self.nodes.len()).ok_or(TreeError::Capacity {
            kind: CapacityKind::Nodes,
        })?;
        let mut node = MibNode::new(subid, label, module);
        node.parent = parent;
        self.nodes.push(node);

        let head = match parent {
            Some(parent) => self.node(parent)?.first_child,
            None => self.root,
        };
        match self.last_sibling(head) {
            Some(tail) => self.node_mut(tail)?.next_sibling = Some(id),
            None => match parent {
                Some(parent) => self.node_mut(parent)?.first_child = Some(id),
                None => self.root = Some(id),
            },
        }
        Ok(id)
    }

    /// Define `label` at the OID `arcs`.
    ///
    /// The parent (`arcs` minus its last arc) must already be defined, except
    /// for top-level definitions. Redefining the same label at the same OID
    /// returns the existing node. A different label at an occupied OID is
    /// added as an alias sibling after the existing one.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyOid`] for an empty path and
    /// [`TreeError::MissingParent`] when the parent is not defined.
    pub fn define(
        &mut self,
        arcs: &[u32],
        label: &str,
        module: Option<ModuleId>,
    ) -> Result<NodeId, TreeError> {
        let Some((&subid, parent_arcs)) = arcs.split_last() else {
            return Err(TreeError::EmptyOid);
        };
        let parent = if parent_arcs.is_empty() {
            None
        } else {
            Some(self.find(parent_arcs).ok_or_else(|| TreeError::MissingParent {
                oid: Oid::from_slice(arcs),
            })?)
        };

        let head = match parent {
            Some(parent) => self.node(parent)?.first_child,
            None => self.root,
        };
        if let Some(label_id) = self.strings.find(label) {
            if let Some(existing) = self.find_sibling(head, subid, label_id) {
                return Ok(existing);
            }
        }
        self.append_child(parent, subid, label, module)
    }

    /// Find the node at exactly `arcs`, following first matches.
    #[must_use]
    pub fn find(&self, arcs: &[u32]) -> Option<NodeId> {
        find_path(&self.nodes, self.root, arcs)
    }

    /// Get the number of nodes defined so far.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Freeze the tree for resolution.
    #[must_use]
    pub fn finish(self) -> MibTree {
        MibTree::from_storage(self.strings, self.modules, self.nodes, self.root)
    }

    fn intern(&mut self, s: &str) -> Result<StrId, TreeError> {
        self.strings.intern(s).ok_or(TreeError::Capacity {
            kind: CapacityKind::Strings,
        })
    }

    fn node(&self, id: NodeId) -> Result<&MibNode, TreeError> {
        self.nodes
            .get(id.to_index())
            .ok_or(TreeError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut MibNode, TreeError> {
        self.nodes
            .get_mut(id.to_index())
            .ok_or(TreeError::UnknownNode(id))
    }

    fn last_sibling(&self, head: Option<NodeId>) -> Option<NodeId> {
        let mut current = head?;
        while let Some(next) = self.nodes.get(current.to_index())?.next_sibling {
            current = next;
        }
        Some(current)
    }

    fn find_sibling(&self, head: Option<NodeId>, subid: u32, label: StrId) -> Option<NodeId> {
        let mut current = head;
        while let Some(id) = current {
            let node = self.nodes.get(id.to_index())?;
            if node.subid == subid && node.label == label {
                return Some(id);
            }
            current = node.next_sibling;
        }
        None
    }
}
