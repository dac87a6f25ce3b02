//! Read-only access to a MIB symbol tree.
//!
//! Resolution only needs a handful of primitives: where the top level
//! starts, how to step to the next sibling or down to the first child, and
//! what each node is called. [`MibRepository`] captures exactly that so the
//! walker works over [`MibTree`](super::MibTree) or any other tree that can
//! expose the same links.

/// Traversal primitives over a loaded MIB tree.
///
/// Handles are small `Copy` values; the repository owns the nodes. Labels
/// and module names are borrowed from the repository and copied out by the
/// resolver, so nothing produced by resolution refers back into the tree.
pub trait MibRepository {
    /// Node handle.
    type Node: Copy;
    /// Module handle.
    type Module: Copy;

    /// First node of the top level, or `None` if nothing is loaded.
    fn root_level(&self) -> Option<Self::Node>;

    /// First node of the level below `node`.
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Next node at the same level as `node`.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Sub-identifier `node` matches at its level.
    fn subid(&self, node: Self::Node) -> u32;

    /// Symbolic name of `node`.
    fn label(&self, node: Self::Node) -> &str;

    /// Module `node` is defined in, if any.
    fn module_of(&self, node: Self::Node) -> Option<Self::Module>;

    /// Name of `module`. An empty name means no module affiliation.
    fn module_name(&self, module: Self::Module) -> &str;

    /// Iterate a sibling chain starting at `first`, in repository order.
    fn siblings(&self, first: Option<Self::Node>) -> Siblings<'_, Self> {
        Siblings {
            repo: self,
            next: first,
        }
    }
}

/// Lazy iterator over one sibling chain.
///
/// Created by [`MibRepository::siblings`]; restart by calling it again.
pub struct Siblings<'a, R: MibRepository + ?Sized> {
    repo: &'a R,
    next: Option<R::Node>,
}

impl<R: MibRepository + ?Sized> Iterator for Siblings<'_, R> {
    type Item = R::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.repo.next_sibling(current);
        Some(current)
    }
}

impl<R: MibRepository + ?Sized> MibRepository for &R {
    type Node = R::Node;
    type Module = R::Module;

    fn root_level(&self) -> Option<Self::Node> {
        (**self).root_level()
    }

    fn first_child(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).first_child(node)
    }

    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        (**self).next_sibling(node)
    }

    fn subid(&self, node: Self::Node) -> u32 {
        (**self).subid(node)
    }

    fn label(&self, node: Self::Node) -> &str {
        (**self).label(node)
    }

    fn module_of(&self, node: Self::Node) -> Option<Self::Module> {
        (**self).module_of(node)
    }

    fn module_name(&self, module: Self::Module) -> &str {
        (**self).module_name(module)
    }
}
