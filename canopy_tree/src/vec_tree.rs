// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small append-only arena tree.

use alloc::vec::Vec;

use crate::TreeSource;

/// Identifier for a node in a [`VecTree`].
///
/// This is a plain slot index: [`VecTree`] is append-only, so ids stay valid
/// for the lifetime of the tree and no generation counter is needed.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

struct Entry<P> {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    payload: P,
}

/// An append-only arena tree with per-node payloads.
///
/// This is a convenience implementation of [`TreeSource`] for embedders that
/// do not already have a tree store, and the tree used throughout the Canopy
/// test suites. Nodes are added top-down with [`VecTree::push_root`] and
/// [`VecTree::push_child`]; the structure is never mutated afterwards except
/// by appending more children.
///
/// # Example
///
/// ```
/// use canopy_tree::{TreeSource, VecTree};
///
/// let mut tree = VecTree::new();
/// let root = tree.push_root(4_i64);
/// let a = tree.push_child(root, 3);
/// let b = tree.push_child(root, 1);
///
/// assert_eq!(tree.child_count(root), 2);
/// assert_eq!(tree.parent(a), Some(root));
/// assert_eq!(*tree.payload(b), 1);
/// ```
pub struct VecTree<P> {
    nodes: Vec<Entry<P>>,
}

impl<P> VecTree<P> {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Returns the root node, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds the root node.
    ///
    /// # Panics
    ///
    /// Panics if the tree already has a root.
    pub fn push_root(&mut self, payload: P) -> NodeId {
        assert!(self.nodes.is_empty(), "VecTree already has a root");
        self.nodes.push(Entry {
            parent: None,
            children: Vec::new(),
            payload,
        });
        NodeId(0)
    }

    /// Adds a child of `parent`, after any existing children.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a node of this tree.
    pub fn push_child(&mut self, parent: NodeId, payload: P) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).expect("VecTree node count exceeds u32"));
        self.nodes.push(Entry {
            parent: Some(parent),
            children: Vec::new(),
            payload,
        });
        self.nodes[parent.idx()].children.push(id);
        id
    }

    /// Returns the payload of `node`.
    #[must_use]
    pub fn payload(&self, node: NodeId) -> &P {
        &self.nodes[node.idx()].payload
    }

    /// Returns a mutable reference to the payload of `node`.
    #[must_use]
    pub fn payload_mut(&mut self, node: NodeId) -> &mut P {
        &mut self.nodes[node.idx()].payload
    }
}

impl<P> Default for VecTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> core::fmt::Debug for VecTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VecTree")
            .field("len", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl<P> TreeSource for VecTree<P> {
    type NodeId = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.idx()].parent
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.nodes[node.idx()].children.len()
    }

    fn child(&self, node: NodeId, index: usize) -> NodeId {
        self.nodes[node.idx()].children[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_read() {
        let mut tree = VecTree::new();
        let root = tree.push_root("r");
        let a = tree.push_child(root, "a");
        let b = tree.push_child(root, "b");
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.child(root, 0), a);
        assert_eq!(tree.child(root, 1), b);
        *tree.payload_mut(b) = "b2";
        assert_eq!(*tree.payload(b), "b2");
    }

    #[test]
    fn empty_tree_has_no_root() {
        let tree: VecTree<()> = VecTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    #[should_panic(expected = "already has a root")]
    fn second_root_panics() {
        let mut tree = VecTree::new();
        tree.push_root(());
        tree.push_root(());
    }
}
