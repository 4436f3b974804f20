// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Tree: tree-source abstraction and attribute evaluators.
//!
//! This crate defines the narrow contract the Canopy renderers consume:
//!
//! - [`TreeSource`]: id-based read access to an immutable tree snapshot
//!   (parent link, ordered children). The tree data itself is owned by the
//!   embedder; renderers only ever see node ids.
//! - Attribute evaluators ([`NumericAttribute`], [`TextAttribute`],
//!   [`BoolAttribute`]): pure functions from a node to a numeric, text, or
//!   boolean value. Numeric attributes used to drive sizes must be
//!   *inclusive*: a node's value must be greater than or equal to the sum of
//!   its children's values. This is a caller contract; violating it produces
//!   undefined (but non-panicking) geometry.
//! - Walk helpers: [`path_length_to_root`], [`subtree_height`], and
//!   [`max_numeric`] for whole-tree attribute extrema.
//! - [`VecTree`]: a small append-only arena tree for embedders that do not
//!   already have a tree store, and for tests and benchmarks.
//!
//! Trees are treated as immutable during one render or hit-test pass;
//! mutating the underlying store invalidates cached statistics computed from
//! it (see `canopy_render`).

#![no_std]

extern crate alloc;

mod attribute;
mod vec_tree;

pub use attribute::{
    BoolAttribute, BoolConstant, BoolFn, ChildCount, LeafCount, NumericAttribute, NumericConstant,
    NumericFn, SubtreeHeight, TextAttribute, TextConstant, TextFn, bool_fn, numeric_fn, text_fn,
};
pub use vec_tree::{NodeId, VecTree};

use core::fmt;

/// Read access to an immutable tree snapshot.
///
/// Nodes are identified by a small copyable handle. The parent link is a
/// back-reference only; children are an ordered sequence, and the visual
/// partition of space follows that order.
pub trait TreeSource {
    /// Node handle. Stable for the lifetime of the snapshot.
    type NodeId: Copy + Eq + fmt::Debug;

    /// Returns the parent of `node`, or `None` for the true root.
    fn parent(&self, node: Self::NodeId) -> Option<Self::NodeId>;

    /// Returns the number of children of `node`.
    fn child_count(&self, node: Self::NodeId) -> usize;

    /// Returns the child of `node` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.child_count(node)`.
    fn child(&self, node: Self::NodeId, index: usize) -> Self::NodeId;

    /// Returns an iterator over the children of `node` in sequence order.
    fn children(&self, node: Self::NodeId) -> Children<'_, Self> {
        Children {
            tree: self,
            node,
            index: 0,
            count: self.child_count(node),
        }
    }
}

/// Iterator over the children of a node, in sequence order.
///
/// Created by [`TreeSource::children`].
pub struct Children<'a, T: TreeSource + ?Sized> {
    tree: &'a T,
    node: T::NodeId,
    index: usize,
    count: usize,
}

impl<T: TreeSource + ?Sized> Iterator for Children<'_, T> {
    type Item = T::NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.count {
            let child = self.tree.child(self.node, self.index);
            self.index += 1;
            Some(child)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: TreeSource + ?Sized> ExactSizeIterator for Children<'_, T> {}

impl<T: TreeSource + ?Sized> fmt::Debug for Children<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children")
            .field("node", &self.node)
            .field("index", &self.index)
            .field("count", &self.count)
            .finish()
    }
}

/// Returns the number of edges on the path from the true root down to `node`.
///
/// The true root itself has path length 0. Layouts that key orientation or
/// depth off the *absolute* tree position (such as the TreeMap's split
/// parity) use this so that zooming to a subtree preserves per-depth
/// appearance.
pub fn path_length_to_root<T: TreeSource + ?Sized>(tree: &T, node: T::NodeId) -> u32 {
    let mut length = 0;
    let mut cursor = node;
    while let Some(parent) = tree.parent(cursor) {
        length += 1;
        cursor = parent;
    }
    length
}

/// Returns the number of levels on the longest downward path from `node`.
///
/// A leaf has height 1. This is the band count of the Linear layout.
pub fn subtree_height<T: TreeSource + ?Sized>(tree: &T, node: T::NodeId) -> i64 {
    let mut deepest = 0;
    for child in tree.children(node) {
        deepest = deepest.max(subtree_height(tree, child));
    }
    1 + deepest
}

/// Returns the maximum of a numeric attribute over the whole subtree rooted
/// at `root`, visiting every node regardless of any cutoff.
pub fn max_numeric<T: TreeSource + ?Sized>(
    tree: &T,
    root: T::NodeId,
    attr: &dyn NumericAttribute<T>,
) -> i64 {
    let mut max = attr.evaluate(tree, root);
    for child in tree.children(root) {
        max = max.max(max_numeric(tree, child, attr));
    }
    max
}
