// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-pass view of the snapshot a renderer works from.

use alloc::string::String;
use core::fmt;

use canopy_property::Configuration;
use canopy_tree::{BoolAttribute, NumericAttribute, TextAttribute, TreeSource};

use crate::{CUTOFF, FOCUS_SAME};

/// Everything a render or hit-test pass reads, borrowed from the host.
///
/// The context is assembled fresh for each pass and never retained by a
/// renderer. The tree and the attributes must not change for the duration of
/// the pass; mutation means building a new context (and invalidating cached
/// statistics).
///
/// Scalar knobs (gaps, cutoff, label visibility) deliberately do *not* live
/// here: they are read fresh from the [`Configuration`] on every call, so a
/// shared configuration updates all views that use it.
pub struct RenderContext<'a, T: TreeSource + ?Sized> {
    /// The tree snapshot.
    pub tree: &'a T,
    /// The tree's true root. Cutoff thresholds and statistics are computed
    /// against the root even when a subtree is displayed.
    pub root: T::NodeId,
    /// The node displayed as the root of the visible subtree (zoom target).
    pub top: T::NodeId,
    /// The node under pointer focus, if any.
    pub current: Option<T::NodeId>,
    /// The size attribute driving every spatial partition. Must be
    /// inclusive: a node's size ≥ the sum of its children's sizes.
    pub size: &'a dyn NumericAttribute<T>,
    /// The label attribute, used for text and for focus-same matching.
    pub label: &'a dyn TextAttribute<T>,
    /// Height attribute for the Highrise strategy. `None` falls back to the
    /// child count.
    pub height: Option<&'a dyn NumericAttribute<T>>,
    /// Hue category attribute. `None` means no color categorization.
    pub hue: Option<&'a dyn TextAttribute<T>>,
    /// Saturation attribute. `None` renders at the default saturation.
    pub saturation: Option<&'a dyn NumericAttribute<T>>,
    /// Highlight attribute; nodes evaluating to `false` are drawn gray.
    /// `None` means every node is highlighted.
    pub highlight: Option<&'a dyn BoolAttribute<T>>,
    /// Maximum of the saturation attribute over the whole tree, or `None`
    /// if never computed. See [`crate::MaxStatistic`].
    pub max_saturation: Option<i64>,
}

impl<'a, T: TreeSource + ?Sized> RenderContext<'a, T> {
    /// Creates a context with the required channels; the optional color and
    /// height channels start out absent.
    pub fn new(
        tree: &'a T,
        root: T::NodeId,
        top: T::NodeId,
        size: &'a dyn NumericAttribute<T>,
        label: &'a dyn TextAttribute<T>,
    ) -> Self {
        Self {
            tree,
            root,
            top,
            current: None,
            size,
            label,
            height: None,
            hue: None,
            saturation: None,
            highlight: None,
            max_saturation: None,
        }
    }

    /// Evaluates the size attribute for `node`.
    #[inline]
    pub fn size_of(&self, node: T::NodeId) -> i64 {
        self.size.evaluate(self.tree, node)
    }

    /// Returns the minimum size a node needs to be rendered, in the size
    /// attribute's units: `cutoff * size(root) / 1000`.
    pub fn cutoff_threshold(&self, configuration: &Configuration) -> i64 {
        i64::from(configuration.int(CUTOFF)) * self.size_of(self.root) / 1000
    }

    /// Evaluates the label attribute for `node`; absent labels become the
    /// empty string.
    pub fn label_of(&self, node: T::NodeId) -> String {
        self.label.evaluate(self.tree, node).unwrap_or_default()
    }

    /// Returns whether `node` is focused: it is the current node, or
    /// focus-same mode is on and it shares the current node's label.
    ///
    /// Absent labels never match, even against each other.
    pub fn is_focused(&self, configuration: &Configuration, node: T::NodeId) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        if node == current {
            return true;
        }
        if !configuration.boolean(FOCUS_SAME) {
            return false;
        }
        match (
            self.label.evaluate(self.tree, node),
            self.label.evaluate(self.tree, current),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: TreeSource + ?Sized> fmt::Debug for RenderContext<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("root", &self.root)
            .field("top", &self.top)
            .field("current", &self.current)
            .field("size", &self.size.name())
            .field("max_saturation", &self.max_saturation)
            .finish_non_exhaustive()
    }
}
