// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cached attribute extrema with explicit invalidation.

use canopy_tree::{NumericAttribute, TreeSource, max_numeric};

/// The cached maximum of a numeric attribute over the whole tree.
///
/// Strategies that normalize by a maximum (Highrise band heights, color
/// saturation) keep one of these. The value is recomputed only on demand:
/// the host marks it dirty when the tree or the driving attribute changes,
/// then calls [`MaxStatistic::recompute`] before the next pass. A stale
/// value silently produces wrong scaling, not a crash, so that sequencing
/// is part of the correctness contract, not an optimization.
///
/// [`MaxStatistic::value`] is `None` until the first recompute; consumers
/// must treat that as "no normalization available" rather than dividing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxStatistic {
    value: Option<i64>,
    dirty: bool,
}

impl MaxStatistic {
    /// Creates an uninitialized, dirty statistic.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: None,
            dirty: true,
        }
    }

    /// Marks the cached value as stale.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns `true` if [`Self::recompute`] is needed before use.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the cached maximum, or `None` if never computed.
    #[must_use]
    pub const fn value(&self) -> Option<i64> {
        self.value
    }

    /// Walks the whole subtree under `root` (ignoring any cutoff) and
    /// caches the attribute maximum. Idempotent; a no-op when clean.
    pub fn recompute<T: TreeSource + ?Sized>(
        &mut self,
        tree: &T,
        root: T::NodeId,
        attr: &dyn NumericAttribute<T>,
    ) {
        if !self.dirty {
            return;
        }
        self.value = Some(max_numeric(tree, root, attr));
        self.dirty = false;
    }
}

impl Default for MaxStatistic {
    fn default() -> Self {
        Self::new()
    }
}
