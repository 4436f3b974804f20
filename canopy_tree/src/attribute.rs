// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute evaluators: pure functions from a tree node to a value.
//!
//! Renderers are parameterized by attributes rather than by node payloads,
//! so the same tree can be visualized by size, by call count, by allocated
//! bytes, and so on, without touching the tree store. Three value domains
//! are supported: numeric ([`NumericAttribute`]), text ([`TextAttribute`]),
//! and boolean ([`BoolAttribute`]).

use alloc::string::String;
use core::marker::PhantomData;

use crate::{TreeSource, subtree_height};

/// A pure function from a node to an `i64`.
///
/// Attributes that drive a layout's size channel must be *inclusive*: a
/// node's value must be greater than or equal to the sum of its children's
/// values. Non-inclusive attributes are fine for secondary channels such as
/// Highrise height or color saturation.
pub trait NumericAttribute<T: TreeSource + ?Sized> {
    /// Human-readable attribute name, used by hosts for menus and overlays.
    fn name(&self) -> &str;

    /// Evaluates the attribute for `node`.
    fn evaluate(&self, tree: &T, node: T::NodeId) -> i64;
}

/// A pure function from a node to an optional text value.
///
/// `None` means the attribute is absent for that node; consumers degrade to
/// documented defaults (e.g. no hue categorization, empty label).
pub trait TextAttribute<T: TreeSource + ?Sized> {
    /// Human-readable attribute name.
    fn name(&self) -> &str;

    /// Evaluates the attribute for `node`.
    fn evaluate(&self, tree: &T, node: T::NodeId) -> Option<String>;
}

/// A pure function from a node to a boolean.
pub trait BoolAttribute<T: TreeSource + ?Sized> {
    /// Human-readable attribute name.
    fn name(&self) -> &str;

    /// Evaluates the attribute for `node`.
    fn evaluate(&self, tree: &T, node: T::NodeId) -> bool;
}

/// A numeric attribute that yields the same value for every node.
#[derive(Clone, Copy, Debug)]
pub struct NumericConstant {
    name: &'static str,
    value: i64,
}

impl NumericConstant {
    /// Creates a constant numeric attribute.
    pub const fn new(name: &'static str, value: i64) -> Self {
        Self { name, value }
    }
}

impl<T: TreeSource + ?Sized> NumericAttribute<T> for NumericConstant {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, _tree: &T, _node: T::NodeId) -> i64 {
        self.value
    }
}

/// A text attribute that yields the same value for every node.
///
/// A `None` value models a deliberately absent attribute, for example hue
/// categorization switched off.
#[derive(Clone, Copy, Debug)]
pub struct TextConstant {
    name: &'static str,
    value: Option<&'static str>,
}

impl TextConstant {
    /// Creates a constant text attribute.
    pub const fn new(name: &'static str, value: Option<&'static str>) -> Self {
        Self { name, value }
    }
}

impl<T: TreeSource + ?Sized> TextAttribute<T> for TextConstant {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, _tree: &T, _node: T::NodeId) -> Option<String> {
        self.value.map(String::from)
    }
}

/// A boolean attribute that yields the same value for every node.
#[derive(Clone, Copy, Debug)]
pub struct BoolConstant {
    name: &'static str,
    value: bool,
}

impl BoolConstant {
    /// Creates a constant boolean attribute.
    pub const fn new(name: &'static str, value: bool) -> Self {
        Self { name, value }
    }
}

impl<T: TreeSource + ?Sized> BoolAttribute<T> for BoolConstant {
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, _tree: &T, _node: T::NodeId) -> bool {
        self.value
    }
}

/// Number of direct children of a node.
///
/// The default Highrise height attribute.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChildCount;

impl<T: TreeSource + ?Sized> NumericAttribute<T> for ChildCount {
    fn name(&self) -> &str {
        "Child count"
    }

    fn evaluate(&self, tree: &T, node: T::NodeId) -> i64 {
        i64::try_from(tree.child_count(node)).unwrap_or(i64::MAX)
    }
}

/// Number of leaves in the subtree rooted at a node.
///
/// Inclusive by construction (a node's leaf count equals the sum of its
/// children's, or 1 for a leaf), which makes it a safe default size
/// attribute.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeafCount;

impl<T: TreeSource + ?Sized> NumericAttribute<T> for LeafCount {
    fn name(&self) -> &str {
        "Leaf count"
    }

    fn evaluate(&self, tree: &T, node: T::NodeId) -> i64 {
        if tree.child_count(node) == 0 {
            1
        } else {
            tree.children(node)
                .map(|child| self.evaluate(tree, child))
                .sum()
        }
    }
}

/// Number of levels on the longest downward path from a node (a leaf is 1).
#[derive(Clone, Copy, Debug, Default)]
pub struct SubtreeHeight;

impl<T: TreeSource + ?Sized> NumericAttribute<T> for SubtreeHeight {
    fn name(&self) -> &str {
        "Height"
    }

    fn evaluate(&self, tree: &T, node: T::NodeId) -> i64 {
        subtree_height(tree, node)
    }
}

/// A numeric attribute backed by a closure. See [`numeric_fn`].
pub struct NumericFn<T: TreeSource + ?Sized, F> {
    name: &'static str,
    f: F,
    _marker: PhantomData<fn(&T)>,
}

/// Wraps a closure as a [`NumericAttribute`].
pub fn numeric_fn<T, F>(name: &'static str, f: F) -> NumericFn<T, F>
where
    T: TreeSource + ?Sized,
    F: Fn(&T, T::NodeId) -> i64,
{
    NumericFn {
        name,
        f,
        _marker: PhantomData,
    }
}

impl<T, F> NumericAttribute<T> for NumericFn<T, F>
where
    T: TreeSource + ?Sized,
    F: Fn(&T, T::NodeId) -> i64,
{
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, tree: &T, node: T::NodeId) -> i64 {
        (self.f)(tree, node)
    }
}

impl<T: TreeSource + ?Sized, F> core::fmt::Debug for NumericFn<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NumericFn").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A text attribute backed by a closure. See [`text_fn`].
pub struct TextFn<T: TreeSource + ?Sized, F> {
    name: &'static str,
    f: F,
    _marker: PhantomData<fn(&T)>,
}

/// Wraps a closure as a [`TextAttribute`].
pub fn text_fn<T, F>(name: &'static str, f: F) -> TextFn<T, F>
where
    T: TreeSource + ?Sized,
    F: Fn(&T, T::NodeId) -> Option<String>,
{
    TextFn {
        name,
        f,
        _marker: PhantomData,
    }
}

impl<T, F> TextAttribute<T> for TextFn<T, F>
where
    T: TreeSource + ?Sized,
    F: Fn(&T, T::NodeId) -> Option<String>,
{
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, tree: &T, node: T::NodeId) -> Option<String> {
        (self.f)(tree, node)
    }
}

impl<T: TreeSource + ?Sized, F> core::fmt::Debug for TextFn<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextFn").field("name", &self.name).finish_non_exhaustive()
    }
}

/// A boolean attribute backed by a closure. See [`bool_fn`].
pub struct BoolFn<T: TreeSource + ?Sized, F> {
    name: &'static str,
    f: F,
    _marker: PhantomData<fn(&T)>,
}

/// Wraps a closure as a [`BoolAttribute`].
pub fn bool_fn<T, F>(name: &'static str, f: F) -> BoolFn<T, F>
where
    T: TreeSource + ?Sized,
    F: Fn(&T, T::NodeId) -> bool,
{
    BoolFn {
        name,
        f,
        _marker: PhantomData,
    }
}

impl<T, F> BoolAttribute<T> for BoolFn<T, F>
where
    T: TreeSource + ?Sized,
    F: Fn(&T, T::NodeId) -> bool,
{
    fn name(&self) -> &str {
        self.name
    }

    fn evaluate(&self, tree: &T, node: T::NodeId) -> bool {
        (self.f)(tree, node)
    }
}

impl<T: TreeSource + ?Sized, F> core::fmt::Debug for BoolFn<T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BoolFn").field("name", &self.name).finish_non_exhaustive()
    }
}
