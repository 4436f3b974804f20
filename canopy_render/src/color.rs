// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The color/focus deriver shared by every strategy.

use canopy_imaging::Hsb;
use canopy_tree::TreeSource;

use crate::RenderContext;

/// Brightness of focused nodes. Focused reads darker and more saturated.
const FOCUSED_BRIGHTNESS: u8 = 100;
/// Brightness of unfocused nodes.
const UNFOCUSED_BRIGHTNESS: u8 = 200;
/// Saturation used when no saturation attribute is configured.
const DEFAULT_SATURATION: u8 = 200;

/// A stable 31-based hash over a category string's UTF-8 bytes.
///
/// Hue assignment must be reproducible across runs and platforms so that
/// the same category always gets the same color; this hash is the documented
/// mapping, not an implementation detail.
#[must_use]
pub fn category_hash(category: &str) -> i32 {
    let mut hash: i32 = 0;
    for byte in category.bytes() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(byte));
    }
    hash
}

/// Derives the HSB color for a node.
///
/// Non-highlighted nodes are a fixed desaturated gray, varying only by
/// focus. Highlighted nodes take their hue from the hue category attribute
/// (hue 0 when absent), their saturation from the saturation attribute
/// normalized by the tree-wide maximum, and their brightness from the focus
/// state. Degradations for absent inputs:
///
/// - no highlight attribute: every node counts as highlighted;
/// - no hue attribute, or no value for this node: hue 0;
/// - no saturation attribute: saturation 200;
/// - saturation maximum never computed: saturation 0 (no normalization
///   available);
/// - saturation maximum of 0: full saturation.
#[must_use]
pub fn hsb_for<T: TreeSource + ?Sized>(
    ctx: &RenderContext<'_, T>,
    node: T::NodeId,
    focused: bool,
) -> Hsb {
    let brightness = if focused {
        FOCUSED_BRIGHTNESS
    } else {
        UNFOCUSED_BRIGHTNESS
    };
    let highlighted = ctx
        .highlight
        .is_none_or(|attr| attr.evaluate(ctx.tree, node));
    if !highlighted {
        return Hsb::new(180, 0, brightness);
    }

    let hue = match ctx.hue.and_then(|attr| attr.evaluate(ctx.tree, node)) {
        #[expect(clippy::cast_possible_truncation, reason = "reduced modulo 360")]
        Some(category) => (category_hash(&category).unsigned_abs() % 360) as u16,
        None => 0,
    };

    let saturation = match ctx.saturation {
        None => DEFAULT_SATURATION,
        Some(attr) => match ctx.max_saturation {
            None => 0,
            Some(0) => 255,
            Some(max) => {
                let scaled = 255 * attr.evaluate(ctx.tree, node) / max;
                #[expect(clippy::cast_possible_truncation, reason = "clamped to 0..=255")]
                {
                    scaled.clamp(0, 255) as u8
                }
            }
        },
    };

    Hsb::new(hue, saturation, brightness)
}
