// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hue/saturation/brightness node colors.

use peniko::Color;

/// A color in hue/saturation/brightness form.
///
/// The renderers derive node colors in HSB because the components map
/// directly onto the three visual channels a tree view drives independently:
/// hue from a category attribute, saturation from a numeric attribute, and
/// brightness from the focus state. Conversion to RGB happens only at the
/// [`Hsb::to_color`] boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hsb {
    /// Hue in degrees, `0..360`.
    pub hue: u16,
    /// Saturation, `0` (gray) to `255` (fully saturated).
    pub saturation: u8,
    /// Brightness, `0` (black) to `255` (full brightness).
    pub brightness: u8,
}

impl Hsb {
    /// Creates an HSB color. The hue is reduced modulo 360.
    #[must_use]
    pub const fn new(hue: u16, saturation: u8, brightness: u8) -> Self {
        Self {
            hue: hue % 360,
            saturation,
            brightness,
        }
    }

    /// Converts to an opaque RGB [`Color`].
    #[must_use]
    pub fn to_color(self) -> Color {
        let v = f64::from(self.brightness) / 255.0;
        if self.saturation == 0 {
            let g = channel(v);
            return Color::from_rgb8(g, g, g);
        }
        let s = f64::from(self.saturation) / 255.0;
        // Split the hue into a 60-degree sector and a fractional position
        // within it; integer division keeps this exact without a floor call.
        let sector = self.hue % 360 / 60;
        let f = f64::from(self.hue % 60) / 60.0;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        let (r, g, b) = match sector {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Color::from_rgb8(channel(r), channel(g), channel(b))
    }
}

/// Maps a unit-interval channel to `0..=255` with rounding.
#[expect(clippy::cast_possible_truncation, reason = "float-to-int casts saturate")]
fn channel(x: f64) -> u8 {
    (x * 255.0 + 0.5) as u8
}
