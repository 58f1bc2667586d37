//! RGBA color representation and compositing.

use serde::{Deserialize, Serialize};

/// RGBA color, every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Opacity
    pub a: f32,
}

impl Color {
    /// Build a color; out-of-range channels are clamped.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Opaque color.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Convert to 8-bit RGB channels, dropping alpha.
    #[must_use]
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        ]
    }

    /// Same color with a different alpha.
    #[must_use]
    pub fn with_alpha(&self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Channel-wise blend toward `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: f32, to: f32| (to - from).mul_add(t, from);
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Composite this color over an opaque background ("source over").
    ///
    /// The result is opaque. Used by backends that cannot blend natively.
    #[must_use]
    pub fn over(&self, background: &Self) -> Self {
        let a = self.a;
        Self::rgb(
            self.r * a + background.r * (1.0 - a),
            self.g * a + background.g * (1.0 - a),
            self.b * a + background.b * (1.0 - a),
        )
    }

    // Common colors
    /// Black color
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// White color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    /// Pure blue
    pub const BLUE: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 1.0,
        a: 1.0,
    };
    /// Pure red
    pub const RED: Self = Self {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_clamps_channels() {
        let c = Color::new(1.5, -0.5, 0.5, 2.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.b, 0.5);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_to_rgb8_rounds() {
        assert_eq!(Color::rgb(0.5, 0.25, 1.0).to_rgb8(), [128, 64, 255]);
    }

    #[test]
    fn test_color_lerp_midpoint() {
        let mid = Color::BLUE.lerp(&Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 0.001);
        assert!((mid.g - 0.5).abs() < 0.001);
        assert_eq!(mid.b, 1.0);
    }

    #[test]
    fn test_over_white() {
        let c = Color::RED.with_alpha(0.8).over(&Color::WHITE);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 0.2).abs() < 0.001);
        assert!((c.b - 0.2).abs() < 0.001);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn test_over_transparent_is_background() {
        let c = Color::TRANSPARENT.over(&Color::WHITE);
        assert_eq!(c, Color::WHITE);
    }

    proptest! {
        #[test]
        fn prop_channels_stay_in_unit_range(r in -1.0f32..2.0, g in -1.0f32..2.0, b in -1.0f32..2.0, a in -1.0f32..2.0) {
            let c = Color::new(r, g, b, a);
            for channel in [c.r, c.g, c.b, c.a] {
                prop_assert!((0.0..=1.0).contains(&channel));
            }
        }

        #[test]
        fn prop_over_is_opaque_and_between(a in 0.0f32..=1.0, r in 0.0f32..=1.0) {
            let c = Color::new(r, 0.0, 0.0, a).over(&Color::WHITE);
            prop_assert_eq!(c.a, 1.0);
            prop_assert!(c.r >= r - 1e-6);
            prop_assert!(c.g <= 1.0 && c.g >= 0.0);
        }
    }
}
