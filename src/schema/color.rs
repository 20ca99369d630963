//! Color type shared by configuration and rasterization.

use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the color channels by `factor`, leaving alpha untouched.
    #[inline]
    pub fn shaded(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
            a: self.a,
        }
    }

    /// Same color with a different alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Source-over composite of `self` onto an opaque 8-bit destination.
    #[inline]
    pub fn over(self, dst: [u8; 4]) -> [u8; 4] {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |src: f32, dst: u8| {
            let d = dst as f32 / 255.0;
            to_u8(src * a + d * (1.0 - a))
        };
        [
            mix(self.r, dst[0]),
            mix(self.g, dst[1]),
            mix(self.b, dst[2]),
            255,
        ]
    }

    /// Convert to 8-bit channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    /// Check that every channel lies in `[0, 1]`.
    pub fn is_normalized(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
