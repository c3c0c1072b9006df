//! Texture-space projection of hit UVs

use crate::core::TextureConfig;
use crate::core::types::{IVec2, Vec2};

/// Pixel grid of the texture painted through a mesh's UVs.
///
/// Image rows grow downward while V grows upward, so V is flipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureSpace {
    pub width: u32,
    pub height: u32,
}

/// UVs this far outside `[0, 1]` are still treated as lying on the edge.
///
/// Barycentric blends of hits on a mesh's border land a few ulps outside
/// the unit square.
pub const UV_EDGE_TOLERANCE: f32 = 1e-4;

impl TextureSpace {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel containing `uv`, or `None` if `uv` lies outside `[0, 1]^2` or
    /// the texture has no pixels.
    ///
    /// `u = 1` and `v = 0` land on the last column and row rather than one
    /// past the edge. Coordinates within [`UV_EDGE_TOLERANCE`] of the unit
    /// square are clamped onto it.
    pub fn texel(&self, uv: Vec2) -> Option<IVec2> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let range = -UV_EDGE_TOLERANCE..=1.0 + UV_EDGE_TOLERANCE;
        if !range.contains(&uv.x) || !range.contains(&uv.y) {
            return None;
        }
        let uv = uv.clamp(Vec2::ZERO, Vec2::ONE);

        let w = self.width as f32;
        let h = self.height as f32;
        let x = ((uv.x * w) as i32).min(self.width as i32 - 1);
        let y = ((h - uv.y * h) as i32).min(self.height as i32 - 1);
        Some(IVec2::new(x, y))
    }
}

impl From<&TextureConfig> for TextureSpace {
    fn from(config: &TextureConfig) -> Self {
        Self::new(config.width, config.height)
    }
}
