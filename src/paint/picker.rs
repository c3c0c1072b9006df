//! Mesh picker: owns one BVH and turns rays into paintable texels

use crate::bvh::{Bvh, HitRecord, RayHit};
use crate::core::types::{IVec2, Mat4};
use crate::core::{Error, PaintConfig, Result};
use crate::math::Ray;
use crate::mesh::MeshSource;
use super::texel::TextureSpace;

/// Ray picking against one mesh for painting into its texture.
///
/// Construction never fails: if the mesh cannot be built into a BVH the picker
/// stays unbuilt, and every query returns [`Error::NotBuilt`] so that painting
/// can be disabled without taking the rest of the application down.
pub struct MeshPicker {
    bvh: Option<Bvh>,
    texture: TextureSpace,
}

impl MeshPicker {
    pub fn new(mesh: &MeshSource, transform: Mat4, config: &PaintConfig) -> Self {
        let bvh = match Bvh::build(mesh, transform, &config.bvh) {
            Ok(bvh) => {
                log::info!(
                    "Mesh picker ready: {} triangles, {} nodes",
                    bvh.triangle_count(),
                    bvh.nodes().len()
                );
                Some(bvh)
            }
            Err(e) => {
                log::warn!("Mesh picker disabled: {}", e);
                None
            }
        };

        Self {
            bvh,
            texture: TextureSpace::from(&config.texture),
        }
    }

    /// Wrap an already built BVH
    pub fn from_bvh(bvh: Bvh, texture: TextureSpace) -> Self {
        Self { bvh: Some(bvh), texture }
    }

    pub fn is_built(&self) -> bool {
        self.bvh.is_some()
    }

    pub fn bvh(&self) -> Result<&Bvh> {
        self.bvh.as_ref().ok_or(Error::NotBuilt)
    }

    pub fn texture(&self) -> TextureSpace {
        self.texture
    }

    /// Nearest hit through the BVH
    pub fn pick(&self, ray: &Ray) -> Result<HitRecord> {
        Ok(self.bvh()?.query(ray))
    }

    /// Nearest hit by linear search, bypassing the tree
    pub fn pick_brute(&self, ray: &Ray) -> Result<RayHit> {
        Ok(self.bvh()?.brute_query(ray))
    }

    /// Texel under the nearest hit, `None` if the ray misses the mesh or the
    /// hit UV falls outside the texture.
    pub fn pick_texel(&self, ray: &Ray) -> Result<Option<IVec2>> {
        let hit = self.pick(ray)?;
        if !hit.hit {
            return Ok(None);
        }
        Ok(self.texture.texel(hit.uv()))
    }
}
