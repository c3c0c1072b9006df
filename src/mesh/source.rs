//! Raw mesh buffers as handed over by a model loader

use crate::core::types::{Vec2, Vec3};
use crate::math::Aabb;

/// Vertex positions, optional triangle indices and per-vertex UVs.
///
/// Without an index buffer, vertices are consumed in sequential groups of
/// three, one triangle per group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshSource {
    pub positions: Vec<Vec3>,
    pub indices: Option<Vec<u32>>,
    /// One UV pair per vertex, or empty for an untextured mesh
    pub uvs: Vec<Vec2>,
}

impl MeshSource {
    /// Non-indexed triangle soup
    pub fn new(positions: Vec<Vec3>, uvs: Vec<Vec2>) -> Self {
        Self { positions, indices: None, uvs }
    }

    /// Indexed mesh
    pub fn with_indices(positions: Vec<Vec3>, indices: Vec<u32>, uvs: Vec<Vec2>) -> Self {
        Self { positions, indices: Some(indices), uvs }
    }

    /// Build from flat `xyz` and `uv` float buffers
    pub fn from_flat(positions: &[f32], indices: Option<&[u32]>, uvs: &[f32]) -> Self {
        Self {
            positions: positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2]))
                .collect(),
            indices: indices.map(|i| i.to_vec()),
            uvs: uvs.chunks_exact(2).map(|t| Vec2::new(t[0], t[1])).collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Number of whole triangles described by the buffers
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Bounds of the untransformed vertex positions
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions)
    }
}
