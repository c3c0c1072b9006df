//! Bounding volume hierarchy over a static triangle mesh.
//!
//! A [`Bvh`] owns three buffers that are built together and released
//! together:
//! - the world-space triangle array, never reordered after extraction,
//! - the node arena, root at index 0, children allocated as consecutive pairs,
//! - the index array, a permutation of `0..triangle_count` that leaves address
//!   as contiguous runs.
//!
//! A built `Bvh` is immutable. Queries take `&self` and allocate their own
//! result, so any number of them can run concurrently.

pub mod node;
pub mod builder;
pub mod traverse;
pub mod brute;

pub use node::BvhNode;
pub use builder::BuildStats;
pub use traverse::HitRecord;
pub use brute::RayHit;

use rayon::prelude::*;

use crate::core::types::Mat4;
use crate::core::{BvhConfig, Error, Result, Traversal};
use crate::math::{Aabb, Ray, Triangle};
use crate::mesh::{MeshSource, extract_triangles};

/// BVH built from one mesh and world transform
#[derive(Clone, Debug)]
pub struct Bvh {
    triangles: Vec<Triangle>,
    nodes: Vec<BvhNode>,
    indices: Vec<u32>,
    stats: BuildStats,
    transform: Mat4,
    traversal: Traversal,
}

impl Bvh {
    /// Extract world-space triangles from `mesh` and build the tree over them.
    pub fn build(mesh: &MeshSource, transform: Mat4, config: &BvhConfig) -> Result<Self> {
        let triangles = extract_triangles(mesh, &transform)?;
        let mut bvh = Self::from_triangles(triangles, config)?;
        bvh.transform = transform;
        Ok(bvh)
    }

    /// Build over triangles that are already in world space.
    pub fn from_triangles(triangles: Vec<Triangle>, config: &BvhConfig) -> Result<Self> {
        if triangles.is_empty() {
            return Err(Error::EmptyGeometry);
        }

        let tree = builder::build(&triangles, config);
        Ok(Self {
            triangles,
            nodes: tree.nodes,
            indices: tree.indices,
            stats: tree.stats,
            transform: Mat4::IDENTITY,
            traversal: config.traversal,
        })
    }

    /// World-space triangles in extraction order
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Node arena; the root is `nodes()[0]`
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Triangle indices in leaf order
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Transform the triangles were extracted with
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// World-space bounds of the whole mesh
    pub fn bounds(&self) -> Aabb {
        self.nodes[0].aabb
    }

    /// Raw node arena bytes, e.g. for a GPU storage buffer
    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    /// Run [`Bvh::query`] for every ray in parallel. Results keep ray order.
    pub fn query_batch(&self, rays: &[Ray]) -> Vec<HitRecord> {
        rays.par_iter().map(|ray| self.query(ray)).collect()
    }
}
