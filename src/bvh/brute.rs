//! Linear reference search over every triangle

use crate::core::types::Vec3;
use crate::math::Ray;
use super::Bvh;
use super::traverse::HitRecord;

/// Reduced nearest-hit result of [`Bvh::brute_query`]. Zeroed on a miss.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RayHit {
    pub hit: bool,
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
    /// Index of the hit triangle in [`Bvh::triangles`]
    pub triangle: u32,
}

impl From<HitRecord> for RayHit {
    fn from(record: HitRecord) -> Self {
        Self {
            hit: record.hit,
            distance: record.distance,
            point: record.point,
            normal: record.normal,
            triangle: record.triangle,
        }
    }
}

impl Bvh {
    /// Nearest hit along `ray`, testing every triangle in its original order
    /// without consulting the tree.
    pub fn brute_query(&self, ray: &Ray) -> RayHit {
        let mut best = RayHit::default();

        for (index, triangle) in self.triangles.iter().enumerate() {
            let Some(hit) = triangle.intersect(ray) else {
                continue;
            };
            if !best.hit || hit.distance < best.distance {
                best = RayHit {
                    hit: true,
                    distance: hit.distance,
                    point: hit.point,
                    normal: hit.normal,
                    triangle: index as u32,
                };
            }
        }

        best
    }
}
