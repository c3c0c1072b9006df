//! Ray type and the ray-AABB primitive

use crate::core::types::Vec3;
use super::aabb::Aabb;

/// Slab widening for [`Ray::intersects_aabb`], relative to the largest
/// coordinate magnitude of the ray origin and the box.
pub const SLAB_TOLERANCE: f32 = 1e-5;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Precomputed 1/direction for fast AABB intersection
    pub inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction does not need to be normalized, but
    /// hit distances are then measured in units of its length.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: Vec3::new(
                1.0 / direction.x,
                1.0 / direction.y,
                1.0 / direction.z,
            ),
        }
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Ray-AABB intersection using slab method
    /// Returns Some((t_near, t_far)) if intersection, None otherwise
    ///
    /// A ray starting inside the box hits with `t_near` clamped to 0. A ray
    /// parallel to a slab hits only if its origin lies within that slab.
    ///
    /// The test is conservative: each slab is widened by [`SLAB_TOLERANCE`]
    /// relative to the coordinates involved, so a triangle the ray-triangle
    /// test accepts is never culled by rounding in its (possibly flat) box.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<(f32, f32)> {
        let scale = self.origin.abs()
            .max(aabb.min.abs())
            .max(aabb.max.abs())
            .max_element()
            .max(1.0);
        let pad = scale * SLAB_TOLERANCE;

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = self.origin[axis];
            let min = aabb.min[axis] - pad;
            let max = aabb.max[axis] + pad;
            if self.direction[axis] == 0.0 {
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }

            let inv = self.inv_direction[axis];
            let t1 = (min - origin) * inv;
            let t2 = (max - origin) * inv;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }

        if t_near <= t_far && t_far >= 0.0 {
            Some((t_near.max(0.0), t_far))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_intersects_aabb_hit() {
        let ray = Ray::new(Vec3::new(-2.0, 0.5, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let (t_near, t_far) = ray.intersects_aabb(&aabb).unwrap();
        assert!((t_near - 2.0).abs() < 0.001);
        assert!((t_far - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_intersects_aabb_miss() {
        let ray = Ray::new(Vec3::new(-2.0, 5.0, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(ray.intersects_aabb(&aabb).is_none());
    }

    #[test]
    fn test_intersects_aabb_behind() {
        let ray = Ray::new(Vec3::new(3.0, 0.5, 0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(ray.intersects_aabb(&aabb).is_none());
    }

    #[test]
    fn test_intersects_aabb_inside() {
        let ray = Ray::new(Vec3::splat(0.5), Vec3::X);
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let (t_near, _) = ray.intersects_aabb(&aabb).unwrap();
        assert_eq!(t_near, 0.0); // Inside, so t_near clamped to 0
    }

    #[test]
    fn test_intersects_flat_box() {
        // Zero-thickness box, as produced by an axis-aligned quad
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 10.0));
        let ray = Ray::new(Vec3::new(5.0, 10.0, 5.0), Vec3::NEG_Y);
        let (t_near, t_far) = ray.intersects_aabb(&aabb).unwrap();
        assert!((t_near - 10.0).abs() < 1e-3);
        assert!((t_far - 10.0).abs() < 1e-3);
        assert!(t_near <= 10.0 && t_far >= 10.0);
    }

    #[test]
    fn test_flat_box_edge_survives_rounding() {
        // Oblique rays aimed exactly at the corner of a flat box
        let aabb = Aabb::new(Vec3::new(0.625, 0.0, 1.875), Vec3::new(1.25, 0.0, 2.5));
        let corner = Vec3::new(1.25, 0.0, 1.875);
        let origin = Vec3::new(2.897, 12.849, 4.8);
        let ray = Ray::new(origin, (corner - origin).normalize());
        assert!(ray.intersects_aabb(&aabb).is_some());

        let scaled = Aabb::new(aabb.min * 0.3, aabb.max * 0.3);
        let ray = Ray::new(origin, (corner * 0.3 - origin).normalize());
        assert!(ray.intersects_aabb(&scaled).is_some());
    }

    #[test]
    fn test_near_miss_beyond_tolerance() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        let ray = Ray::new(Vec3::new(1.01, 5.0, 0.5), Vec3::NEG_Y);
        assert!(ray.intersects_aabb(&aabb).is_none());
    }

    #[test]
    fn test_parallel_ray_on_slab_boundary() {
        // Origin exactly on the min x plane, direction has no x component
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::new(0.0, 0.5, -1.0), Vec3::Z);
        assert!(ray.intersects_aabb(&aabb).is_some());

        let outside = Ray::new(Vec3::new(-0.1, 0.5, -1.0), Vec3::Z);
        assert!(outside.intersects_aabb(&aabb).is_none());
    }
}
