//! World-space triangles and the ray-triangle primitive

use crate::core::types::{Vec2, Vec3};
use super::aabb::Aabb;
use super::ray::Ray;

/// Determinant and distance threshold for ray-triangle tests
pub const EPSILON: f32 = 1e-6;

/// A self-contained triangle in world space.
///
/// UVs stay in the mesh's vertex order (`uvs[0]` belongs to `a`), whatever the
/// spatial layout of the vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub uvs: [Vec2; 3],
    /// Mean of the three vertices
    pub centroid: Vec3,
    /// Tight box around the three vertices, no padding
    pub aabb: Aabb,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, uvs: [Vec2; 3]) -> Self {
        Self {
            a,
            b,
            c,
            uvs,
            centroid: (a + b + c) / 3.0,
            aabb: Aabb::from_points(&[a, b, c]),
        }
    }

    pub fn intersect(&self, ray: &Ray) -> Option<TriangleHit> {
        intersect_triangle(ray, self.a, self.b, self.c)
    }

    /// Barycentric weights of `p` for (a, b, c)
    pub fn barycentric(&self, p: Vec3) -> Vec3 {
        barycentric(p, self.a, self.b, self.c)
    }
}

/// Result of a successful ray-triangle test
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter of the hit
    pub distance: f32,
    pub point: Vec3,
    /// Unit normal of the triangle plane, `(b - a) x (c - a)`
    pub normal: Vec3,
}

/// Möller-Trumbore ray-triangle intersection, two-sided.
///
/// Hits at or behind the origin (`t <= EPSILON`) are rejected, as are rays
/// parallel to the triangle plane.
pub fn intersect_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<TriangleHit> {
    let edge1 = b - a;
    let edge2 = c - a;

    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tv = ray.origin - a;
    let u = tv.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = tv.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    if t <= EPSILON {
        return None;
    }

    Some(TriangleHit {
        distance: t,
        point: ray.at(t),
        normal: edge1.cross(edge2).normalize(),
    })
}

/// Barycentric weights of point `p` with respect to triangle (a, b, c).
///
/// `p` is assumed to lie in the triangle's plane. Returned as
/// (weight of a, weight of b, weight of c), summing to 1.
pub fn barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);

    let denom = d00 * d11 - d01 * d01;
    let y = (d11 * d20 - d01 * d21) / denom;
    let z = (d00 * d21 - d01 * d20) / denom;

    Vec3::new(1.0 - (y + z), y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            [Vec2::ZERO, Vec2::X, Vec2::Y],
        )
    }

    #[test]
    fn test_centroid_and_bounds() {
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 6.0),
            [Vec2::ZERO; 3],
        );
        assert_eq!(tri.centroid, Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(tri.aabb.min, Vec3::ZERO);
        assert_eq!(tri.aabb.max, Vec3::new(3.0, 3.0, 6.0));
    }

    #[test]
    fn test_hit_from_above() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 2.0, 0.25), Vec3::NEG_Y);
        let hit = tri.intersect(&ray).unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-6);
        assert!((hit.point - Vec3::new(0.25, 0.0, 0.25)).length() < 1e-6);
        assert!((hit.normal.abs() - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_two_sided() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, -2.0, 0.25), Vec3::Y);
        assert!(tri.intersect(&ray).is_some());
    }

    #[test]
    fn test_miss_outside_edges() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.8, 2.0, 0.8), Vec3::NEG_Y);
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(-1.0, 0.0, 0.25), Vec3::X);
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_behind_origin_misses() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 2.0, 0.25), Vec3::Y);
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let ray = Ray::new(Vec3::new(0.5, 1.0, 0.0), Vec3::NEG_Y);
        let hit = intersect_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert!(hit.is_none());
    }

    #[test]
    fn test_barycentric_vertices_and_centroid() {
        let tri = unit_triangle();
        assert!((tri.barycentric(tri.a) - Vec3::X).length() < 1e-6);
        assert!((tri.barycentric(tri.b) - Vec3::Y).length() < 1e-6);
        assert!((tri.barycentric(tri.c) - Vec3::Z).length() < 1e-6);

        let w = tri.barycentric(tri.centroid);
        assert!((w - Vec3::splat(1.0 / 3.0)).length() < 1e-6);
        assert!((w.x + w.y + w.z - 1.0).abs() < 1e-6);
    }
}
