//! Nearest-hit ray traversal

use crate::core::Traversal;
use crate::core::types::{Vec2, Vec3};
use crate::math::{Ray, Triangle, TriangleHit};
use super::Bvh;
use super::node::BvhNode;

/// Nearest intersection of a ray with the mesh, with everything needed to map
/// the hit back into texture space.
///
/// All fields are zero when `hit` is false.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HitRecord {
    pub hit: bool,
    /// Ray parameter of the hit
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Unit normal of the hit triangle
    pub normal: Vec3,
    /// Weights of the hit point for the triangle's vertices (a, b, c)
    pub barycentric: Vec3,
    /// UVs of the hit triangle's vertices (a, b, c)
    pub uvs: [Vec2; 3],
    /// Index of the hit triangle in [`Bvh::triangles`]
    pub triangle: u32,
}

impl HitRecord {
    /// Texture coordinate of the hit: the triangle's UVs blended by the
    /// barycentric weights.
    pub fn uv(&self) -> Vec2 {
        self.uvs[0] * self.barycentric.x
            + self.uvs[1] * self.barycentric.y
            + self.uvs[2] * self.barycentric.z
    }

    /// Take `hit` if nothing was recorded yet or it is strictly nearer.
    /// The first of several equally distant hits is kept.
    fn offer(&mut self, index: u32, triangle: &Triangle, hit: TriangleHit) {
        if self.hit && hit.distance >= self.distance {
            return;
        }
        *self = HitRecord {
            hit: true,
            distance: hit.distance,
            point: hit.point,
            normal: hit.normal,
            barycentric: triangle.barycentric(hit.point),
            uvs: triangle.uvs,
            triangle: index,
        };
    }
}

impl Bvh {
    /// Nearest hit along `ray`, using the configured traversal.
    pub fn query(&self, ray: &Ray) -> HitRecord {
        self.query_with(ray, self.traversal)
    }

    /// Nearest hit along `ray` with an explicit traversal strategy.
    pub fn query_with(&self, ray: &Ray, traversal: Traversal) -> HitRecord {
        let mut best = HitRecord::default();
        if self.nodes.is_empty() {
            return best;
        }

        match traversal {
            Traversal::Recursive => self.visit(0, ray, &mut best),
            Traversal::Stack => self.visit_iterative(ray, &mut best),
        }

        log::trace!("query {:?} -> hit={} t={}", ray.origin, best.hit, best.distance);
        best
    }

    fn visit(&self, node_index: usize, ray: &Ray, best: &mut HitRecord) {
        let node = &self.nodes[node_index];
        if ray.intersects_aabb(&node.aabb).is_none() {
            return;
        }

        match node.children() {
            None => self.test_leaf(node, ray, best),
            Some((left, right)) => {
                self.visit(left, ray, best);
                self.visit(right, ray, best);
            }
        }
    }

    /// Same visiting order as `visit`: right is pushed first so left pops first.
    fn visit_iterative(&self, ray: &Ray, best: &mut HitRecord) {
        let mut stack = Vec::with_capacity(64);
        stack.push(0usize);

        while let Some(node_index) = stack.pop() {
            let node = &self.nodes[node_index];
            if ray.intersects_aabb(&node.aabb).is_none() {
                continue;
            }

            match node.children() {
                None => self.test_leaf(node, ray, best),
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }

    fn test_leaf(&self, node: &BvhNode, ray: &Ray, best: &mut HitRecord) {
        for &index in &self.indices[node.range()] {
            let triangle = &self.triangles[index as usize];
            if let Some(hit) = triangle.intersect(ray) {
                best.offer(index, triangle, hit);
            }
        }
    }
}
