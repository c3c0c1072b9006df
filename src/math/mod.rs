//! Geometric primitives: boxes, rays, triangles

pub mod aabb;
pub mod ray;
pub mod triangle;

pub use aabb::Aabb;
pub use ray::Ray;
pub use triangle::{Triangle, TriangleHit, intersect_triangle, barycentric};
