//! Meshpaint - BVH ray picking over static triangle meshes
//!
//! Build a [`bvh::Bvh`] once per mesh and world transform, then ask it for the
//! nearest hit along any number of rays. Each hit carries the barycentric
//! weights and UVs needed to find the texel under a brush.
//!
//! ```
//! use meshpaint::bvh::Bvh;
//! use meshpaint::core::{BvhConfig, Mat4, Vec2, Vec3};
//! use meshpaint::math::Ray;
//! use meshpaint::mesh::generators;
//!
//! let bvh = Bvh::build(&generators::quad(10.0), Mat4::IDENTITY, &BvhConfig::default()).unwrap();
//! let hit = bvh.query(&Ray::new(Vec3::new(5.0, 10.0, 5.0), Vec3::NEG_Y));
//! assert!(hit.hit);
//! assert!((hit.uv() - Vec2::new(0.5, 0.5)).length() < 1e-5);
//! ```

pub mod core;
pub mod math;
pub mod mesh;
pub mod bvh;
pub mod paint;
