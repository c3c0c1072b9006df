//! Mesh input: raw buffers, triangle extraction and procedural meshes

pub mod source;
pub mod extract;
pub mod generators;

pub use source::MeshSource;
pub use extract::extract_triangles;
