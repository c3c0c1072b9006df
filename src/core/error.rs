//! Error types for mesh picking

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// The mesh had no vertex data or no complete triangle.
    #[error("empty geometry: mesh has no triangles to build from")]
    EmptyGeometry,

    /// A query was issued against a picker that never built its BVH.
    #[error("BVH not built")]
    NotBuilt,

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
