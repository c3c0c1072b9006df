//! Geometry extraction: mesh buffers + world transform -> triangle array

use crate::core::types::{Mat4, Vec2};
use crate::core::{Error, Result};
use crate::math::Triangle;
use super::source::MeshSource;

/// Convert a mesh into one world-space [`Triangle`] per face.
///
/// Positions go through `transform`; UVs are copied untouched. Fails with
/// [`Error::EmptyGeometry`] when there is no whole triangle to extract, and
/// with [`Error::InvalidMesh`] when an index or the UV buffer does not match
/// the vertex buffer. Trailing indices or vertices that do not form a whole
/// triangle are ignored.
pub fn extract_triangles(mesh: &MeshSource, transform: &Mat4) -> Result<Vec<Triangle>> {
    if mesh.positions.is_empty() {
        return Err(Error::EmptyGeometry);
    }

    let vertex_count = mesh.positions.len();
    if !mesh.uvs.is_empty() && mesh.uvs.len() != vertex_count {
        return Err(Error::InvalidMesh(format!(
            "{} UVs for {} vertices",
            mesh.uvs.len(),
            vertex_count
        )));
    }

    let corner_count = match &mesh.indices {
        Some(indices) => indices.len(),
        None => vertex_count,
    };
    if corner_count % 3 != 0 {
        log::warn!(
            "Mesh has {} trailing {} outside a whole triangle, ignoring",
            corner_count % 3,
            if mesh.is_indexed() { "indices" } else { "vertices" }
        );
    }

    let triangle_count = mesh.triangle_count();
    if triangle_count == 0 {
        return Err(Error::EmptyGeometry);
    }

    let uv = |vertex: usize| mesh.uvs.get(vertex).copied().unwrap_or(Vec2::ZERO);

    let mut triangles = Vec::with_capacity(triangle_count);
    for face in 0..triangle_count {
        let corners = match &mesh.indices {
            Some(indices) => {
                let mut corners = [0usize; 3];
                for (corner, &index) in corners.iter_mut().zip(&indices[face * 3..face * 3 + 3]) {
                    if index as usize >= vertex_count {
                        return Err(Error::InvalidMesh(format!(
                            "face {} references vertex {} of {}",
                            face, index, vertex_count
                        )));
                    }
                    *corner = index as usize;
                }
                corners
            }
            None => [face * 3, face * 3 + 1, face * 3 + 2],
        };

        let [ia, ib, ic] = corners;
        triangles.push(Triangle::new(
            transform.transform_point3(mesh.positions[ia]),
            transform.transform_point3(mesh.positions[ib]),
            transform.transform_point3(mesh.positions[ic]),
            [uv(ia), uv(ib), uv(ic)],
        ));
    }

    Ok(triangles)
}
