//! Procedural mesh generators for benchmarks and testing.
//!
//! All generators are deterministic and emit per-vertex UVs in `[0, 1]`.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::core::types::{Vec2, Vec3};
use super::source::MeshSource;

/// Flat square in the XZ plane spanning `(0,0,0)`-`(size,0,size)`, two triangles.
///
/// UVs follow X and Z; the triangles are `(0,0)-(1,0)-(1,1)` and
/// `(0,0)-(1,1)-(0,1)` in UV space.
pub fn quad(size: f32) -> MeshSource {
    MeshSource::with_indices(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(size, 0.0, 0.0),
            Vec3::new(size, 0.0, size),
            Vec3::new(0.0, 0.0, size),
        ],
        vec![0, 1, 2, 0, 2, 3],
        vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)],
    )
}

/// Regular grid in the XZ plane with `cols x rows` quads, heights from `height_at`.
fn grid_with(cols: u32, rows: u32, size: f32, mut height_at: impl FnMut(f32, f32) -> f32) -> MeshSource {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let verts_x = cols + 1;
    let verts_z = rows + 1;

    let mut positions = Vec::with_capacity((verts_x * verts_z) as usize);
    let mut uvs = Vec::with_capacity(positions.capacity());
    for j in 0..verts_z {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            let x = u * size;
            let z = v * size;
            positions.push(Vec3::new(x, height_at(x, z), z));
            uvs.push(Vec2::new(u, v));
        }
    }

    let mut indices = Vec::with_capacity((cols * rows * 6) as usize);
    for j in 0..rows {
        for i in 0..cols {
            let corner = j * verts_x + i;
            let right = corner + 1;
            let below = corner + verts_x;
            let diagonal = below + 1;

            indices.extend_from_slice(&[corner, right, diagonal]);
            indices.extend_from_slice(&[corner, diagonal, below]);
        }
    }

    MeshSource::with_indices(positions, indices, uvs)
}

/// Flat `cols x rows` grid spanning `(0,0,0)`-`(size,0,size)`
pub fn plane_grid(cols: u32, rows: u32, size: f32) -> MeshSource {
    grid_with(cols, rows, size, |_, _| 0.0)
}

/// Heightfield grid displaced by fractal Perlin noise.
///
/// Heights fall in `[0, height]`.
pub fn terrain(cols: u32, rows: u32, size: f32, height: f32, seed: u32) -> MeshSource {
    let noise = Fbm::<Perlin>::new(seed)
        .set_octaves(4)
        .set_persistence(0.5)
        .set_lacunarity(2.0);

    // A few noise features across the whole patch
    let frequency = 4.0 / size.max(f32::EPSILON) as f64;
    grid_with(cols, rows, size, |x, z| {
        let n = noise.get([x as f64 * frequency, z as f64 * frequency]);
        ((n.clamp(-1.0, 1.0) + 1.0) * 0.5) as f32 * height
    })
}

/// Comb standing in the XY plane: a spine along the bottom and `teeth`
/// vertical teeth, separated by empty gaps of width `gap`.
///
/// Rays through a gap cross the comb's bounding box without touching any
/// triangle.
pub fn comb(teeth: u32, tooth_width: f32, gap: f32, tooth_height: f32) -> MeshSource {
    let teeth = teeth.max(1);
    let width = teeth as f32 * tooth_width + (teeth - 1) as f32 * gap;
    let spine = tooth_width;
    let total_height = spine + tooth_height;

    let mut positions = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    let mut push_rect = |x0: f32, y0: f32, x1: f32, y1: f32| {
        let base = positions.len() as u32;
        for (x, y) in [(x0, y0), (x1, y0), (x1, y1), (x0, y1)] {
            positions.push(Vec3::new(x, y, 0.0));
            uvs.push(Vec2::new(x / width, y / total_height));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    };

    push_rect(0.0, 0.0, width, spine);
    for tooth in 0..teeth {
        let x0 = tooth as f32 * (tooth_width + gap);
        push_rect(x0, spine, x0 + tooth_width, total_height);
    }

    MeshSource::with_indices(positions, indices, uvs)
}

/// Axis-aligned cube `[0, size]^3` as a non-indexed triangle soup.
///
/// Every face maps the full `[0, 1]` UV square.
pub fn cube(size: f32) -> MeshSource {
    let s = size;
    // Corners of each face, counter-clockwise seen from outside
    let faces: [[Vec3; 4]; 6] = [
        [Vec3::new(0.0, 0.0, s), Vec3::new(s, 0.0, s), Vec3::new(s, s, s), Vec3::new(0.0, s, s)],
        [Vec3::new(s, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, s, 0.0), Vec3::new(s, s, 0.0)],
        [Vec3::new(s, 0.0, s), Vec3::new(s, 0.0, 0.0), Vec3::new(s, s, 0.0), Vec3::new(s, s, s)],
        [Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, s), Vec3::new(0.0, s, s), Vec3::new(0.0, s, 0.0)],
        [Vec3::new(0.0, s, s), Vec3::new(s, s, s), Vec3::new(s, s, 0.0), Vec3::new(0.0, s, 0.0)],
        [Vec3::new(0.0, 0.0, 0.0), Vec3::new(s, 0.0, 0.0), Vec3::new(s, 0.0, s), Vec3::new(0.0, 0.0, s)],
    ];
    let corner_uvs = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];

    let mut positions = Vec::with_capacity(36);
    let mut uvs = Vec::with_capacity(36);
    for face in &faces {
        for corner in [0, 1, 2, 0, 2, 3] {
            positions.push(face[corner]);
            uvs.push(corner_uvs[corner]);
        }
    }

    MeshSource::new(positions, uvs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_layout() {
        let mesh = quad(10.0);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.bounds().max, Vec3::new(10.0, 0.0, 10.0));
    }

    #[test]
    fn test_plane_grid_counts() {
        let mesh = plane_grid(4, 3, 1.0);
        assert_eq!(mesh.vertex_count(), 20);
        assert_eq!(mesh.triangle_count(), 24);
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
    }

    #[test]
    fn test_terrain_is_deterministic_and_bounded() {
        let a = terrain(8, 8, 16.0, 4.0, 7);
        let b = terrain(8, 8, 16.0, 4.0, 7);
        assert_eq!(a, b);

        let bounds = a.bounds();
        assert!(bounds.min.y >= 0.0);
        assert!(bounds.max.y <= 4.0);
    }

    #[test]
    fn test_comb_counts() {
        let mesh = comb(4, 1.0, 1.0, 3.0);
        // spine + 4 teeth, two triangles each
        assert_eq!(mesh.triangle_count(), 10);
        assert_eq!(mesh.bounds().max, Vec3::new(7.0, 4.0, 0.0));
    }

    #[test]
    fn test_cube_soup() {
        let mesh = cube(2.0);
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.bounds().max, Vec3::splat(2.0));
    }
}
