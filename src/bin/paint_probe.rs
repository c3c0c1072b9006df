//! Paint probe: casts a grid of camera rays at a procedural mesh and checks
//! the BVH against brute-force search.
//!
//! Usage: cargo run --release --bin paint_probe -- [OPTIONS]
//!
//! Options:
//!   --mesh <KIND>     quad | grid | terrain | comb | cube (default: terrain)
//!   --res <N>         Mesh resolution for grid/terrain (default: 64)
//!   --rays <N>        Rays per screen side, N x N total (default: 256)
//!   --seed <SEED>     Terrain noise seed (default: 12345)
//!   --config <PATH>   JSON paint config (default: built-in defaults)
//!   --stats-json      Print BVH build statistics as JSON
//!
//! Exits with status 1 if any BVH hit disagrees with brute force.

use std::collections::HashSet;
use std::process::ExitCode;
use std::time::Instant;

use meshpaint::core::camera::Camera;
use meshpaint::core::{logging, Mat4, PaintConfig, Vec2, Vec3};
use meshpaint::math::Ray;
use meshpaint::mesh::{generators, MeshSource};
use meshpaint::paint::MeshPicker;

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let kind = parse_str_arg(&args, "--mesh").unwrap_or_else(|| "terrain".to_string());
    let res = parse_u32_arg(&args, "--res").unwrap_or(64);
    let side = parse_u32_arg(&args, "--rays").unwrap_or(256).max(1);
    let seed = parse_u32_arg(&args, "--seed").unwrap_or(12345);
    let stats_json = args.iter().any(|a| a == "--stats-json");

    let config = match parse_str_arg(&args, "--config") {
        Some(path) => match PaintConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => PaintConfig::default(),
    };

    let Some(mesh) = make_mesh(&kind, res, seed) else {
        log::error!("Unknown mesh kind '{}'", kind);
        return ExitCode::from(2);
    };

    println!("=== Meshpaint Probe ===");
    println!("Mesh:  {} ({} triangles)", kind, mesh.triangle_count());
    println!("Rays:  {} x {}", side, side);
    println!("Tree:  leaf size {}, {:?} traversal", config.bvh.leaf_size, config.bvh.traversal);
    println!();

    let start = Instant::now();
    let picker = MeshPicker::new(&mesh, Mat4::IDENTITY, &config);
    let build_time = start.elapsed();

    let bvh = match picker.bvh() {
        Ok(bvh) => bvh,
        Err(e) => {
            log::error!("Nothing to probe: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stats = bvh.stats();
    println!("Build: {:.2}ms, {} nodes ({} leaves), depth {}, {} degenerate splits",
        build_time.as_secs_f64() * 1000.0,
        stats.node_count, stats.leaf_count, stats.max_depth, stats.degenerate_splits);
    if stats_json {
        match serde_json::to_string_pretty(stats) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Could not serialize stats: {}", e),
        }
    }

    let rays = camera_rays(&framing_camera(bvh.bounds().min, bvh.bounds().max), side);

    let start = Instant::now();
    let hits = bvh.query_batch(&rays);
    let tree_time = start.elapsed();

    let start = Instant::now();
    let brute: Vec<_> = rays.iter().map(|ray| bvh.brute_query(ray)).collect();
    let brute_time = start.elapsed();

    let mut mismatches = 0;
    for (i, (tree, reference)) in hits.iter().zip(&brute).enumerate() {
        let agrees = tree.hit == reference.hit
            && (!tree.hit || (tree.distance - reference.distance).abs() <= 1e-4 * tree.distance.max(1.0));
        if !agrees {
            mismatches += 1;
            log::warn!("Ray {} disagrees: tree {:?} vs brute {:?}", i, tree, reference);
        }
    }

    let texture = picker.texture();
    let hit_count = hits.iter().filter(|h| h.hit).count();
    let texels: HashSet<_> = hits
        .iter()
        .filter(|h| h.hit)
        .filter_map(|h| texture.texel(h.uv()))
        .collect();

    let ray_count = rays.len() as f64;
    println!("BVH:   {:.2}ms ({:.0} rays/sec, parallel)",
        tree_time.as_secs_f64() * 1000.0, ray_count / tree_time.as_secs_f64().max(1e-9));
    println!("Brute: {:.2}ms ({:.0} rays/sec)",
        brute_time.as_secs_f64() * 1000.0, ray_count / brute_time.as_secs_f64().max(1e-9));
    println!("Hits:  {} of {} rays, {} distinct texels on a {}x{} texture",
        hit_count, rays.len(), texels.len(), texture.width, texture.height);
    println!("Mismatches: {}", mismatches);

    if mismatches > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn make_mesh(kind: &str, res: u32, seed: u32) -> Option<MeshSource> {
    let mesh = match kind {
        "quad" => generators::quad(10.0),
        "grid" => generators::plane_grid(res, res, 10.0),
        "terrain" => generators::terrain(res, res, 100.0, 20.0, seed),
        "comb" => generators::comb(res.clamp(1, 64), 1.0, 1.0, 8.0),
        "cube" => generators::cube(10.0),
        _ => return None,
    };
    Some(mesh)
}

/// Camera above and in front of the box, looking at its center
fn framing_camera(min: Vec3, max: Vec3) -> Camera {
    let center = (min + max) * 0.5;
    let reach = (max - min).max_element().max(1.0);
    let position = center + Vec3::new(0.0, reach * 0.8, reach * 1.2);

    let mut camera = Camera::look_at(position, center, Vec3::Y);
    camera.set_aspect(1.0, 1.0);
    camera
}

/// One ray through the center of every pixel of a `side x side` viewport
fn camera_rays(camera: &Camera, side: u32) -> Vec<Ray> {
    let viewport = Vec2::splat(side as f32);
    (0..side)
        .flat_map(|y| (0..side).map(move |x| Vec2::new(x as f32 + 0.5, y as f32 + 0.5)))
        .map(|pixel| camera.screen_ray(pixel, viewport))
        .collect()
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
