//! Perlinscape - Procedural heightmap terrain demo
//!
//! Generates a fractal Perlin noise map, saves it as a raw heightmap and a
//! gradient-colored image, then builds a smoothed terrain mesh from the raw
//! file the way the renderer would load it.

use std::time::Instant;

use clap::Parser;
use log::{debug, error};

use perlinscape::cli::Args;
use perlinscape::heightfield::{write_image, write_raw, write_raw_verified};
use perlinscape::params::AnimationParams;
use perlinscape::{NoiseAnimator, PerlinNoise, Terrain};

/// Simulated frame time for animated noise steps (seconds)
const ANIMATION_STEP_S: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();
    let args = Args::parse();

    println!("Perlinscape - Procedural heightmap terrain");

    let seed = args.resolve_seed();
    let params = args.noise_params();
    let gradient = args.parse_gradient();

    println!("  Seed: {}", seed);
    println!("  Size: {}x{}", params.width, params.height);
    println!(
        "  Scale: {}, octaves: {}, persistence: {}, lacunarity: {}",
        params.scale, params.octaves, params.persistence, params.lacunarity
    );

    let start = Instant::now();
    let perlin = PerlinNoise::new(seed);
    let map = perlin.generate_map(&params);
    println!(
        "  Noise map generated in {:.2}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );

    // Save raw heightmap (terrain input) and visualization image
    let mut info = args.heightmap_info();
    let raw_saved = if args.verify_write {
        write_raw_verified(&map, &args.raw_out, &args.backup_out)
    } else {
        write_raw(&map, &args.raw_out).map(|()| args.raw_out.clone())
    };
    match raw_saved {
        Ok(path) => {
            println!("  Raw heightmap: {}", path.display());
            if args.heightmap.is_none() {
                info.file_path = path;
            }
        }
        Err(e) => error!("Failed to save raw heightmap: {}", e),
    }

    match write_image(&map, &args.image_out, &gradient) {
        Ok(()) => println!("  Image: {}", args.image_out.display()),
        Err(e) => error!("Failed to save heightmap image: {}", e),
    }

    // Build terrain from the file, falling back to flat ground on failure
    let start = Instant::now();
    let terrain = Terrain::load(&info, &args.terrain_params());
    println!(
        "  Terrain: {} vertices, {} triangles in {:.2}ms",
        terrain.mesh().vertices.len(),
        terrain.index_count() / 3,
        start.elapsed().as_secs_f64() * 1000.0
    );
    if let Some((min, max)) = terrain.heights().min_max() {
        println!(
            "  Elevation: {:.1}m to {:.1}m",
            min * args.terrain_params().height_scale,
            max * args.terrain_params().height_scale
        );
    }

    if args.animate_frames > 0 {
        let start = Instant::now();
        let mut animator =
            NoiseAnimator::new(perlin, params, AnimationParams::default(), gradient);

        for frame in 0..args.animate_frames {
            animator.advance(ANIMATION_STEP_S);
            let texture = animator.texture();
            debug!(
                "Animated frame {} at offset {:?} ({} bytes)",
                frame,
                animator.offset(),
                texture.pixels.len()
            );
        }

        println!(
            "  Animated {} frames in {:.2}ms",
            args.animate_frames,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }
}
