//! Command-line argument parsing.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use glam::Vec2;
use log::warn;

use crate::gradient::ColorGradient;
use crate::params::{HeightMapInfo, NoiseMapParams, TerrainParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Perlinscape")]
#[command(about = "Generate Perlin noise heightmaps and terrain meshes", long_about = None)]
pub struct Args {
    /// Noise seed (0 = reference permutation, default = current time)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Map width (samples)
    #[arg(long, default_value_t = 512)]
    pub width: usize,

    /// Map height (samples)
    #[arg(long, default_value_t = 512)]
    pub height: usize,

    /// Samples per noise lattice cell
    #[arg(long, default_value_t = 50.0)]
    pub scale: f32,

    /// Noise layers per sample
    #[arg(long, default_value_t = 4)]
    pub octaves: u32,

    /// Amplitude multiplier per octave
    #[arg(long, default_value_t = 0.5)]
    pub persistence: f32,

    /// Frequency multiplier per octave
    #[arg(long, default_value_t = 2.0)]
    pub lacunarity: f32,

    /// Map offset along X (samples)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub offset_x: f32,

    /// Map offset along Y (samples)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub offset_y: f32,

    /// Color gradient for the visualization image: fire (default), terrain
    #[arg(long, value_name = "NAME", default_value = "fire")]
    pub gradient: String,

    /// Raw heightmap output path
    #[arg(long, default_value = "resources/heightmap/perlin_noise.raw")]
    pub raw_out: PathBuf,

    /// Visualization image output path (.jpg for max-quality JPEG)
    #[arg(long, default_value = "resources/textures/perlin_noise.jpg")]
    pub image_out: PathBuf,

    /// Read the raw file back after writing, falling back to a backup path
    #[arg(long)]
    pub verify_write: bool,

    /// Backup path used by --verify-write
    #[arg(long, default_value = "perlin_noise_backup.raw")]
    pub backup_out: PathBuf,

    /// Mesh this raw heightmap instead of the generated one
    #[arg(long, value_name = "PATH")]
    pub heightmap: Option<PathBuf>,

    /// Distance between terrain vertices (meters)
    #[arg(long, default_value_t = 1.0)]
    pub cell_spacing: f32,

    /// World units of elevation per unit of normalized height
    #[arg(long, default_value_t = 2000.0)]
    pub height_scale: f32,

    /// Animated frames to step through after generation (0 = none)
    #[arg(long, default_value_t = 0)]
    pub animate_frames: u32,
}

impl Args {
    /// Seed from the command line, or from the clock when none was given
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as u32)
                .unwrap_or(1)
        })
    }

    pub fn noise_params(&self) -> NoiseMapParams {
        NoiseMapParams {
            width: self.width,
            height: self.height,
            scale: self.scale,
            octaves: self.octaves,
            persistence: self.persistence,
            lacunarity: self.lacunarity,
            offset: Vec2::new(self.offset_x, self.offset_y),
        }
    }

    /// Parse gradient name from command-line arguments
    pub fn parse_gradient(&self) -> ColorGradient {
        match self.gradient.to_lowercase().as_str() {
            "fire" => ColorGradient::fire(),
            "terrain" => ColorGradient::terrain(),
            other => {
                warn!("Unknown gradient '{}', using fire", other);
                ColorGradient::fire()
            }
        }
    }

    /// Heightmap to mesh: `--heightmap` if given, otherwise the generated raw file
    pub fn heightmap_info(&self) -> HeightMapInfo {
        let path = self.heightmap.clone().unwrap_or_else(|| self.raw_out.clone());
        HeightMapInfo::new(path, self.width, self.height, self.cell_spacing)
    }

    pub fn terrain_params(&self) -> TerrainParams {
        TerrainParams {
            height_scale: self.height_scale,
        }
    }
}
