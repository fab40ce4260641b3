//! Parameter definitions with units and documented semantics.
//!
//! Defaults are the values the terrain demo scenes run with:
//! - Noise maps are 512x512 samples at scale 50 with 4 octaves
//! - Heightmaps are 512x512 raw files with 1 m cell spacing
//! - Relief is exaggerated to 2000 m per unit of normalized height

mod noise_map;
mod terrain;

// Re-export all types
pub use noise_map::{AnimationParams, NoiseMapParams, MIN_SCALE};
pub use terrain::{HeightMapInfo, TerrainParams};
