//! Perlinscape library - Procedural heightmap terrain from Perlin noise

pub mod cli;
pub mod error;
pub mod gradient;
pub mod heightfield;
pub mod params;
pub mod perlin;
pub mod rendering;
pub mod terrain;

pub use error::HeightFieldError;
pub use gradient::ColorGradient;
pub use heightfield::HeightField;
pub use perlin::{NoiseAnimator, PerlinNoise};
pub use terrain::{Terrain, TerrainMesh, Vertex};
