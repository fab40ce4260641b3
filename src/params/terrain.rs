//! Heightmap loading and terrain mesh parameters.

use std::path::PathBuf;

/// Describes how to load and interpret a raw heightmap file
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMapInfo {
    /// Raw heightmap file (one byte per sample, no header)
    pub file_path: PathBuf,

    /// Samples per row (vertices along X)
    pub width: usize,

    /// Number of rows (vertices along Z)
    pub depth: usize,

    /// Distance between adjacent vertices in world units (meters)
    pub cell_spacing: f32,
}

impl Default for HeightMapInfo {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("resources/heightmap/Heightmap0.raw"),
            width: 512,
            depth: 512,
            cell_spacing: 1.0,
        }
    }
}

impl HeightMapInfo {
    pub fn new(file_path: impl Into<PathBuf>, width: usize, depth: usize, cell_spacing: f32) -> Self {
        Self {
            file_path: file_path.into(),
            width,
            depth,
            cell_spacing,
        }
    }
}

/// Terrain mesh construction parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainParams {
    /// World units of elevation per unit of normalized height
    /// 2000 exaggerates relief for dramatic mountains at 512x512 / 1 m spacing
    pub height_scale: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            height_scale: 2000.0,
        }
    }
}
