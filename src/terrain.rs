//! Heightmap terrain: smoothing, mesh construction and draw handoff.

mod mesh;
mod smooth;
mod system;

pub use mesh::{grid_indices, TerrainMesh};
pub use smooth::{smooth, smooth_pass, SMOOTHING_PASSES};
pub use system::Terrain;

use bytemuck::{Pod, Zeroable};

/// Vertex data for terrain mesh (position + normal + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}
