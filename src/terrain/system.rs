//! Terrain lifecycle: load heightmap, smooth, build mesh, hand off for drawing.

use log::{info, warn};

use super::mesh::TerrainMesh;
use super::smooth::{smooth, SMOOTHING_PASSES};
use crate::heightfield::{read_raw, HeightField};
use crate::params::{HeightMapInfo, TerrainParams};
use crate::rendering::{CullFaceOverride, MeshSink, RenderState};

/// Immutable terrain built from a height field
///
/// To change the terrain, build a new one from a new field.
#[derive(Debug, Clone)]
pub struct Terrain {
    heights: HeightField,
    mesh: TerrainMesh,
    cell_spacing: f32,
}

impl Terrain {
    /// Load a raw heightmap described by `info` and build its mesh
    ///
    /// A missing or truncated file is logged and replaced by flat terrain of
    /// the requested size.
    pub fn load(info: &HeightMapInfo, params: &TerrainParams) -> Self {
        info!(
            "Initializing terrain from heightmap {} ({}x{})",
            info.file_path.display(),
            info.width,
            info.depth
        );

        let field = match read_raw(&info.file_path, info.width, info.depth) {
            Ok(field) => field,
            Err(e) => {
                warn!("{}; using flat terrain", e);
                HeightField::zeros(info.width, info.depth)
            }
        };

        Self::from_height_field(field, info.cell_spacing, params)
    }

    /// Smooth `field` and build its mesh
    pub fn from_height_field(field: HeightField, cell_spacing: f32, params: &TerrainParams) -> Self {
        let heights = smooth(field, SMOOTHING_PASSES);
        let mesh = TerrainMesh::build(&heights, cell_spacing, params.height_scale);

        info!(
            "Terrain mesh ready: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.indices.len() / 3
        );

        Self {
            heights,
            mesh,
            cell_spacing,
        }
    }

    /// Smoothed heights the mesh was built from
    pub fn heights(&self) -> &HeightField {
        &self.heights
    }

    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    pub fn cell_spacing(&self) -> f32 {
        self.cell_spacing
    }

    pub fn index_count(&self) -> u32 {
        self.mesh.index_count()
    }

    /// Hand the vertex and index buffers to a mesh sink
    pub fn upload<S: MeshSink + ?Sized>(&self, sink: &mut S) -> S::Mesh {
        sink.upload_mesh(&self.mesh.vertices, &self.mesh.indices)
    }

    /// Draw an uploaded terrain mesh with face culling disabled
    ///
    /// Terrain is seen from above and below, so both faces must render. The
    /// backend's previous cull state is restored before returning.
    pub fn draw<B>(&self, backend: &mut B, mesh: &B::Mesh)
    where
        B: MeshSink + RenderState + ?Sized,
    {
        let mut backend = CullFaceOverride::disable(backend);
        backend.draw_indexed(mesh, self.index_count());
    }
}
