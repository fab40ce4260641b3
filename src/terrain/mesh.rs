//! Regular grid mesh generation from a height field.

use glam::Vec3;

use super::Vertex;
use crate::heightfield::HeightField;

/// Vertex and index buffers for a `width x depth` terrain grid
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    width: usize,
    depth: usize,
}

impl TerrainMesh {
    /// Build a mesh with one vertex per sample
    ///
    /// The grid is centered on the origin in XZ with `cell_spacing` between
    /// vertices; X grows with column and Z with row. Y is the sample times
    /// `height_scale`, and UVs span [0, 1] across the grid.
    pub fn build(field: &HeightField, cell_spacing: f32, height_scale: f32) -> Self {
        let width = field.width();
        let depth = field.height();
        let half_width = width.saturating_sub(1) as f32 * cell_spacing * 0.5;
        let half_depth = depth.saturating_sub(1) as f32 * cell_spacing * 0.5;

        let mut vertices = Vec::with_capacity(width * depth);
        for (row, heights) in field.samples().chunks(width.max(1)).enumerate() {
            let z_pos = row as f32 * cell_spacing - half_depth;

            for (col, &height) in heights.iter().enumerate() {
                let x_pos = col as f32 * cell_spacing - half_width;

                vertices.push(Vertex {
                    position: [x_pos, height * height_scale, z_pos],
                    normal: [0.0; 3],
                    tex_coords: [uv(col, width), uv(row, depth)],
                });
            }
        }

        let indices = grid_indices(width, depth);
        accumulate_normals(&mut vertices, &indices);

        Self {
            vertices,
            indices,
            width,
            depth,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Raw vertex bytes for a GPU buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Two counter-clockwise triangles per grid cell, row-major
///
/// Each cell `(row, col)` becomes `(TL, BL, TR)` and `(TR, BL, BR)`. Grids
/// narrower than two vertices on either axis have no cells.
pub fn grid_indices(width: usize, depth: usize) -> Vec<u32> {
    if width < 2 || depth < 2 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity((width - 1) * (depth - 1) * 6);
    for row in 0..depth - 1 {
        for col in 0..width - 1 {
            let top_left = (row * width + col) as u32;
            let top_right = top_left + 1;
            let bottom_left = ((row + 1) * width + col) as u32;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[
                top_left,
                bottom_left,
                top_right,
                top_right,
                bottom_left,
                bottom_right,
            ]);
        }
    }
    indices
}

fn uv(i: usize, count: usize) -> f32 {
    if count > 1 {
        i as f32 / (count - 1) as f32
    } else {
        0.0
    }
}

/// Sum each triangle's unit face normal into its vertices, then normalize
///
/// Zero-area triangles contribute nothing; vertices left with no direction
/// point straight up.
fn accumulate_normals(vertices: &mut [Vertex], indices: &[u32]) {
    let mut sums = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = Vec3::from_array(vertices[a].position);
        let pb = Vec3::from_array(vertices[b].position);
        let pc = Vec3::from_array(vertices[c].position);

        let face = (pb - pa).cross(pc - pa).normalize_or_zero();
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }

    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        vertex.normal = sum.try_normalize().unwrap_or(Vec3::Y).to_array();
    }
}
