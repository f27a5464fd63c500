//! # Procedural Geometry
//!
//! CPU-side mesh generation for the built-in primitives and the ground
//! helpers. Everything is generated once at startup and uploaded verbatim.

pub mod primitives;

use crate::gfx::scene::vertex::Vertex3D;

/// Raw mesh data as parallel attribute arrays
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Interleaves the attribute arrays into the GPU vertex layout
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.positions
            .iter()
            .zip(self.normals.iter())
            .zip(self.uvs.iter())
            .map(|((&position, &normal), &uv)| Vertex3D {
                position,
                normal,
                uv,
            })
            .collect()
    }

    /// Axis-aligned bounds of the untransformed mesh
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for position in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(position[axis]);
                max[axis] = max[axis].max(position[axis]);
            }
        }
        (min, max)
    }
}
