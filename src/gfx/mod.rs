//! # Graphics
//!
//! Camera, geometry, scene state, picking and the wgpu rendering layer.

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;
