//! # Scene State
//!
//! The logical scene: objects, selection, viewer toggles and the camera.

pub mod object;
pub mod scene;
pub mod vertex;

pub use object::{SceneObject, ShapeKind};
pub use scene::Scene;
pub use vertex::{LineVertex, Vertex3D};
