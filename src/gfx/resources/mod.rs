//! # GPU Resources
//!
//! Uniform layouts, texture loading and the bind groups shared by every
//! render pass.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;
pub mod texture_set;

pub use global_bindings::{GlobalBindings, GlobalUniforms};
pub use material::{MaterialUniform, ModelUniform};
pub use texture_resource::Texture;
pub use texture_set::{TextureKind, TextureSet};
