//! # Rendering
//!
//! wgpu render engine, pipeline registry and post-processing chain.

pub mod pipeline_manager;
pub mod post;
pub mod render_engine;

pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
