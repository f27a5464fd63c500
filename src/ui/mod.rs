//! # User Interface
//!
//! ImGui control panel drawn over the rendered scene.

pub mod manager;
pub mod panel;

pub use manager::UiManager;
pub use panel::control_panel;
