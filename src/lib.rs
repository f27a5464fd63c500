//! # Scenelab
//!
//! An interactive 3D scene viewer built on wgpu and winit. Three primitives
//! sit on a ground plane; objects are selected by clicking or through the
//! control panel, then recolored, rescaled, textured or spun. Bloom and an
//! outline highlight can be toggled on top, and the camera combines orbit
//! controls with WASD free flight.
//!
//! ```no_run
//! use scenelab::ViewerApp;
//!
//! fn main() {
//!     env_logger::init();
//!     ViewerApp::new().run();
//! }
//! ```

pub mod app;
pub mod gfx;
pub mod ui;
pub mod wgpu_utils;

pub use app::ViewerApp;
pub use gfx::scene::{Scene, ShapeKind};
