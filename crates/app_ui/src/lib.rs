//! BreezeFiler UI layer
//!
//! Provides:
//! - egui-based GUI components
//! - wgpu rendering pipeline
//! - Theming

pub mod components;
pub mod renderer;
pub mod theme;

pub use renderer::Renderer;
pub use theme::Theme;
