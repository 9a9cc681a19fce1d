//! Runway Rendering Library
//!
//! This crate provides the wgpu-based rendering for the runway scene: lit,
//! textured meshes plus a 2D info panel drawn over the bottom-right third of
//! the window.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::OrbitCamera`] - Perspective projection and the orbit view matrix
//! - [`pipeline::ScenePipeline`] - Depth-tested meshes with two lights
//! - [`pipeline::OverlayPipeline`] - Alpha-blended info panel
//! - [`renderable::DrawItem`] - Converts meshes to GPU buffers
//! - [`overlay::TextPanel`] - CPU text rasterisation for the panel

pub mod context;
pub mod camera;
pub mod lighting;
pub mod texture;
pub mod pipeline;
pub mod renderable;
pub mod overlay;

// Re-export core types for convenience
pub use runway_core::{LightTemplate, Material, Mesh, ViewState};
pub use runway_math::{Mat4, Vec3};

pub use camera::OrbitCamera;
pub use context::{ContextError, RenderContext};
pub use lighting::frame_lights;
pub use overlay::{panel_rect, OverlayError, PanelLayout, PanelRect, TextPanel};
pub use renderable::{texture_mode_for, DrawItem, GpuMesh, TextureLibrary};
pub use texture::GpuTexture;
