//! Rendering pipeline components
//!
//! This module contains the scene pipeline (lit, textured meshes) and the
//! overlay pipeline (the 2D info panel).

pub mod types;
pub mod scene_pipeline;
pub mod overlay_pipeline;

// Re-export types
pub use types::{
    FrameUniforms, GpuLight, GpuVertex, ObjectUniforms, OverlayVertex, TextureMode, LIGHT_SLOTS,
    NO_SPOT_CONE, OVERLAY_QUAD,
};

// Re-export pipelines
pub use scene_pipeline::ScenePipeline;
pub use overlay_pipeline::OverlayPipeline;
