//! Core types for the runway demo
//!
//! This crate provides everything the demo needs that does not touch the GPU:
//!
//! - [`World`] - View angles, viewport, scene settings and the airplane pose
//! - [`TakeoffAnimation`] - Two-phase timer-driven animation (turn, then roll out)
//! - [`RunwayLayout`] - Procedural ground, runway, stripes and light signs
//! - [`Mesh`], [`Model`], [`Material`] - Triangle meshes and their materials
//! - [`obj`] - Wavefront OBJ/MTL loading
//! - [`RunwayScene`] - Loadable/saveable scene description (RON)
//! - [`AssetCache`] - Path-deduplicated asset cache with reload support

mod asset_error;
mod asset_cache;
mod animation;
mod image_asset;
mod layout;
mod mesh;
pub mod obj;
mod scene;
mod scene_validator;
mod world;

pub use asset_error::AssetError;
pub use asset_cache::{Asset, AssetCache, AssetHandle, AssetId};
pub use animation::{AnimationConfig, AnimationPhase, AnimationPose, TakeoffAnimation};
pub use image_asset::TextureImage;
pub use layout::{RunwayLayout, round_half_even, GROUND_HALF_WIDTH, RUNWAY_HALF_WIDTH};
pub use mesh::{Material, Mesh, MeshVertex, Model};
pub use obj::ObjError;
pub use scene::{
    default_lights, CoordinateSpace, LightKind, LightTemplate, RunwayScene, SceneLoadError,
    SceneSaveError,
};
pub use scene_validator::{SceneValidator, ValidationError, MAX_LIGHTS};
pub use world::{OptionCycle, SceneSettings, ViewState, Viewport, World, AIRPLANE_BASE_SCALE};

// Re-export commonly used types from runway_math for convenience
pub use runway_math::{Mat4, Vec3};
