//! Scene construction
//!
//! Builds the world from configuration and loads the assets a scene file names.

mod scene_assets;
mod scene_builder;

pub use scene_assets::{SceneAssets, SceneError};
pub use scene_builder::SceneBuilder;
