//! SceneBuilder - World construction from configuration
//!
//! Provides a fluent API for building the runway world: start view, option
//! presets and animation parameters.

use runway_core::{AnimationConfig, OptionCycle, ViewState, World, AIRPLANE_BASE_SCALE};

use crate::config::AppConfig;

/// Builder for constructing the runway [`World`]
///
/// # Example
/// ```ignore
/// let world = SceneBuilder::new()
///     .with_start_distance(8.0)
///     .with_runway_lengths(vec![20.0, 40.0], 40.0)
///     .build();
/// ```
pub struct SceneBuilder {
    view: ViewState,
    runway_lengths: OptionCycle<f32>,
    airplane_scales: OptionCycle<f32>,
    airplane_speeds: OptionCycle<u32>,
    animation: AnimationConfig,
    base_scale: f32,
}

impl SceneBuilder {
    /// Create a builder with the built-in presets
    pub fn new() -> Self {
        Self::from_config(&AppConfig::default())
    }

    /// Create a builder from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            view: ViewState {
                distance: config.camera.start_distance,
                ..ViewState::default()
            },
            runway_lengths: config.runway.to_cycle(),
            airplane_scales: config.airplane.to_cycle(),
            airplane_speeds: config.animation.to_cycle(),
            animation: config.animation.to_animation_config(),
            base_scale: config.airplane.base_scale,
        }
    }

    /// Set the starting camera distance
    pub fn with_start_distance(mut self, distance: f32) -> Self {
        self.view.distance = distance;
        self
    }

    /// Set the runway length presets and the selected one
    pub fn with_runway_lengths(mut self, lengths: Vec<f32>, selected: f32) -> Self {
        self.runway_lengths = OptionCycle::new(lengths, selected);
        self
    }

    /// Set the airplane scale presets and the selected one
    pub fn with_airplane_scales(mut self, scales: Vec<f32>, selected: f32) -> Self {
        self.airplane_scales = OptionCycle::new(scales, selected);
        self
    }

    /// Set the animation speed presets (ms per step) and the selected one
    pub fn with_airplane_speeds(mut self, speeds: Vec<u32>, selected: u32) -> Self {
        self.airplane_speeds = OptionCycle::new(speeds, selected);
        self
    }

    /// Set the animation step sizes and targets
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Build the world
    pub fn build(self) -> World {
        let base_scale = if self.base_scale > 0.0 {
            self.base_scale
        } else {
            log::warn!("Invalid airplane base scale {}, using {}", self.base_scale, AIRPLANE_BASE_SCALE);
            AIRPLANE_BASE_SCALE
        };

        World::new(
            self.view,
            self.runway_lengths,
            self.airplane_scales,
            self.airplane_speeds,
            self.animation,
        )
        .with_base_scale(base_scale)
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
