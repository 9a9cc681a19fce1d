//! Scene validation
//!
//! Validates scenes before anything is loaded. The [`SceneValidator`] checks
//! that the light setup fits the renderer's two light slots, that spot cones
//! and texture scales are sane, and that a model is named.

use crate::scene::{LightKind, RunwayScene};

/// Lights the renderer can bind at once
pub const MAX_LIGHTS: usize = 2;

/// Validation error found in a scene
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Scene names no model file
    MissingModel,
    /// More lights than the renderer supports
    TooManyLights(usize),
    /// Spot cutoff outside (0, 90] and not 180
    InvalidCutoff { light: usize, cutoff: f32 },
    /// Runway texture scale component is zero, negative or not finite
    InvalidUvScale([f32; 2]),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingModel => write!(f, "Scene has no model path"),
            ValidationError::TooManyLights(count) => {
                write!(f, "Scene has {} lights (at most {} supported)", count, MAX_LIGHTS)
            }
            ValidationError::InvalidCutoff { light, cutoff } => {
                write!(
                    f,
                    "Light {} has invalid spot cutoff {} (must be in (0, 90] or 180)",
                    light, cutoff
                )
            }
            ValidationError::InvalidUvScale(scale) => {
                write!(f, "Invalid runway uv scale: [{}, {}]", scale[0], scale[1])
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Scene validator that checks for common errors
///
/// # Example
/// ```ignore
/// if let Err(errors) = SceneValidator::validate_or_error(&scene) {
///     for error in &errors {
///         log::error!("Scene error: {}", error);
///     }
/// }
/// ```
pub struct SceneValidator;

impl SceneValidator {
    /// Validate a scene, returning all errors found
    pub fn validate(scene: &RunwayScene) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if scene.model.as_os_str().is_empty() {
            errors.push(ValidationError::MissingModel);
        }

        if scene.lights.len() > MAX_LIGHTS {
            errors.push(ValidationError::TooManyLights(scene.lights.len()));
        }

        for (i, light) in scene.lights.iter().enumerate() {
            if light.kind == LightKind::Spot && !is_valid_cutoff(light.cutoff) {
                errors.push(ValidationError::InvalidCutoff {
                    light: i,
                    cutoff: light.cutoff,
                });
            }
        }

        let uv = scene.runway_uv_scale;
        if uv.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            errors.push(ValidationError::InvalidUvScale(uv));
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(scene: &RunwayScene) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(scene);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Fixed-function rule: a cone in (0, 90] degrees, or 180 for no cone
fn is_valid_cutoff(cutoff: f32) -> bool {
    (cutoff > 0.0 && cutoff <= 90.0) || cutoff == 180.0
}
