//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`RWY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use runway_core::{AnimationConfig, OptionCycle};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Scene file configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Runway length presets
    #[serde(default)]
    pub runway: RunwayConfig,
    /// Airplane scale presets
    #[serde(default)]
    pub airplane: AirplaneConfig,
    /// Take-off animation configuration
    #[serde(default)]
    pub animation: AnimationSettings,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Info panel configuration
    #[serde(default)]
    pub overlay: OverlayConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`RWY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // RWY_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("RWY_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Runway".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Starting distance from the scene origin
    pub start_distance: f32,
    /// Tilting up stops once pitch reaches this (degrees)
    pub pitch_min: f32,
    /// Tilting down stops once pitch reaches this (degrees)
    pub pitch_max: f32,
    /// Degrees per rotation key press
    pub rotate_step: f32,
    /// Units per zoom key press
    pub zoom_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.5,
            far: 50.0,
            start_distance: 5.0,
            pitch_min: -20.0,
            pitch_max: 75.0,
            rotate_step: 5.0,
            zoom_step: 2.0,
        }
    }
}

/// Scene file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to the RON scene description
    pub path: String,
    /// Reload the model when its file changes on disk
    pub watch_model: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/runway.ron".to_string(),
            watch_model: false,
        }
    }
}

/// Runway length presets (key 1 cycles them)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunwayConfig {
    pub lengths: Vec<f32>,
    pub default_length: f32,
}

impl Default for RunwayConfig {
    fn default() -> Self {
        Self {
            lengths: vec![20.0, 25.0, 30.0, 40.0],
            default_length: 20.0,
        }
    }
}

impl RunwayConfig {
    pub fn to_cycle(&self) -> OptionCycle<f32> {
        OptionCycle::new(self.lengths.clone(), self.default_length.abs())
    }
}

/// Airplane scale presets (key 2 cycles them)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AirplaneConfig {
    /// Factors multiplied by `base_scale`
    pub scales: Vec<f32>,
    pub default_scale: f32,
    /// Model units to world units
    pub base_scale: f32,
}

impl Default for AirplaneConfig {
    fn default() -> Self {
        Self {
            scales: vec![1.0, 1.5, 2.0, 3.0],
            default_scale: 1.0,
            base_scale: 0.001,
        }
    }
}

impl AirplaneConfig {
    pub fn to_cycle(&self) -> OptionCycle<f32> {
        OptionCycle::new(self.scales.clone(), self.default_scale)
    }
}

/// Take-off animation configuration (key 3 cycles the speeds)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Milliseconds per animation step
    pub speeds_ms: Vec<u32>,
    pub default_speed_ms: u32,
    /// Degrees of yaw per rotating step
    pub yaw_step: f32,
    /// Yaw that ends the rotating phase
    pub yaw_target: f32,
    /// Distance per translating step
    pub translate_step: f32,
    /// Airplane offset along the runway at rest
    pub start_z: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        let animation = AnimationConfig::default();
        Self {
            speeds_ms: vec![20, 50, 100, 200],
            default_speed_ms: 50,
            yaw_step: animation.yaw_step,
            yaw_target: animation.yaw_target,
            translate_step: animation.translate_step,
            start_z: animation.start_z,
        }
    }
}

impl AnimationSettings {
    pub fn to_cycle(&self) -> OptionCycle<u32> {
        OptionCycle::new(self.speeds_ms.clone(), self.default_speed_ms)
    }

    pub fn to_animation_config(&self) -> AnimationConfig {
        AnimationConfig {
            yaw_step: self.yaw_step,
            yaw_target: self.yaw_target,
            translate_step: self.translate_step,
            start_z: self.start_z,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Scene-wide ambient light [r, g, b]
    pub global_ambient: [f32; 3],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.68, 0.85, 0.9, 1.0],
            global_ambient: [0.2, 0.2, 0.2],
        }
    }
}

/// Info panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Draw the panel at all
    pub enabled: bool,
    /// TrueType/OpenType font file
    pub font_path: String,
    /// One entry per underlined line
    pub lines: Vec<String>,
    /// Text color [r, g, b, a]
    pub color: [u8; 4],
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            font_path: "assets/fonts/DejaVuSans.ttf".to_string(),
            lines: vec![
                "Course: Computer Graphics".to_string(),
                "School year: 2021/22.".to_string(),
                "Scene: Airplane take-off".to_string(),
                "Controls: E D S F + -".to_string(),
                "Task: 13.1".to_string(),
            ],
            color: [255, 0, 0, 255],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace), used when RUST_LOG is unset
    pub log_level: String,
    /// Show the view/animation state in the window title
    pub title_status: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            title_status: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.camera.fov, 45.0);
        assert_eq!(config.camera.near, 0.5);
        assert_eq!(config.camera.far, 50.0);
        assert_eq!(config.runway.default_length, 20.0);
        assert_eq!(config.airplane.base_scale, 0.001);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("speeds_ms"));
        assert!(toml.contains("font_path"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("[runway]\nlengths = [10.0, 50.0]\ndefault_length = 50.0\n").unwrap();
        assert_eq!(config.runway.lengths, vec![10.0, 50.0]);
        assert_eq!(config.window.title, "Runway");
        assert_eq!(*config.runway.to_cycle().current(), 50.0);
    }

    #[test]
    fn test_cycles_start_at_defaults() {
        let config = AppConfig::default();
        assert_eq!(*config.airplane.to_cycle().current(), 1.0);
        assert_eq!(*config.animation.to_cycle().current(), 50);
    }

    #[test]
    fn test_animation_config_mapping() {
        let settings = AnimationSettings {
            yaw_step: 15.0,
            ..AnimationSettings::default()
        };
        let animation = settings.to_animation_config();
        assert_eq!(animation.yaw_step, 15.0);
        assert_eq!(animation.yaw_target, 60.0);
        assert_eq!(animation.start_z, 3.5);
    }

    #[test]
    fn test_negative_default_length_is_made_positive() {
        let runway = RunwayConfig {
            lengths: vec![20.0, 30.0],
            default_length: -30.0,
        };
        assert_eq!(*runway.to_cycle().current(), 30.0);
    }
}
