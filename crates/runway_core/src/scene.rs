//! Scene description
//!
//! Provides [`RunwayScene`] for loading/saving the demo's scene from RON files.
//! A scene names the airplane model, the ground and runway textures and the
//! light setup. Relative paths are resolved against the RON file's directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of light source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    /// Omnidirectional light
    Point,
    /// Cone light with a cutoff angle
    Spot,
}

/// Space a light position is given in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinateSpace {
    /// Fixed relative to the camera
    #[default]
    View,
    /// Fixed in the scene, moves with the orbit
    World,
}

/// A light in the scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightTemplate {
    pub kind: LightKind,
    /// Position in `space`, or airplane-local when attached
    pub position: [f32; 3],
    /// Spot direction (same space as the position)
    #[serde(default = "default_direction")]
    pub direction: [f32; 3],
    #[serde(default)]
    pub ambient: [f32; 3],
    #[serde(default = "white")]
    pub diffuse: [f32; 3],
    #[serde(default = "white")]
    pub specular: [f32; 3],
    /// Cone half-angle in degrees; 180 means no cone
    #[serde(default = "no_cutoff")]
    pub cutoff: f32,
    #[serde(default)]
    pub space: CoordinateSpace,
    /// Follow the airplane (position and direction in model space)
    #[serde(default)]
    pub attach_to_airplane: bool,
}

fn default_direction() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

fn white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn no_cutoff() -> f32 {
    180.0
}

impl LightTemplate {
    /// White point light at a fixed view-space position
    pub fn point(position: [f32; 3]) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            direction: default_direction(),
            ambient: [0.0, 0.0, 0.0],
            diffuse: white(),
            specular: white(),
            cutoff: no_cutoff(),
            space: CoordinateSpace::View,
            attach_to_airplane: false,
        }
    }

    /// Spot light at `position` shining along `direction`
    pub fn spot(position: [f32; 3], direction: [f32; 3], cutoff: f32) -> Self {
        Self {
            kind: LightKind::Spot,
            direction,
            cutoff,
            ..Self::point(position)
        }
    }

    pub fn with_colors(mut self, ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3]) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self
    }

    pub fn in_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    pub fn attached_to_airplane(mut self) -> Self {
        self.attach_to_airplane = true;
        self
    }

    /// Effective cone cutoff; point lights never have a cone
    pub fn effective_cutoff(&self) -> f32 {
        match self.kind {
            LightKind::Point => 180.0,
            LightKind::Spot => self.cutoff,
        }
    }
}

/// The default lights: a white lamp high above and behind the scene, and a
/// blue spotlight riding on the airplane
pub fn default_lights() -> Vec<LightTemplate> {
    vec![
        LightTemplate::point([0.0, 500.0, -250.0]),
        LightTemplate::spot([5.0, 0.0, 0.0], [1.0, 0.0, 0.0], 30.0)
            .with_colors([0.0, 0.5, 1.0], [0.0, 0.0, 1.0], [1.0, 1.0, 1.0])
            .attached_to_airplane(),
    ]
}

fn default_uv_scale() -> [f32; 2] {
    [1.0, 0.5]
}

/// A serializable runway scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayScene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Airplane OBJ file
    pub model: PathBuf,
    /// Grass texture for the ground plane
    #[serde(default)]
    pub ground_texture: Option<PathBuf>,
    /// Asphalt texture for the runway
    #[serde(default)]
    pub runway_texture: Option<PathBuf>,
    /// Texture coordinate scale on the runway
    #[serde(default = "default_uv_scale")]
    pub runway_uv_scale: [f32; 2],
    #[serde(default = "default_lights")]
    pub lights: Vec<LightTemplate>,
}

impl RunwayScene {
    /// Create a scene with default lights and no textures
    pub fn new(name: impl Into<String>, model: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            ground_texture: None,
            runway_texture: None,
            runway_uv_scale: default_uv_scale(),
            lights: default_lights(),
        }
    }

    /// Load a scene from a RON file, resolving relative paths next to it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let scene: Self = ron::from_str(&contents)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        log::info!("Loaded scene '{}' from {}", scene.name, path.display());
        Ok(scene.resolved_against(base))
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Join every relative path onto `base`
    pub fn resolved_against(mut self, base: &Path) -> Self {
        let resolve = |p: &PathBuf| if p.is_relative() { base.join(p) } else { p.clone() };
        self.model = resolve(&self.model);
        self.ground_texture = self.ground_texture.as_ref().map(resolve);
        self.runway_texture = self.runway_texture.as_ref().map(resolve);
        self
    }

    pub fn with_textures(mut self, ground: impl Into<PathBuf>, runway: impl Into<PathBuf>) -> Self {
        self.ground_texture = Some(ground.into());
        self.runway_texture = Some(runway.into());
        self
    }

    pub fn with_lights(mut self, lights: Vec<LightTemplate>) -> Self {
        self.lights = lights;
        self
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scene_has_default_lights() {
        let scene = RunwayScene::new("Runway", "airplane.obj");
        assert_eq!(scene.lights.len(), 2);
        assert_eq!(scene.lights[0].kind, LightKind::Point);
        assert_eq!(scene.lights[0].position, [0.0, 500.0, -250.0]);
        assert_eq!(scene.lights[1].kind, LightKind::Spot);
        assert_eq!(scene.lights[1].cutoff, 30.0);
        assert!(scene.lights[1].attach_to_airplane);
        assert_eq!(scene.runway_uv_scale, [1.0, 0.5]);
    }

    #[test]
    fn test_minimal_ron_uses_defaults() {
        let ron_str = r#"
            RunwayScene(
                name: "Minimal",
                model: "models/airplane.obj",
            )
        "#;
        let scene: RunwayScene = ron::from_str(ron_str).unwrap();
        assert_eq!(scene.name, "Minimal");
        assert!(scene.ground_texture.is_none());
        assert_eq!(scene.lights, default_lights());
    }

    #[test]
    fn test_light_template_defaults() {
        let ron_str = r#"
            LightTemplate(
                kind: Point,
                position: (1.0, 2.0, 3.0),
            )
        "#;
        let light: LightTemplate = ron::from_str(ron_str).unwrap();
        assert_eq!(light.diffuse, [1.0, 1.0, 1.0]);
        assert_eq!(light.ambient, [0.0, 0.0, 0.0]);
        assert_eq!(light.space, CoordinateSpace::View);
        assert_eq!(light.effective_cutoff(), 180.0);
    }

    #[test]
    fn test_point_light_ignores_cutoff() {
        let mut light = LightTemplate::point([0.0, 0.0, 0.0]);
        light.cutoff = 10.0;
        assert_eq!(light.effective_cutoff(), 180.0);
    }

    #[test]
    fn test_resolved_against_keeps_absolute_paths() {
        let absolute = std::env::temp_dir().join("grass.jpg");
        let scene = RunwayScene::new("Runway", "models/airplane.obj")
            .with_textures(absolute.clone(), "textures/asphalt.jpg")
            .resolved_against(Path::new("assets"));
        assert_eq!(scene.model, Path::new("assets").join("models/airplane.obj"));
        assert_eq!(scene.ground_texture, Some(absolute));
        assert_eq!(
            scene.runway_texture,
            Some(Path::new("assets").join("textures/asphalt.jpg"))
        );
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = RunwayScene::load("/no/such/scene.ron");
        assert!(matches!(result, Err(SceneLoadError::Io(_))));
    }

    #[test]
    fn test_load_invalid_ron_is_parse_error() {
        let dir = std::env::temp_dir().join("runway_scene_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.ron");
        fs::write(&path, "RunwayScene(name: ").unwrap();
        assert!(matches!(RunwayScene::load(&path), Err(SceneLoadError::Parse(_))));
    }

    #[test]
    fn test_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let msg = format!("{}", SceneLoadError::Io(io_err));
        assert!(msg.contains("IO error"));
    }
}
