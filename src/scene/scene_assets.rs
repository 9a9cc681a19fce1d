//! Scene assets - the model and textures a scene file names
//!
//! Loading is fatal for the scene file and the model. Textures that fail to
//! load are skipped with a warning and the surfaces fall back to their plain
//! material colors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use runway_core::{
    AssetCache, AssetError, AssetHandle, Model, RunwayScene, SceneLoadError, SceneValidator,
    TextureImage, ValidationError,
};

/// Error building the scene at startup
#[derive(Debug)]
pub enum SceneError {
    /// The RON file could not be read or parsed
    Load(SceneLoadError),
    /// The scene failed validation
    Invalid(Vec<ValidationError>),
    /// The airplane model could not be loaded
    Model(AssetError),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Load(e) => write!(f, "Failed to load scene: {}", e),
            SceneError::Invalid(errors) => {
                write!(f, "Invalid scene:")?;
                for error in errors {
                    write!(f, " {};", error)?;
                }
                Ok(())
            }
            SceneError::Model(e) => write!(f, "Failed to load model: {}", e),
        }
    }
}

impl std::error::Error for SceneError {}

impl From<SceneLoadError> for SceneError {
    fn from(e: SceneLoadError) -> Self {
        SceneError::Load(e)
    }
}

impl From<AssetError> for SceneError {
    fn from(e: AssetError) -> Self {
        SceneError::Model(e)
    }
}

/// A loaded scene: description, model and texture images
pub struct SceneAssets {
    scene: RunwayScene,
    cache: AssetCache,
    model: AssetHandle,
    textures: Vec<AssetHandle>,
}

impl SceneAssets {
    /// Load and validate a scene file, then load everything it references
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let scene = RunwayScene::load(path)?;
        Self::from_scene(scene)
    }

    /// Validate an already parsed scene and load its assets
    pub fn from_scene(scene: RunwayScene) -> Result<Self, SceneError> {
        SceneValidator::validate_or_error(&scene).map_err(SceneError::Invalid)?;

        let mut cache = AssetCache::new();
        let model = cache.load::<Model>(&scene.model)?;

        let mut assets = Self {
            scene,
            cache,
            model,
            textures: Vec::new(),
        };
        assets.load_textures();
        Ok(assets)
    }

    /// Builder: reload the model when its file changes
    pub fn with_hot_reload(mut self, enabled: bool) -> Self {
        self.cache.set_watch_for_changes(enabled);
        self
    }

    pub fn scene(&self) -> &RunwayScene {
        &self.scene
    }

    /// The current airplane model
    pub fn model(&self) -> Option<Arc<Model>> {
        self.cache.get::<Model>(&self.model)
    }

    /// Re-read the model from disk
    ///
    /// On failure the previous model stays cached and the error is returned.
    pub fn reload_model(&mut self) -> Result<Arc<Model>, AssetError> {
        let model = self.cache.reload::<Model>(&self.model)?;
        self.load_textures();
        Ok(model)
    }

    /// Reload the model if its file changed; returns true when it did
    pub fn poll_model_changes(&mut self) -> bool {
        if self.cache.check_hot_reload::<Model>().is_empty() {
            return false;
        }
        self.load_textures();
        true
    }

    /// Every texture image that loaded, keyed by its path
    pub fn textures(&self) -> Vec<(PathBuf, Arc<TextureImage>)> {
        self.textures
            .iter()
            .filter_map(|handle| {
                self.cache
                    .get::<TextureImage>(handle)
                    .map(|image| (handle.path().to_path_buf(), image))
            })
            .collect()
    }

    /// Paths the scene and the current model need as textures
    fn texture_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .scene
            .ground_texture
            .iter()
            .chain(self.scene.runway_texture.iter())
            .cloned()
            .collect();

        if let Some(model) = self.model() {
            for mesh in &model.meshes {
                if let Some(path) = &mesh.material.diffuse_texture {
                    paths.push(path.clone());
                }
            }
        }

        paths.sort();
        paths.dedup();
        paths
    }

    fn load_textures(&mut self) {
        for path in self.texture_paths() {
            if self.textures.iter().any(|handle| handle.path() == path.as_path()) {
                continue;
            }
            match self.cache.load::<TextureImage>(&path) {
                Ok(handle) => self.textures.push(handle),
                Err(e) => log::warn!("Skipping texture {}: {}", path.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const QUAD_OBJ: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
f 1 2 3
";

    fn scene_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("runway_scene_assets").join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path) {
        let image = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 200, 30, 255]));
        image.save(path).unwrap();
    }

    #[test]
    fn test_loads_model_and_textures() {
        let dir = scene_dir("loads");
        fs::write(dir.join("plane.obj"), QUAD_OBJ).unwrap();
        write_png(&dir.join("grass.png"));
        write_png(&dir.join("asphalt.png"));

        let scene = RunwayScene::new("test", dir.join("plane.obj"))
            .with_textures(dir.join("grass.png"), dir.join("asphalt.png"));
        let assets = SceneAssets::from_scene(scene).unwrap();

        assert_eq!(assets.model().unwrap().triangle_count(), 1);
        let textures = assets.textures();
        assert_eq!(textures.len(), 2);
        assert!(textures.iter().all(|(_, image)| image.width == 2));
    }

    #[test]
    fn test_missing_texture_is_not_fatal() {
        let dir = scene_dir("missing_texture");
        fs::write(dir.join("plane.obj"), QUAD_OBJ).unwrap();

        let scene = RunwayScene::new("test", dir.join("plane.obj"))
            .with_textures(dir.join("nope.png"), dir.join("nope2.png"));
        let assets = SceneAssets::from_scene(scene).unwrap();
        assert!(assets.textures().is_empty());
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let dir = scene_dir("missing_model");
        let scene = RunwayScene::new("test", dir.join("absent.obj"));
        let result = SceneAssets::from_scene(scene);
        assert!(matches!(result, Err(SceneError::Model(_))));
    }

    #[test]
    fn test_invalid_scene_is_rejected() {
        let mut scene = RunwayScene::new("test", "plane.obj");
        scene.runway_uv_scale = [0.0, 1.0];
        match SceneAssets::from_scene(scene) {
            Err(SceneError::Invalid(errors)) => {
                assert_eq!(errors, vec![ValidationError::InvalidUvScale([0.0, 1.0])]);
            }
            _ => panic!("expected validation failure"),
        }
    }

    #[test]
    fn test_reload_failure_keeps_model() {
        let dir = scene_dir("reload");
        let obj = dir.join("plane.obj");
        fs::write(&obj, QUAD_OBJ).unwrap();

        let mut assets = SceneAssets::from_scene(RunwayScene::new("test", &obj)).unwrap();
        fs::write(&obj, "v 0 0 0\nf 1 2 3\n").unwrap();

        assert!(assets.reload_model().is_err());
        assert_eq!(assets.model().unwrap().triangle_count(), 1);
    }

    #[test]
    fn test_scene_error_display() {
        let error = SceneError::Invalid(vec![ValidationError::MissingModel]);
        assert_eq!(format!("{}", error), "Invalid scene: Scene has no model path;");
    }
}
