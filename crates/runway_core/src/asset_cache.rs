//! Asset caching and reload
//!
//! A type-erased cache that can store any type implementing the [`Asset`]
//! trait. Models and textures are loaded once per path and shared through
//! `Arc`. The airplane model can be reloaded on demand, and all assets can
//! optionally be hot-reloaded when their files change on disk.
//!
//! # Example
//!
//! ```ignore
//! let mut cache = AssetCache::new();
//! let handle = cache.load::<Model>("assets/models/airplane/airplane.obj")?;
//! let model: Arc<Model> = cache.get::<Model>(&handle).unwrap();
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::asset_error::AssetError;

/// Unique identifier for an asset in the cache.
///
/// IDs are assigned sequentially starting from 1.
pub type AssetId = u64;

/// A lightweight handle to a cached asset.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct AssetHandle {
    id: AssetId,
    path: PathBuf,
}

impl AssetHandle {
    /// Get the asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// Get the file path this asset was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Trait for types that can be loaded from files and cached.
pub trait Asset: Sized + Send + Sync + 'static {
    /// Load this asset from the given file path.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if the file cannot be read or parsed.
    fn load_from_file(path: &Path) -> Result<Self, AssetError>;
}

struct CachedEntry {
    data: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    path: PathBuf,
    load_time: SystemTime,
}

/// A type-erased asset cache with reload support.
///
/// Loading the same path twice returns the same handle without touching the
/// file again. [`reload`](Self::reload) forces a fresh read; on failure the
/// previously cached data stays in place.
pub struct AssetCache {
    assets: HashMap<AssetId, CachedEntry>,
    path_index: HashMap<PathBuf, AssetId>,
    next_id: u64,
    watch_for_changes: bool,
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetCache {
    /// Create a new empty asset cache with hot-reload watching disabled.
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
            path_index: HashMap::new(),
            next_id: 1,
            watch_for_changes: false,
        }
    }

    /// Load an asset from the given file path, or return the cached handle if
    /// already loaded.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if the file cannot be loaded.
    pub fn load<T: Asset>(&mut self, path: impl AsRef<Path>) -> Result<AssetHandle, AssetError> {
        let path = path.as_ref().to_path_buf();

        if let Some(&id) = self.path_index.get(&path) {
            return Ok(AssetHandle { id, path });
        }

        let data = T::load_from_file(&path)?;

        let id = self.next_id;
        self.next_id += 1;

        self.assets.insert(id, CachedEntry {
            data: Arc::new(data),
            type_id: TypeId::of::<T>(),
            path: path.clone(),
            load_time: SystemTime::now(),
        });
        self.path_index.insert(path.clone(), id);

        log::debug!("Cached asset {} as #{}", path.display(), id);
        Ok(AssetHandle { id, path })
    }

    /// Retrieve a cached asset by its handle, downcasting to the requested type.
    ///
    /// Returns `None` if the handle is invalid or the stored type does not match `T`.
    pub fn get<T: Asset>(&self, handle: &AssetHandle) -> Option<Arc<T>> {
        let entry = self.assets.get(&handle.id)?;
        entry.data.clone().downcast::<T>().ok()
    }

    /// Force a reload of an asset from disk.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::NotFound`] for unknown handles, or the load error.
    /// The cached data is left untouched when loading fails.
    pub fn reload<T: Asset>(&mut self, handle: &AssetHandle) -> Result<Arc<T>, AssetError> {
        let entry = self
            .assets
            .get_mut(&handle.id)
            .ok_or_else(|| AssetError::NotFound(handle.path.display().to_string()))?;

        let data = Arc::new(T::load_from_file(&entry.path)?);
        entry.data = data.clone();
        entry.type_id = TypeId::of::<T>();
        entry.load_time = SystemTime::now();

        log::info!("Reloaded asset: {}", entry.path.display());
        Ok(data)
    }

    /// Enable or disable hot-reload file change watching.
    pub fn set_watch_for_changes(&mut self, enabled: bool) {
        self.watch_for_changes = enabled;
    }

    /// Check whether hot-reload watching is enabled.
    pub fn is_watching_for_changes(&self) -> bool {
        self.watch_for_changes
    }

    /// Check for file changes and reload modified assets of type `T`.
    ///
    /// Returns handles to all assets that were successfully reloaded. This is a
    /// no-op unless watching has been enabled.
    pub fn check_hot_reload<T: Asset>(&mut self) -> Vec<AssetHandle> {
        if !self.watch_for_changes {
            return Vec::new();
        }

        let candidates: Vec<(AssetId, PathBuf, SystemTime)> = self
            .assets
            .iter()
            .filter(|(_, entry)| entry.type_id == TypeId::of::<T>())
            .map(|(&id, entry)| (id, entry.path.clone(), entry.load_time))
            .collect();

        let mut reloaded = Vec::new();
        for (id, path, load_time) in candidates {
            let modified = match std::fs::metadata(&path).and_then(|meta| meta.modified()) {
                Ok(time) => time,
                Err(_) => continue,
            };

            if modified <= load_time {
                continue;
            }

            match T::load_from_file(&path) {
                Ok(new_data) => {
                    if let Some(entry) = self.assets.get_mut(&id) {
                        entry.data = Arc::new(new_data);
                        entry.load_time = SystemTime::now();
                    }
                    log::info!("Hot-reloaded asset: {}", path.display());
                    reloaded.push(AssetHandle { id, path });
                }
                Err(err) => {
                    log::warn!("Failed to hot-reload asset {}: {}", path.display(), err);
                }
            }
        }

        reloaded
    }

    /// Get the number of assets currently in the cache.
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Check if an asset with the given handle is still in the cache.
    pub fn contains(&self, handle: &AssetHandle) -> bool {
        self.assets.contains_key(&handle.id)
    }
}
