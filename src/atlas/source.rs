use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{AtlasLoadError, TileLoadError};

// ── TileSource ────────────────────────────────────────────────────────────────

/// Something that can hand the packer the pixels of a named tile.
///
/// The packer never touches the filesystem directly; decoding is delegated
/// here so tests can supply images from memory.
pub trait TileSource {
    fn load_tile(&self, name: &str) -> Result<RgbaImage, TileLoadError>;
}

/// In-memory source, keyed by tile name.
impl TileSource for HashMap<String, RgbaImage> {
    fn load_tile(&self, name: &str) -> Result<RgbaImage, TileLoadError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| TileLoadError::Missing(name.to_string()))
    }
}

// ── DirectorySource ───────────────────────────────────────────────────────────

/// Tile images discovered on disk, decoded lazily by the `image` crate.
#[derive(Clone, Debug, Default)]
pub struct DirectorySource {
    paths: HashMap<String, PathBuf>,
}

impl DirectorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` under `name`. Returns `false` if the name was taken;
    /// the first registration is kept.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> bool {
        let name = name.into();
        if self.paths.contains_key(&name) {
            return false;
        }
        self.paths.insert(name, path.into());
        true
    }

    pub fn path_of(&self, name: &str) -> Option<&Path> {
        self.paths.get(name).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }
}

impl TileSource for DirectorySource {
    fn load_tile(&self, name: &str) -> Result<RgbaImage, TileLoadError> {
        let path = self
            .paths
            .get(name)
            .ok_or_else(|| TileLoadError::Missing(name.to_string()))?;
        image::open(path)
            .map(|img| img.to_rgba8())
            .map_err(|source| TileLoadError::Decode { path: path.clone(), source })
    }
}

// ── Resource resolution ───────────────────────────────────────────────────────

/// First existing file among `candidates`, tried in order.
pub fn resolve_resource<P: AsRef<Path>>(candidates: &[P]) -> Result<PathBuf, AtlasLoadError> {
    candidates
        .iter()
        .map(|p| p.as_ref())
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            AtlasLoadError::NotFound(candidates.iter().map(|p| p.as_ref().to_path_buf()).collect())
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
