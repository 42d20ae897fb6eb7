use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifacts::ArtifactNames;
use crate::atlas::GridGeometry;
use crate::error::ConfigError;
use crate::tiles::CanonicalOrder;

/// Build pipeline settings.
///
/// Every field has a default, so an empty JSON object (`{}`) is a complete
/// configuration. Output paths are relative to `output_dir`, which falls
/// back to `source_dir` when unset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub source_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub tile_size: u32,
    pub columns: u32,
    pub rows: u32,
    pub atlas_file: String,
    pub config_file: String,
    pub properties_file: String,
    pub renderer_source_file: String,
    /// Replaces the built-in canonical sequence when present.
    pub canonical_order: Option<Vec<String>>,
    /// File stems excluded from discovery in addition to the built-in ones.
    pub reserved_stems: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("res"),
            output_dir: None,
            tile_size: crate::DEFAULT_TILE_SIZE,
            columns: crate::DEFAULT_COLUMNS,
            rows: crate::DEFAULT_ROWS,
            atlas_file: "tilesheet.png".to_string(),
            config_file: "auto_tiles.conf".to_string(),
            properties_file: "tiled_properties.txt".to_string(),
            renderer_source_file: "tile_table.rs".to_string(),
            canonical_order: None,
            reserved_stems: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON configuration.
    ///
    /// Returns a `serde_json::Error` (wrapped) if the input is malformed or a
    /// field has the wrong type. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }

    pub fn grid(&self) -> GridGeometry {
        GridGeometry::new(self.columns, self.rows, self.tile_size)
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.source_dir)
    }

    pub fn canonical_order(&self) -> CanonicalOrder {
        match &self.canonical_order {
            Some(names) => CanonicalOrder::new(names.iter().cloned()),
            None => CanonicalOrder::default(),
        }
    }

    pub fn artifact_names(&self) -> ArtifactNames {
        ArtifactNames { atlas_file: self.atlas_file.clone() }
    }

    /// Stems never treated as tiles: the atlas itself, the player sprite
    /// sheet and its info sidecar, plus any configured extras.
    pub fn reserved_stems(&self) -> Vec<String> {
        let atlas_stem = Path::new(&self.atlas_file)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.atlas_file)
            .to_string();
        let mut stems = vec![
            atlas_stem,
            "player_spritesheet".to_string(),
            "player_spritesheet_info".to_string(),
        ];
        stems.extend(self.reserved_stems.iter().cloned());
        stems
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
