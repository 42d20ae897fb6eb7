use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ── Tile sources ──────────────────────────────────────────────────────────────

/// Why a single tile image could not be produced for its atlas slot.
#[derive(Debug, Error)]
pub enum TileLoadError {
    #[error("no source image registered for tile '{0}'")]
    Missing(String),

    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

// ── Build pipeline ────────────────────────────────────────────────────────────

/// A recovered, non-fatal problem encountered while packing the atlas.
#[derive(Debug, Error)]
pub enum PackWarning {
    /// More tiles were discovered than the grid can hold; the tail was dropped.
    #[error("atlas capacity is {capacity} tiles; dropped {dropped}")]
    CapacityExceeded { capacity: usize, dropped: usize },

    /// The tile keeps its ID but its slot stays transparent.
    #[error("tile '{name}' left empty: {error}")]
    SourceUnreadable {
        name: String,
        #[source]
        error: TileLoadError,
    },
}

/// A recovered problem encountered while scanning the source directory.
#[derive(Debug, Error)]
pub enum DiscoveryWarning {
    #[error("duplicate tile name '{name}' from {path:?}; skipping")]
    DuplicateName { name: String, path: PathBuf },

    #[error("tile name {name:?} cannot be written to the config artifact; skipping")]
    UnsupportedName { name: String },

    #[error("could not read directory entry: {0}")]
    Entry(String),
}

/// Anything the pipeline recovered from during a run.
#[derive(Debug, Error)]
pub enum PipelineWarning {
    #[error(transparent)]
    Discovery(#[from] DiscoveryWarning),

    #[error(transparent)]
    Pack(#[from] PackWarning),
}

/// A single artifact that could not be written to disk.
#[derive(Debug, Error)]
pub enum ArtifactWriteError {
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Fatal errors: the run stops and produces no artifacts.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source directory {path:?} is unreadable: {reason}")]
    SourceDirUnreadable { path: PathBuf, reason: String },

    #[error("invalid atlas geometry: {columns}x{rows} cells of {tile_size}px")]
    InvalidGeometry { columns: u32, rows: u32, tile_size: u32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failure to read the pipeline configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

/// A line of the config artifact that does not follow
/// `name,column,row,collision[,description]`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct ConfigParseError {
    pub line: usize,
    pub reason: String,
}

/// Failure to load the config artifact from disk.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read tile config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ConfigParseError),
}

// ── Runtime ───────────────────────────────────────────────────────────────────

/// The map grid text did not describe a `columns × rows` rectangle of IDs.
#[derive(Debug, Error)]
pub enum MapGridError {
    #[error("failed to read map {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("map dimensions must be non-zero (got {columns}x{rows})")]
    EmptyDimensions { columns: usize, rows: usize },

    #[error("row {row}: expected {expected} entries, found {found}")]
    RowLength { row: usize, expected: usize, found: usize },

    #[error("row {row}, column {column}: {value:?} is not a tile id")]
    BadEntry { row: usize, column: usize, value: String },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
}

/// Why the atlas image is unavailable at runtime.
#[derive(Debug, Error)]
pub enum AtlasLoadError {
    #[error("none of the candidate paths exist: {0:?}")]
    NotFound(Vec<PathBuf>),

    #[error("failed to decode atlas {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("atlas {path:?} is {found:?}px but the grid needs at least {expected:?}px")]
    TooSmall {
        path: PathBuf,
        expected: (u32, u32),
        found: (u32, u32),
    },
}
