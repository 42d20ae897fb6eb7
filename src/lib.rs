pub mod artifacts;
pub mod atlas;
pub mod config;
pub mod error;
pub mod map;
pub mod pipeline;
pub mod render;
pub mod tiles;

pub use atlas::{AtlasCell, GridGeometry, TileAtlas};
pub use config::PipelineConfig;
pub use map::MapGrid;
pub use pipeline::{Pipeline, RunOutcome, RunSummary};
pub use render::{DrawRequest, TileGridRenderer, Viewpoint};

/// Default atlas cell size in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 16;
/// Default atlas grid: 12 columns × 6 rows.
pub const DEFAULT_COLUMNS: u32 = 12;
pub const DEFAULT_ROWS: u32 = 6;
