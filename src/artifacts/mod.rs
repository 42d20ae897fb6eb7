pub mod config;
pub mod emit;

pub use config::{ConfigRow, TileCatalog};
pub use emit::{emit, emit_config, emit_properties, emit_renderer_source, Artifacts, ArtifactNames};

use crate::atlas::{AtlasCell, Placement};
use crate::tiles::{NameRules, TileMetadata};

/// Everything the emitters need to know about one packed tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRecord {
    pub id: u32,
    pub metadata: TileMetadata,
    pub cell: AtlasCell,
}

impl TileRecord {
    /// Classify every placement, keeping TileID order.
    pub fn resolve(placements: &[Placement], rules: &NameRules) -> Vec<TileRecord> {
        placements
            .iter()
            .map(|p| TileRecord { id: p.id, metadata: rules.classify(&p.name), cell: p.cell })
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}
