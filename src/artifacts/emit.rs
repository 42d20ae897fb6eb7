//! Text artifacts derived from one ordered `TileRecord` slice.
//!
//! All three emitters iterate the same slice front to back, so line `i` of
//! each table always describes TileID `i`.

use std::fmt::Write as _;

use crate::artifacts::TileRecord;
use crate::atlas::GridGeometry;

/// File names that the emitted text refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactNames {
    pub atlas_file: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self { atlas_file: "tilesheet.png".to_string() }
    }
}

/// The three text artifacts of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    pub config: String,
    pub properties: String,
    pub renderer_source: String,
}

pub fn emit(records: &[TileRecord], grid: GridGeometry, names: &ArtifactNames) -> Artifacts {
    Artifacts {
        config: emit_config(records),
        properties: emit_properties(records, grid, names),
        renderer_source: emit_renderer_source(records, grid, names),
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

/// `name,column,row,collision,description`, one line per tile.
pub fn emit_config(records: &[TileRecord]) -> String {
    let mut out = String::new();
    out.push_str("# Auto-generated tile configuration\n");
    out.push_str("# Format: name,column,row,collision,description\n");
    out.push_str("# DO NOT EDIT MANUALLY - changes are overwritten on the next build\n");
    out.push('\n');

    for r in records {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            r.metadata.name, r.cell.column, r.cell.row, r.metadata.collision, r.metadata.description,
        );
    }
    out
}

// ── Properties ────────────────────────────────────────────────────────────────

pub fn emit_properties(records: &[TileRecord], grid: GridGeometry, names: &ArtifactNames) -> String {
    let mut out = String::new();
    out.push_str("# Auto-generated tile properties\n");
    out.push_str("# Copy these properties for each tile in your map editor\n");
    out.push('\n');

    for r in records {
        let _ = writeln!(out, "# {} (ID: {}, Collision: {})", r.metadata.name, r.id, r.metadata.collision);
        let _ = writeln!(out, "tile_id: {}", r.id);
        let _ = writeln!(out, "collision: {}", r.metadata.collision);
        let _ = writeln!(out, "description: {}", r.metadata.description);
        out.push('\n');
    }

    out.push_str("# Setup:\n");
    let _ = writeln!(out, "# 1. Create a tileset with {0}x{0} tiles", grid.tile_size);
    let _ = writeln!(out, "# 2. Load {}", names.atlas_file);
    out.push_str("# 3. Add the properties above to each tile\n");
    out
}

// ── Renderer source ───────────────────────────────────────────────────────────

/// Rust source holding the per-id `(column, row, collision)` table.
pub fn emit_renderer_source(records: &[TileRecord], grid: GridGeometry, names: &ArtifactNames) -> String {
    let mut out = String::new();
    out.push_str("// Auto-generated by tilesmith. Do not edit; rebuild the atlas instead.\n");
    out.push('\n');
    out.push_str("/// Atlas slot and collision flag for one tile id.\n");
    out.push_str("#[derive(Copy, Clone, Debug, PartialEq, Eq)]\n");
    out.push_str("pub struct TileDef {\n");
    out.push_str("    pub column: u32,\n");
    out.push_str("    pub row: u32,\n");
    out.push_str("    pub collision: bool,\n");
    out.push_str("}\n");
    out.push('\n');
    let _ = writeln!(out, "pub const ATLAS_FILE: &str = {:?};", names.atlas_file);
    let _ = writeln!(out, "pub const TILE_SIZE: u32 = {};", grid.tile_size);
    let _ = writeln!(out, "pub const ATLAS_COLUMNS: u32 = {};", grid.columns);
    let _ = writeln!(out, "pub const ATLAS_ROWS: u32 = {};", grid.rows);
    out.push('\n');

    let _ = writeln!(out, "pub const TILES: [TileDef; {}] = [", records.len());
    for r in records {
        let _ = writeln!(
            out,
            "    TileDef {{ column: {}, row: {}, collision: {} }}, // {}: {}",
            r.cell.column, r.cell.row, r.metadata.collision, r.id, r.metadata.name,
        );
    }
    out.push_str("];\n");
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
