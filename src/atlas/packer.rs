use image::RgbaImage;

use crate::atlas::source::TileSource;
use crate::atlas::{AtlasCell, GridGeometry};
use crate::error::PackWarning;

// ── Grid planning (pure, no I/O) ──────────────────────────────────────────────

/// One tile's slot inside the atlas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub id: u32,
    pub name: String,
    pub cell: AtlasCell,
    /// Top-left pixel coordinate inside the atlas.
    pub atlas_x: u32,
    pub atlas_y: u32,
}

/// Result of laying out an ordered tile list on a fixed grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridPlan {
    /// One entry per packed tile; index == TileID.
    pub placements: Vec<Placement>,
    /// How many trailing tiles did not fit.
    pub dropped: usize,
}

/// Assign every tile in `ordered` the cell of its ordinal position.
///
/// Tiles past `grid.capacity()` are dropped and counted. Slots are never
/// compacted: placement `i` always sits at `(i % columns, i / columns)`.
pub fn plan(ordered: &[String], grid: GridGeometry) -> GridPlan {
    let capacity = grid.capacity();
    let packed = ordered.len().min(capacity);

    let placements = ordered[..packed]
        .iter()
        .enumerate()
        .filter_map(|(i, name)| {
            let id = i as u32;
            let cell = grid.cell_for(id)?;
            let (atlas_x, atlas_y) = grid.pixel_origin(cell);
            Some(Placement { id, name: name.clone(), cell, atlas_x, atlas_y })
        })
        .collect();

    GridPlan { placements, dropped: ordered.len() - packed }
}

// ── Composition ───────────────────────────────────────────────────────────────

/// A composed atlas plus everything that went wrong while building it.
#[derive(Debug)]
pub struct PackedAtlas {
    pub image: RgbaImage,
    pub grid: GridGeometry,
    pub placements: Vec<Placement>,
    pub dropped: usize,
    pub warnings: Vec<PackWarning>,
}

/// Lay out `ordered` on `grid` and copy each source image into its cell.
///
/// The atlas starts fully transparent and is exactly `grid.pixel_size()`.
/// Source pixels are copied unscaled and clipped to the cell. A tile whose
/// image cannot be loaded keeps its placement (and therefore its ID) but
/// its slot stays empty.
pub fn pack(ordered: &[String], grid: GridGeometry, source: &impl TileSource) -> PackedAtlas {
    let GridPlan { placements, dropped } = plan(ordered, grid);
    let mut warnings = Vec::new();

    if dropped > 0 {
        log::warn!(
            "atlas: {} tiles discovered but only {} fit in {}x{}; dropped {dropped}",
            ordered.len(),
            grid.capacity(),
            grid.columns,
            grid.rows,
        );
        warnings.push(PackWarning::CapacityExceeded { capacity: grid.capacity(), dropped });
    }

    let (atlas_w, atlas_h) = grid.pixel_size();
    let mut atlas = RgbaImage::new(atlas_w, atlas_h);

    for p in &placements {
        let tile = match source.load_tile(&p.name) {
            Ok(tile) => tile,
            Err(error) => {
                log::warn!("atlas: slot {} ('{}') left empty: {error}", p.id, p.name);
                warnings.push(PackWarning::SourceUnreadable { name: p.name.clone(), error });
                continue;
            }
        };

        let (w, h) = tile.dimensions();
        if w != grid.tile_size || h != grid.tile_size {
            log::warn!(
                "atlas: '{}' is {w}x{h}px, cell is {cell}x{cell}px; copying unscaled",
                p.name,
                cell = grid.tile_size,
            );
        }

        let copy_w = w.min(grid.tile_size);
        let copy_h = h.min(grid.tile_size);
        for dy in 0..copy_h {
            for dx in 0..copy_w {
                atlas.put_pixel(p.atlas_x + dx, p.atlas_y + dy, *tile.get_pixel(dx, dy));
            }
        }

        log::debug!(
            "atlas: placed '{}' at ({}, {}) - ID {}",
            p.name,
            p.cell.column,
            p.cell.row,
            p.id,
        );
    }

    PackedAtlas { image: atlas, grid, placements, dropped, warnings }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
