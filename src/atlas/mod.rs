pub mod packer;
pub mod source;
pub mod view;

pub use packer::{pack, plan, GridPlan, PackedAtlas, Placement};
pub use source::{resolve_resource, DirectorySource, TileSource};
pub use view::TileAtlas;

// ── AtlasCell ─────────────────────────────────────────────────────────────────

/// Grid cell of a tile inside the atlas, in cell units (not pixels).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtlasCell {
    pub column: u32,
    pub row: u32,
}

impl AtlasCell {
    /// Inverse of [`GridGeometry::cell_for`]: `column + row * columns`.
    pub fn id(&self, columns: u32) -> u32 {
        self.column + self.row * columns
    }
}

// ── GridGeometry ──────────────────────────────────────────────────────────────

/// Fixed atlas layout: `columns × rows` square cells of `tile_size` pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: u32,
    pub rows: u32,
    pub tile_size: u32,
}

impl GridGeometry {
    pub fn new(columns: u32, rows: u32, tile_size: u32) -> Self {
        Self { columns, rows, tile_size }
    }

    /// A geometry is usable when no dimension is zero and the atlas image
    /// it describes can be addressed (`u32` sides, `usize` RGBA buffer).
    pub fn is_valid(&self) -> bool {
        self.columns > 0 && self.rows > 0 && self.tile_size > 0 && self.checked_pixel_size().is_some()
    }

    /// Maximum number of tiles the atlas can hold.
    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Row-major cell of `id`, or `None` when `id` is beyond capacity.
    pub fn cell_for(&self, id: u32) -> Option<AtlasCell> {
        if self.columns == 0 || id as usize >= self.capacity() {
            return None;
        }
        Some(AtlasCell { column: id % self.columns, row: id / self.columns })
    }

    /// Whether `(column, row)` lies inside the grid.
    pub fn contains(&self, column: u32, row: u32) -> bool {
        column < self.columns && row < self.rows
    }

    /// Top-left pixel of `cell` inside the atlas image.
    pub fn pixel_origin(&self, cell: AtlasCell) -> (u32, u32) {
        (cell.column.saturating_mul(self.tile_size), cell.row.saturating_mul(self.tile_size))
    }

    /// Atlas image dimensions in pixels, saturating at `u32::MAX`.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.columns.saturating_mul(self.tile_size), self.rows.saturating_mul(self.tile_size))
    }

    /// Atlas image dimensions, or `None` when a side overflows `u32` or
    /// the RGBA buffer would not fit in memory addressing.
    pub fn checked_pixel_size(&self) -> Option<(u32, u32)> {
        let w = self.columns.checked_mul(self.tile_size)?;
        let h = self.rows.checked_mul(self.tile_size)?;
        (w as usize).checked_mul(h as usize)?.checked_mul(4)?;
        Some((w, h))
    }
}

impl Default for GridGeometry {
    /// 12 × 6 cells of 16 px.
    fn default() -> Self {
        Self::new(crate::DEFAULT_COLUMNS, crate::DEFAULT_ROWS, crate::DEFAULT_TILE_SIZE)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
