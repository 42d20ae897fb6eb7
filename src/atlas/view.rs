use std::path::Path;

use image::{GenericImageView, RgbaImage, SubImage};

use crate::atlas::source::resolve_resource;
use crate::atlas::{AtlasCell, GridGeometry};
use crate::error::AtlasLoadError;

/// Runtime view over a packed atlas image.
///
/// Every lookup is total: out-of-range coordinates, ids past the tile count,
/// and an atlas that failed to load all yield `None` instead of an error.
#[derive(Clone, Debug)]
pub struct TileAtlas {
    image: Option<RgbaImage>,
    grid: GridGeometry,
    tile_count: usize,
}

impl TileAtlas {
    /// Wrap an already-decoded atlas image.
    ///
    /// An image smaller than `grid.pixel_size()` is treated as a failed load.
    pub fn from_image(image: RgbaImage, grid: GridGeometry) -> Self {
        let (need_w, need_h) = grid.pixel_size();
        let (w, h) = image.dimensions();
        if w < need_w || h < need_h {
            log::warn!("tile_atlas: image is {w}x{h}px, grid needs {need_w}x{need_h}px; atlas disabled");
            return Self::unavailable(grid);
        }
        Self { image: Some(image), grid, tile_count: grid.capacity() }
    }

    /// An atlas with no pixels; every lookup returns `None`.
    pub fn unavailable(grid: GridGeometry) -> Self {
        Self { image: None, grid, tile_count: grid.capacity() }
    }

    /// Resolve the first existing candidate path and decode it.
    pub fn try_load<P: AsRef<Path>>(candidates: &[P], grid: GridGeometry) -> Result<Self, AtlasLoadError> {
        let path = resolve_resource(candidates)?;
        let image = image::open(&path)
            .map_err(|source| AtlasLoadError::Decode { path: path.clone(), source })?
            .to_rgba8();

        let (need_w, need_h) = grid.pixel_size();
        if image.width() < need_w || image.height() < need_h {
            return Err(AtlasLoadError::TooSmall {
                path,
                expected: (need_w, need_h),
                found: image.dimensions(),
            });
        }
        log::info!("tile_atlas: loaded {path:?}");
        Ok(Self { image: Some(image), grid, tile_count: grid.capacity() })
    }

    /// Like [`try_load`](Self::try_load), but degrades to an unavailable
    /// atlas on failure so rendering draws nothing instead of crashing.
    pub fn load<P: AsRef<Path>>(candidates: &[P], grid: GridGeometry) -> Self {
        match Self::try_load(candidates, grid) {
            Ok(atlas) => atlas,
            Err(e) => {
                log::warn!("tile_atlas: {e}; rendering will draw nothing");
                Self::unavailable(grid)
            }
        }
    }

    /// Limit id lookups to the first `count` slots (the number of packed tiles).
    pub fn with_tile_count(mut self, count: usize) -> Self {
        self.tile_count = count.min(self.grid.capacity());
        self
    }

    pub fn grid(&self) -> GridGeometry {
        self.grid
    }

    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Cell of `id` if it names a packed tile.
    pub fn cell_for_id(&self, id: i32) -> Option<AtlasCell> {
        let id = u32::try_from(id).ok()?;
        if id as usize >= self.tile_count {
            return None;
        }
        self.grid.cell_for(id)
    }

    /// The `tile_size × tile_size` region at `(column, row)`.
    pub fn sub_image(&self, column: u32, row: u32) -> Option<SubImage<&RgbaImage>> {
        let image = self.image.as_ref()?;
        if !self.grid.contains(column, row) {
            return None;
        }
        let (x, y) = self.grid.pixel_origin(AtlasCell { column, row });
        let size = self.grid.tile_size;
        Some(image.view(x, y, size, size))
    }

    /// Sub-image for a tile id, via `(id % columns, id / columns)`.
    pub fn sub_image_for_id(&self, id: i32) -> Option<SubImage<&RgbaImage>> {
        let cell = self.cell_for_id(id)?;
        self.sub_image(cell.column, cell.row)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
