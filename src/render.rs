use std::fmt;

use glam::IVec2;
use image::{GenericImageView, RgbaImage, SubImage};

use crate::atlas::{AtlasCell, TileAtlas};
use crate::map::MapGrid;

// ── Viewpoint ─────────────────────────────────────────────────────────────────

/// Observer position in world pixels and the fixed screen point it is drawn at.
///
/// A world pixel `p` lands on screen at `p - world + screen_anchor`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewpoint {
    pub world: IVec2,
    pub screen_anchor: IVec2,
}

impl Viewpoint {
    pub fn new(world_x: i32, world_y: i32, anchor_x: i32, anchor_y: i32) -> Self {
        Self { world: IVec2::new(world_x, world_y), screen_anchor: IVec2::new(anchor_x, anchor_y) }
    }

    /// Keep the observer centred in a `width × height` screen, offset by half
    /// a tile so the tile the observer stands on is centred too.
    pub fn centred(world: IVec2, width: i32, height: i32, tile_size: i32) -> Self {
        Self {
            world,
            screen_anchor: IVec2::new(width / 2 - tile_size / 2, height / 2 - tile_size / 2),
        }
    }

    /// `None` when the screen position does not fit in `i32`.
    pub fn world_to_screen(&self, world: IVec2) -> Option<IVec2> {
        let axis = |p: i32, origin: i32, anchor: i32| p.checked_sub(origin)?.checked_add(anchor);
        Some(IVec2::new(
            axis(world.x, self.world.x, self.screen_anchor.x)?,
            axis(world.y, self.world.y, self.screen_anchor.y)?,
        ))
    }
}

// ── DrawRequest ───────────────────────────────────────────────────────────────

/// One atlas region to blit at a screen position.
pub struct DrawRequest<'a> {
    pub tile_id: i32,
    pub cell: AtlasCell,
    pub image: SubImage<&'a RgbaImage>,
    /// Top-left destination pixel.
    pub screen: IVec2,
}

impl fmt::Debug for DrawRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawRequest")
            .field("tile_id", &self.tile_id)
            .field("cell", &self.cell)
            .field("size", &self.image.dimensions())
            .field("screen", &self.screen)
            .finish()
    }
}

// ── TileGridRenderer ──────────────────────────────────────────────────────────

/// Turns a map grid and a viewpoint into ordered draw requests.
///
/// Rendering is pure with respect to its inputs: no I/O, no state kept
/// between frames. Cells whose id does not resolve to an atlas region are
/// skipped silently.
pub struct TileGridRenderer {
    atlas: TileAtlas,
}

impl TileGridRenderer {
    pub fn new(atlas: TileAtlas) -> Self {
        Self { atlas }
    }

    pub fn atlas(&self) -> &TileAtlas {
        &self.atlas
    }

    /// Cell size in screen pixels, saturating at `i32::MAX`.
    pub fn tile_size(&self) -> i32 {
        i32::try_from(self.atlas.grid().tile_size).unwrap_or(i32::MAX)
    }

    /// Screen position of the top-left corner of world cell `(column, row)`,
    /// or `None` when it cannot be represented in `i32` pixels.
    pub fn cell_to_screen(&self, column: usize, row: usize, view: &Viewpoint) -> Option<IVec2> {
        let ts = i32::try_from(self.atlas.grid().tile_size).ok()?;
        let x = i32::try_from(column).ok()?.checked_mul(ts)?;
        let y = i32::try_from(row).ok()?.checked_mul(ts)?;
        view.world_to_screen(IVec2::new(x, y))
    }

    /// Draw requests for every resolvable cell, row by row.
    pub fn render_frame(&self, grid: &MapGrid, view: &Viewpoint) -> Vec<DrawRequest<'_>> {
        self.collect(grid, view, |_| true)
    }

    /// Like [`render_frame`](Self::render_frame), keeping only tiles that
    /// overlap the `[0, screen_size)` rectangle.
    pub fn render_visible(&self, grid: &MapGrid, view: &Viewpoint, screen_size: IVec2) -> Vec<DrawRequest<'_>> {
        let ts = self.tile_size();
        self.collect(grid, view, |pos| {
            pos.x.saturating_add(ts) > 0 && pos.y.saturating_add(ts) > 0 && pos.x < screen_size.x && pos.y < screen_size.y
        })
    }

    fn collect(&self, grid: &MapGrid, view: &Viewpoint, keep: impl Fn(IVec2) -> bool) -> Vec<DrawRequest<'_>> {
        let mut out = Vec::new();
        for row in 0..grid.rows() {
            for column in 0..grid.columns() {
                let Some(tile_id) = grid.get(column, row) else { continue };
                let Some(screen) = self.cell_to_screen(column, row, view) else { continue };
                if !keep(screen) {
                    continue;
                }
                let Some(cell) = self.atlas.cell_for_id(tile_id) else { continue };
                let Some(image) = self.atlas.sub_image(cell.column, cell.row) else { continue };
                out.push(DrawRequest { tile_id, cell, image, screen });
            }
        }
        out
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
