use std::path::Path;

use crate::artifacts::TileCatalog;
use crate::error::MapGridError;

/// Sentinel for a cell with no tile.
pub const UNKNOWN_TILE: i32 = -1;

/// Rectangular world map of tile ids, addressed by `(column, row)`.
///
/// Stored row-major. Negative ids mean "no tile"; ids past the atlas tile
/// count are kept as-is and simply render nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapGrid {
    columns: usize,
    rows: usize,
    cells: Vec<i32>,
}

impl MapGrid {
    /// A `columns × rows` grid with every cell set to `id`.
    pub fn filled(columns: usize, rows: usize, id: i32) -> Self {
        Self { columns, rows, cells: vec![id; columns * rows] }
    }

    /// Parse CSV rows: one world row per non-blank line, `columns` integer
    /// ids per row, exactly `rows` rows.
    ///
    /// Any deviation is an error; no default grid is ever substituted.
    pub fn parse(text: &str, columns: usize, rows: usize) -> Result<Self, MapGridError> {
        if columns == 0 || rows == 0 {
            return Err(MapGridError::EmptyDimensions { columns, rows });
        }

        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if lines.len() != rows {
            return Err(MapGridError::RowCount { expected: rows, found: lines.len() });
        }

        let mut cells = Vec::with_capacity(columns * rows);
        for (row, line) in lines.iter().enumerate() {
            let entries: Vec<&str> = line.split(',').map(str::trim).collect();
            if entries.len() != columns {
                return Err(MapGridError::RowLength { row, expected: columns, found: entries.len() });
            }
            for (column, value) in entries.iter().enumerate() {
                let id = value.parse::<i32>().map_err(|_| MapGridError::BadEntry {
                    row,
                    column,
                    value: value.to_string(),
                })?;
                cells.push(id);
            }
        }

        Ok(Self { columns, rows, cells })
    }

    pub fn load(path: impl AsRef<Path>, columns: usize, rows: usize) -> Result<Self, MapGridError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| MapGridError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text, columns, rows)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, column: usize, row: usize) -> Option<i32> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Overwrite one cell; returns `false` when out of bounds.
    pub fn set(&mut self, column: usize, row: usize, id: i32) -> bool {
        if column >= self.columns || row >= self.rows {
            return false;
        }
        self.cells[row * self.columns + column] = id;
        true
    }

    /// Whether the tile at `(column, row)` blocks movement.
    ///
    /// Out-of-range positions and unknown ids are not blocked.
    pub fn is_blocked(&self, column: usize, row: usize, catalog: &TileCatalog) -> bool {
        self.get(column, row).is_some_and(|id| catalog.collision(id))
    }

    /// Row-major iterator over `(column, row, id)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &id)| (i % self.columns, i / self.columns, id))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_well_formed_grid() {
        let grid = MapGrid::parse("0,1,2\n3, 4 ,5\n\n", 3, 2).unwrap();
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.get(2, 0), Some(2));
        assert_eq!(grid.get(1, 1), Some(4));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn negative_ids_are_kept() {
        let grid = MapGrid::parse("-1,7", 2, 1).unwrap();
        assert_eq!(grid.get(0, 0), Some(UNKNOWN_TILE));
    }

    #[test]
    fn short_row_is_fatal() {
        let err = MapGrid::parse("0,1,2\n3,4\n", 3, 2).unwrap_err();
        assert!(matches!(err, MapGridError::RowLength { row: 1, expected: 3, found: 2 }));
    }

    #[test]
    fn long_row_is_fatal() {
        let err = MapGrid::parse("0,1,2,9\n", 3, 1).unwrap_err();
        assert!(matches!(err, MapGridError::RowLength { row: 0, expected: 3, found: 4 }));
    }

    #[test]
    fn non_numeric_entry_is_fatal() {
        let err = MapGrid::parse("0,x,2\n", 3, 1).unwrap_err();
        assert!(matches!(err, MapGridError::BadEntry { row: 0, column: 1, ref value } if value == "x"));
    }

    #[test]
    fn wrong_row_count_is_fatal() {
        assert!(matches!(
            MapGrid::parse("0,1\n", 2, 2),
            Err(MapGridError::RowCount { expected: 2, found: 1 })
        ));
        assert!(matches!(
            MapGrid::parse("0,1\n0,1\n0,1\n", 2, 2),
            Err(MapGridError::RowCount { expected: 2, found: 3 })
        ));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(MapGrid::parse("", 0, 0), Err(MapGridError::EmptyDimensions { .. })));
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        assert!(matches!(MapGrid::load("no/such/map.csv", 1, 1), Err(MapGridError::Io { .. })));
    }

    #[test]
    fn iter_is_row_major() {
        let grid = MapGrid::parse("1,2\n3,4", 2, 2).unwrap();
        let seen: Vec<(usize, usize, i32)> = grid.iter().collect();
        assert_eq!(seen, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 4)]);
    }

    #[test]
    fn is_blocked_follows_catalog_collision() {
        let catalog = TileCatalog::parse("grass00,0,0,false,Grass tile\nwall,1,0,true,Solid wall\n").unwrap();
        let grid = MapGrid::parse("0,1,-1,9", 4, 1).unwrap();
        assert!(!grid.is_blocked(0, 0, &catalog));
        assert!(grid.is_blocked(1, 0, &catalog));
        assert!(!grid.is_blocked(2, 0, &catalog));
        assert!(!grid.is_blocked(3, 0, &catalog));
        assert!(!grid.is_blocked(10, 0, &catalog));
    }

    #[test]
    fn set_updates_in_bounds_cells_only() {
        let mut grid = MapGrid::filled(2, 2, 0);
        assert!(grid.set(1, 1, 5));
        assert!(!grid.set(2, 0, 5));
        assert_eq!(grid.get(1, 1), Some(5));
    }
}
