use std::path::Path;

use crate::atlas::AtlasCell;
use crate::error::{CatalogError, ConfigParseError};

/// One parsed line of the config artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigRow {
    pub name: String,
    pub cell: AtlasCell,
    pub collision: bool,
    pub description: String,
}

/// The config artifact loaded back into memory; row index == TileID.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileCatalog {
    rows: Vec<ConfigRow>,
}

impl TileCatalog {
    /// Parse `name,column,row,collision[,description]` lines.
    ///
    /// Blank lines and `#` comments are skipped. The description is
    /// everything after the fourth comma and may itself contain commas.
    pub fn parse(text: &str) -> Result<Self, ConfigParseError> {
        let mut rows = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let err = |reason: String| ConfigParseError { line: idx + 1, reason };

            let parts: Vec<&str> = line.splitn(5, ',').map(str::trim).collect();
            if parts.len() < 4 {
                return Err(err(format!("expected at least 4 fields, found {}", parts.len())));
            }

            let column = parts[1]
                .parse::<u32>()
                .map_err(|_| err(format!("column {:?} is not a number", parts[1])))?;
            let row = parts[2]
                .parse::<u32>()
                .map_err(|_| err(format!("row {:?} is not a number", parts[2])))?;
            let collision = parts[3]
                .parse::<bool>()
                .map_err(|_| err(format!("collision {:?} is not true/false", parts[3])))?;

            rows.push(ConfigRow {
                name: parts[0].to_string(),
                cell: AtlasCell { column, row },
                collision,
                description: parts.get(4).map(|s| s.to_string()).unwrap_or_default(),
            });
        }

        Ok(Self { rows })
    }

    /// Read and parse a config artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        Ok(Self::parse(&text)?)
    }

    pub fn rows(&self) -> &[ConfigRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: i32) -> Option<&ConfigRow> {
        usize::try_from(id).ok().and_then(|i| self.rows.get(i))
    }

    /// Collision flag of `id`; unknown ids do not collide.
    pub fn collision(&self, id: i32) -> bool {
        self.get(id).is_some_and(|r| r.collision)
    }

    /// TileID of `name`, if present.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.rows.iter().position(|r| r.name == name).map(|i| i as u32)
    }

    /// First row whose cell disagrees with `(id % columns, id / columns)`.
    pub fn verify_cells(&self, columns: u32) -> Result<(), (u32, AtlasCell)> {
        for (i, row) in self.rows.iter().enumerate() {
            let id = i as u32;
            if columns == 0 || row.cell.column != id % columns || row.cell.row != id / columns {
                return Err((id, row.cell));
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
