//! Discovery → ordering → packing → emission, as one synchronous run.
//!
//! Concurrent runs against the same output directory are not supported;
//! callers must serialize them.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::artifacts::{emit, TileRecord};
use crate::atlas::{pack, DirectorySource};
use crate::config::PipelineConfig;
use crate::error::{ArtifactWriteError, DiscoveryWarning, PipelineError, PipelineWarning};
use crate::tiles::NameRules;

// ── Artifact reporting ────────────────────────────────────────────────────────

/// Which output file a report refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Atlas,
    Config,
    Properties,
    RendererSource,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtifactKind::Atlas => "atlas",
            ArtifactKind::Config => "config",
            ArtifactKind::Properties => "properties",
            ArtifactKind::RendererSource => "renderer source",
        })
    }
}

/// Outcome of writing a single artifact.
#[derive(Debug)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub result: Result<(), ArtifactWriteError>,
}

impl ArtifactReport {
    pub fn is_written(&self) -> bool {
        self.result.is_ok()
    }
}

/// Overall verdict of a run, derived from the artifact reports only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Success,
    PartialFailure,
    Failed,
}

// ── RunSummary ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RunSummary {
    /// Tile files accepted by discovery.
    pub discovered: usize,
    /// Tiles that received an atlas slot (== N, the TileID range).
    pub packed: usize,
    /// Tiles cut by the capacity limit.
    pub dropped: usize,
    pub warnings: Vec<PipelineWarning>,
    pub artifacts: Vec<ArtifactReport>,
}

impl RunSummary {
    pub fn outcome(&self) -> RunOutcome {
        let written = self.artifacts.iter().filter(|a| a.is_written()).count();
        if written == self.artifacts.len() {
            RunOutcome::Success
        } else if written == 0 {
            RunOutcome::Failed
        } else {
            RunOutcome::PartialFailure
        }
    }

    pub fn written(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts.iter().filter(|a| a.is_written())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.artifacts.iter().filter(|a| !a.is_written())
    }

    pub fn report(&self, kind: ArtifactKind) -> Option<&ArtifactReport> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    /// Machine-readable form of the summary, for `--json` output.
    pub fn to_json(&self) -> serde_json::Value {
        let artifacts: Vec<serde_json::Value> = self
            .artifacts
            .iter()
            .map(|a| {
                serde_json::json!({
                    "kind": a.kind,
                    "path": a.path,
                    "error": a.result.as_ref().err().map(ToString::to_string),
                })
            })
            .collect();
        serde_json::json!({
            "discovered": self.discovered,
            "packed": self.packed,
            "dropped": self.dropped,
            "outcome": self.outcome(),
            "warnings": self.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "artifacts": artifacts,
        })
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "tiles: {} discovered, {} packed, {} dropped, {} warnings",
            self.discovered,
            self.packed,
            self.dropped,
            self.warnings.len(),
        )?;
        for a in &self.artifacts {
            match &a.result {
                Ok(()) => writeln!(f, "  wrote {} -> {}", a.kind, a.path.display())?,
                Err(e) => writeln!(f, "  FAILED {}: {e}", a.kind)?,
            }
        }
        write!(f, "outcome: {:?}", self.outcome())
    }
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Tile files found in a source directory.
#[derive(Debug, Default)]
pub struct Discovery {
    pub names: BTreeSet<String>,
    pub source: DirectorySource,
    pub warnings: Vec<DiscoveryWarning>,
}

/// Scan `dir` (non-recursively) for `.png` tiles, skipping `reserved` stems.
///
/// Entries are visited in file-name order so duplicate-stem resolution is
/// deterministic: the first path wins.
pub fn discover(dir: &Path, reserved: &[String]) -> Result<Discovery, PipelineError> {
    std::fs::read_dir(dir).map_err(|e| PipelineError::SourceDirUnreadable {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut found = Discovery::default();

    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("pipeline: {e}");
                found.warnings.push(DiscoveryWarning::Entry(e.to_string()));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let is_png = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }
        let name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => continue,
        };
        if reserved.iter().any(|r| r.eq_ignore_ascii_case(&name)) {
            log::debug!("pipeline: skipping reserved file {path:?}");
            continue;
        }
        if !is_config_safe(&name) {
            log::warn!("pipeline: tile name {name:?} cannot round-trip through the config; skipping");
            found.warnings.push(DiscoveryWarning::UnsupportedName { name });
            continue;
        }

        if !found.source.insert(name.clone(), path) {
            log::warn!("pipeline: duplicate tile name '{name}' from {path:?}; skipping");
            found.warnings.push(DiscoveryWarning::DuplicateName { name, path: path.to_path_buf() });
            continue;
        }
        found.names.insert(name);
    }

    Ok(found)
}

/// Whether `name` reads back unchanged as the first field of a config row:
/// no separators, no surrounding whitespace, and not mistaken for a comment.
fn is_config_safe(name: &str) -> bool {
    !name.contains([',', '\n', '\r']) && name.trim() == name && !name.starts_with('#')
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// One configured build of the atlas and its companion artifacts.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    rules: NameRules,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config, rules: NameRules::default() }
    }

    /// Replace the default name heuristics.
    pub fn with_rules(mut self, rules: NameRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage and write all four artifacts.
    ///
    /// Only an unreadable source directory or an unusable grid is fatal.
    /// Everything else (dropped tiles, undecodable images, failed writes)
    /// is recorded in the returned summary.
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let grid = self.config.grid();
        if !grid.is_valid() {
            return Err(PipelineError::InvalidGeometry {
                columns: grid.columns,
                rows: grid.rows,
                tile_size: grid.tile_size,
            });
        }

        // ── 1. Discover ───────────────────────────────────────────────────
        let Discovery { names, source, warnings: discovery_warnings } =
            discover(&self.config.source_dir, &self.config.reserved_stems())?;
        log::info!("pipeline: found {} tile images in {:?}", names.len(), self.config.source_dir);

        // ── 2. Order and pack ─────────────────────────────────────────────
        let ordered = self.config.canonical_order().order(&names);
        let atlas = pack(&ordered, grid, &source);

        // ── 3. Resolve metadata and emit text ─────────────────────────────
        let records = TileRecord::resolve(&atlas.placements, &self.rules);
        let text = emit(&records, grid, &self.config.artifact_names());

        // ── 4. Write ──────────────────────────────────────────────────────
        let out_dir = self.config.output_dir();
        if let Err(e) = std::fs::create_dir_all(out_dir) {
            log::warn!("pipeline: cannot create output directory {out_dir:?}: {e}");
        }

        let atlas_path = out_dir.join(&self.config.atlas_file);
        let atlas_result = atlas
            .image
            .save(&atlas_path)
            .map_err(|source| ArtifactWriteError::Image { path: atlas_path.clone(), source });

        let mut artifacts = vec![ArtifactReport { kind: ArtifactKind::Atlas, path: atlas_path, result: atlas_result }];
        for (kind, file, body) in [
            (ArtifactKind::Config, &self.config.config_file, &text.config),
            (ArtifactKind::Properties, &self.config.properties_file, &text.properties),
            (ArtifactKind::RendererSource, &self.config.renderer_source_file, &text.renderer_source),
        ] {
            let path = out_dir.join(file);
            let result = write_text(&path, body);
            artifacts.push(ArtifactReport { kind, path, result });
        }

        for a in &artifacts {
            if let Err(e) = &a.result {
                log::warn!("pipeline: {} artifact not written: {e}", a.kind);
            }
        }

        let mut warnings: Vec<PipelineWarning> =
            discovery_warnings.into_iter().map(PipelineWarning::from).collect();
        warnings.extend(atlas.warnings.into_iter().map(PipelineWarning::from));

        let summary = RunSummary {
            discovered: names.len(),
            packed: atlas.placements.len(),
            dropped: atlas.dropped,
            warnings,
            artifacts,
        };
        log::info!(
            "pipeline: {} tiles packed, {} dropped, {} of {} artifacts written ({:?})",
            summary.packed,
            summary.dropped,
            summary.written().count(),
            summary.artifacts.len(),
            summary.outcome(),
        );
        Ok(summary)
    }
}

fn write_text(path: &Path, body: &str) -> Result<(), ArtifactWriteError> {
    std::fs::write(path, body).map_err(|source| ArtifactWriteError::Io { path: path.to_path_buf(), source })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
