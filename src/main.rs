use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use tilesmith::{Pipeline, PipelineConfig, RunOutcome};

// ── CLI ──────────────────────────────────────────────────────────────────────

/// Pack a directory of tile images into an atlas plus its config,
/// properties and renderer-table artifacts.
#[derive(Parser, Debug)]
#[command(name = "tilesmith", version, about)]
struct Cli {
    /// Directory of individual tile PNGs (default: `res`).
    source_dir: Option<PathBuf>,

    /// JSON pipeline configuration; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where artifacts are written (default: the source directory).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    columns: Option<u32>,

    #[arg(long)]
    rows: Option<u32>,

    #[arg(long)]
    tile_size: Option<u32>,

    /// Print the run summary as JSON instead of text.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> Result<(PipelineConfig, bool), tilesmith::error::ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(dir) = self.source_dir {
            cfg.source_dir = dir;
        }
        if let Some(dir) = self.output {
            cfg.output_dir = Some(dir);
        }
        if let Some(v) = self.columns {
            cfg.columns = v;
        }
        if let Some(v) = self.rows {
            cfg.rows = v;
        }
        if let Some(v) = self.tile_size {
            cfg.tile_size = v;
        }
        Ok((cfg, self.json))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, json) = match Cli::parse().into_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let summary = match Pipeline::new(config).run() {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        println!("{}", summary.to_json());
    } else {
        println!("{summary}");
    }

    match summary.outcome() {
        RunOutcome::Success => ExitCode::SUCCESS,
        RunOutcome::Failed => ExitCode::FAILURE,
        RunOutcome::PartialFailure => ExitCode::from(2),
    }
}
