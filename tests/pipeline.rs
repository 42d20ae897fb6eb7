use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use tilesmith::artifacts::TileCatalog;
use tilesmith::error::{PackWarning, PipelineWarning};
use tilesmith::pipeline::ArtifactKind;
use tilesmith::{Pipeline, PipelineConfig, RunOutcome};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn write_tile(dir: &Path, name: &str, color: [u8; 4]) {
    RgbaImage::from_pixel(16, 16, Rgba(color)).save(dir.join(format!("{name}.png"))).unwrap();
}

fn config_for(dir: &Path) -> PipelineConfig {
    PipelineConfig { source_dir: dir.to_path_buf(), ..Default::default() }
}

fn data_rows(text: &str) -> Vec<&str> {
    text.lines().filter(|l| !l.trim().is_empty() && !l.starts_with('#')).collect()
}

// ── Full runs ─────────────────────────────────────────────────────────────────

#[test]
fn run_writes_all_four_artifacts() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    write_tile(dir.path(), "wall", [100, 100, 100, 255]);
    write_tile(dir.path(), "grass00", [0, 200, 0, 255]);
    write_tile(dir.path(), "zzzztile", [1, 2, 3, 255]);

    let summary = Pipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!(summary.outcome(), RunOutcome::Success);
    assert_eq!((summary.discovered, summary.packed, summary.dropped), (3, 3, 0));
    assert!(summary.warnings.is_empty());

    for name in ["tilesheet.png", "auto_tiles.conf", "tiled_properties.txt", "tile_table.rs"] {
        assert!(dir.path().join(name).is_file(), "{name} missing");
    }

    let config = fs::read_to_string(dir.path().join("auto_tiles.conf")).unwrap();
    assert_eq!(
        data_rows(&config),
        vec![
            "grass00,0,0,false,Grass tile",
            "wall,1,0,true,Solid wall",
            "zzzztile,2,0,false,zzzztile tile",
        ]
    );
}

#[test]
fn atlas_pixels_follow_tile_ids() {
    let dir = tempfile::tempdir().unwrap();
    write_tile(dir.path(), "wall", [100, 100, 100, 255]);
    write_tile(dir.path(), "grass00", [0, 200, 0, 255]);

    Pipeline::new(config_for(dir.path())).run().unwrap();

    let atlas = image::open(dir.path().join("tilesheet.png")).unwrap().to_rgba8();
    assert_eq!(atlas.dimensions(), (12 * 16, 6 * 16));
    assert_eq!(atlas.get_pixel(8, 8), &Rgba([0, 200, 0, 255]));
    assert_eq!(atlas.get_pixel(16 + 8, 8), &Rgba([100, 100, 100, 255]));
    assert_eq!(atlas.get_pixel(32 + 8, 8), &Rgba([0, 0, 0, 0]));
}

#[test]
fn second_run_produces_identical_text_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    for (i, name) in ["sign", "road03", "apple", "water00", "hut"].iter().enumerate() {
        write_tile(dir.path(), name, [i as u8, 0, 0, 255]);
    }
    let read_all = || {
        ["auto_tiles.conf", "tiled_properties.txt", "tile_table.rs"]
            .map(|f| fs::read(dir.path().join(f)).unwrap())
    };

    Pipeline::new(config_for(dir.path())).run().unwrap();
    let first = read_all();
    // The atlas from the first run is reserved and must not become a tile.
    let summary = Pipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!(summary.discovered, 5);
    assert_eq!(first, read_all());
}

#[test]
fn capacity_overflow_truncates_and_warns() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a", "b", "c", "d", "e"] {
        write_tile(dir.path(), name, [9, 9, 9, 255]);
    }
    let cfg = PipelineConfig { columns: 2, rows: 2, ..config_for(dir.path()) };

    let summary = Pipeline::new(cfg).run().unwrap();
    assert_eq!(summary.outcome(), RunOutcome::Success);
    assert_eq!((summary.discovered, summary.packed, summary.dropped), (5, 4, 1));
    assert!(summary.warnings.iter().any(|w| matches!(
        w,
        PipelineWarning::Pack(PackWarning::CapacityExceeded { capacity: 4, dropped: 1 })
    )));

    let catalog = TileCatalog::load(dir.path().join("auto_tiles.conf")).unwrap();
    let cells: Vec<(u32, u32)> = catalog.rows().iter().map(|r| (r.cell.column, r.cell.row)).collect();
    assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    assert_eq!(catalog.id_of("e"), None);
}

#[test]
fn unreadable_tile_keeps_its_slot() {
    let dir = tempfile::tempdir().unwrap();
    write_tile(dir.path(), "grass00", [0, 200, 0, 255]);
    fs::write(dir.path().join("grass01.png"), b"not an image").unwrap();
    write_tile(dir.path(), "water00", [0, 0, 200, 255]);

    let summary = Pipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!(summary.outcome(), RunOutcome::Success);
    assert_eq!(summary.packed, 3);
    assert!(summary.warnings.iter().any(|w| matches!(
        w,
        PipelineWarning::Pack(PackWarning::SourceUnreadable { name, .. }) if name == "grass01"
    )));

    let catalog = TileCatalog::load(dir.path().join("auto_tiles.conf")).unwrap();
    assert_eq!(catalog.id_of("grass01"), Some(1));
    assert_eq!(catalog.id_of("water00"), Some(2));

    let atlas = image::open(dir.path().join("tilesheet.png")).unwrap().to_rgba8();
    assert_eq!(atlas.get_pixel(16 + 4, 4), &Rgba([0, 0, 0, 0]));
    assert_eq!(atlas.get_pixel(32 + 4, 4), &Rgba([0, 0, 200, 255]));
}

#[test]
fn comment_like_and_padded_names_do_not_shift_reloaded_ids() {
    let dir = tempfile::tempdir().unwrap();
    write_tile(dir.path(), "#moss", [1, 1, 1, 255]);
    write_tile(dir.path(), " grass", [2, 2, 2, 255]);
    write_tile(dir.path(), "zzz", [3, 3, 3, 255]);
    write_tile(dir.path(), "wall", [4, 4, 4, 255]);

    let summary = Pipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!((summary.discovered, summary.packed), (2, 2));
    assert_eq!(summary.warnings.len(), 2);

    let catalog = TileCatalog::load(dir.path().join("auto_tiles.conf")).unwrap();
    assert_eq!(catalog.len(), summary.packed);
    assert_eq!(catalog.verify_cells(12), Ok(()));
    assert_eq!(catalog.id_of("wall"), Some(0));
    assert_eq!(catalog.id_of("zzz"), Some(1));

    let table = fs::read_to_string(dir.path().join("tile_table.rs")).unwrap();
    assert!(table.contains("// 1: zzz"));
}

#[test]
fn reserved_files_are_not_tiles() {
    let dir = tempfile::tempdir().unwrap();
    write_tile(dir.path(), "grass00", [0, 200, 0, 255]);
    write_tile(dir.path(), "tilesheet", [1, 1, 1, 255]);
    write_tile(dir.path(), "player_spritesheet", [1, 1, 1, 255]);

    let summary = Pipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!(summary.discovered, 1);
}

#[test]
fn separate_output_directory_is_created() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_tile(src.path(), "grass00", [0, 200, 0, 255]);
    let out_dir = out.path().join("generated");

    let cfg = PipelineConfig { output_dir: Some(out_dir.clone()), ..config_for(src.path()) };
    let summary = Pipeline::new(cfg).run().unwrap();
    assert_eq!(summary.outcome(), RunOutcome::Success);
    assert!(out_dir.join("tile_table.rs").is_file());
    assert!(!src.path().join("tile_table.rs").exists());
}

// ── Failure reporting ─────────────────────────────────────────────────────────

#[test]
fn partial_write_failure_is_reported_per_artifact() {
    let dir = tempfile::tempdir().unwrap();
    write_tile(dir.path(), "grass00", [0, 200, 0, 255]);
    // A directory where the properties file should go makes that write fail.
    fs::create_dir(dir.path().join("tiled_properties.txt")).unwrap();

    let summary = Pipeline::new(config_for(dir.path())).run().unwrap();
    assert_eq!(summary.outcome(), RunOutcome::PartialFailure);
    assert!(!summary.report(ArtifactKind::Properties).unwrap().is_written());
    assert!(summary.report(ArtifactKind::Config).unwrap().is_written());
    assert!(summary.report(ArtifactKind::Atlas).unwrap().is_written());
    assert_eq!(summary.failed().count(), 1);
    // Artifacts written before and after the failure stay in place.
    assert!(dir.path().join("auto_tiles.conf").is_file());
    assert!(dir.path().join("tile_table.rs").is_file());
}

#[test]
fn unwritable_output_fails_every_artifact() {
    let dir = tempfile::tempdir().unwrap();
    write_tile(dir.path(), "grass00", [0, 200, 0, 255]);
    // The output "directory" is a regular file.
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"x").unwrap();

    let cfg = PipelineConfig { output_dir: Some(blocker), ..config_for(dir.path()) };
    let summary = Pipeline::new(cfg).run().unwrap();
    assert_eq!(summary.outcome(), RunOutcome::Failed);
    assert_eq!(summary.written().count(), 0);
    assert_eq!(summary.packed, 1);
}

#[test]
fn missing_source_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config_for(&dir.path().join("nope"));
    assert!(Pipeline::new(cfg).run().is_err());
}

#[test]
fn summary_display_lists_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    write_tile(dir.path(), "grass00", [0, 200, 0, 255]);
    let text = Pipeline::new(config_for(dir.path())).run().unwrap().to_string();
    assert!(text.starts_with("tiles: 1 discovered, 1 packed, 0 dropped, 0 warnings"));
    assert!(text.contains("wrote config"));
    assert!(text.ends_with("outcome: Success"));
}
