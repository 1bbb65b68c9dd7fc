//! Integration tests for loading setups and run configuration from disk

use std::fs;
use std::io::Cursor;

use dominion::core::types::{Point, Rect};
use dominion::core::{DominionError, RunConfig};
use dominion::setup::{load_map_file, run_wizard, SetupError};
use dominion::sim::{TileType, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::tempdir;

const CROSS_MAP: &str = "\
Width: 9
Height: 7

Domains: 2
Position: 1 1
Position: 5 7
#########
#...#...#
#...#...#
#.......#
#...#...#
#...#...#
#########
";

#[test]
fn test_map_file_builds_world() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cross.map");
    fs::write(&path, CROSS_MAP).unwrap();

    let setup = load_map_file(&path).unwrap();
    assert_eq!(setup.dimensions, Rect::new(9, 7));
    assert_eq!(setup.positions, vec![Point::new(1, 1), Point::new(5, 7)]);

    let world = World::new(&setup, ChaCha8Rng::seed_from_u64(0));
    assert!(world.tile(Point::new(2, 4)).unwrap().is_border());
    assert_eq!(world.tile(Point::new(3, 4)).unwrap().tile_type(), TileType::Empty);
    assert_eq!(world.tile(Point::new(5, 7)).unwrap().tile_type(), TileType::Origin);
}

#[test]
fn test_missing_map_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = load_map_file(&dir.path().join("absent.map"));
    assert!(matches!(result, Err(DominionError::IoError(_))));
}

#[test]
fn test_bad_map_file_reports_setup_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.map");
    fs::write(&path, "width: 9\nheight: 7\ndomains: 1\nposition: 0 4\n").unwrap();

    match load_map_file(&path) {
        Err(DominionError::Setup(SetupError::OnBorder(p))) => assert_eq!(p, Point::new(0, 4)),
        other => panic!("expected border error, got {:?}", other),
    }
}

#[test]
fn test_run_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.toml");
    fs::write(&path, "seed = 99\nframe_ms = 40\nmap = \"maps/cross.map\"\n").unwrap();

    let config = RunConfig::load(&path).unwrap();
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.frame_ms, 40);
    assert_eq!(config.max_ticks, None);
    assert_eq!(config.map.as_deref(), Some(std::path::Path::new("maps/cross.map")));
}

#[test]
fn test_run_config_rejects_zero_tick_limit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.toml");
    fs::write(&path, "max_ticks = 0\n").unwrap();

    assert!(matches!(
        RunConfig::load(&path),
        Err(DominionError::InvalidConfig(_))
    ));
}

#[test]
fn test_wizard_session_matches_map_file() {
    let mut input = Cursor::new("9 7\n2\n1 1\n5 7\n");
    let mut output = Vec::new();
    let setup = run_wizard(&mut input, &mut output).unwrap();

    assert_eq!(setup.dimensions, Rect::new(9, 7));
    assert_eq!(setup.positions, vec![Point::new(1, 1), Point::new(5, 7)]);
    assert!(setup.layout.is_none());

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Domain 1 start (row column): "));
    assert!(transcript.contains("Domain 2 start (row column): "));
}
