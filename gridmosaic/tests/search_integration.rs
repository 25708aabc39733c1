//! End-to-end tests: geometry ingestion through topology resolution,
//! catalog construction, and same-day neighbor search.

use std::collections::BTreeSet;
use std::fs;

use chrono::{Datelike, NaiveDate};

use gridmosaic::catalog::{FileSceneSource, SnapshotStore, TileCatalogIndex};
use gridmosaic::exceptions::ExceptionTable;
use gridmosaic::search::{
    assemble_strip, find_same_day_neighbors, find_same_day_neighbors_parallel,
};
use gridmosaic::topology::{resolve_topology, Geometry};

/// Full rows x cols minor grid for one major cell.
fn minor_grid(cols: &[char], rows: &[char]) -> Vec<String> {
    cols.iter()
        .flat_map(|c| rows.iter().map(move |r| format!("{c}{r}")))
        .collect()
}

fn scene_for(tile: &str, doy: u16) -> String {
    format!("HLS.S30.T{tile}.2022{doy:03}T105031.v2.0")
}

#[test]
fn test_exception_path_end_to_end() {
    // 31U and 32V share a minor grid; 31U's northward neighbor is the
    // exception pair [31V, 32V], not the regular-stepped 31V (absent
    // here). The search from the 31U seed must find the 32V scene
    // through the exception path.
    let mut geometry = Geometry::new();
    geometry.insert("31U", minor_grid(&['D', 'E', 'F'], &['A', 'B', 'C']));
    geometry.insert("32V", minor_grid(&['D', 'E', 'F'], &['A', 'B', 'C']));
    let build = resolve_topology(&geometry, ExceptionTable::utm_default()).unwrap();
    assert!(build.skipped.is_empty());

    let seed_scene = scene_for("31UDE", 150);
    let exception_scene = scene_for("32VDE", 150);
    let catalog = TileCatalogIndex::build([&seed_scene, &exception_scene]).index;

    let date = NaiveDate::from_ymd_opt(2022, 5, 30).unwrap();
    assert_eq!(date.ordinal(), 150, "fixture date must be day 150");

    let scenes = find_same_day_neighbors(&build.topology, &catalog, "31UDE".parse().unwrap(), date);
    let raws: BTreeSet<&str> = scenes.iter().map(|s| s.raw()).collect();
    assert_eq!(raws, BTreeSet::from([seed_scene.as_str(), exception_scene.as_str()]));
}

#[test]
fn test_parallel_driver_agrees_with_sequential() {
    let mut geometry = Geometry::new();
    for major in ["30U", "30V", "31U", "31V", "32V"] {
        geometry.insert(major, minor_grid(&['D', 'E'], &['A', 'B']));
    }
    let topology = resolve_topology(&geometry, ExceptionTable::utm_default())
        .unwrap()
        .topology;

    let scenes: Vec<String> = ["30UDE", "30VDE", "31UDE", "31VEA", "32VDB"]
        .iter()
        .map(|tile| scene_for(tile, 150))
        .collect();
    let catalog = TileCatalogIndex::build(&scenes).index;

    let seed = "30UDE".parse().unwrap();
    let date = NaiveDate::from_ymd_opt(2022, 5, 30).unwrap();
    assert_eq!(
        find_same_day_neighbors(&topology, &catalog, seed, date),
        find_same_day_neighbors_parallel(&topology, &catalog, seed, date),
    );
}

#[test]
fn test_refresh_to_search_pipeline() {
    // Geometry support file and collaborator scene handover on disk,
    // through snapshot refresh, catalog build, topology resolution, and
    // both search granularities.
    let tmp = tempfile::tempdir().unwrap();
    let support_dir = tmp.path().join("support");

    let geometry_path = tmp.path().join("MGRS_cells.json");
    fs::write(
        &geometry_path,
        r#"{"30U": ["DE", "EE"], "31U": ["DE", "EE"]}"#,
    )
    .unwrap();

    let handover_path = tmp.path().join("handover.json");
    let scenes = [
        scene_for("30UDE", 150),
        scene_for("30UEE", 150),
        scene_for("31UDE", 150),
        scene_for("30UDE", 151),
    ];
    fs::write(&handover_path, serde_json::to_string(&scenes).unwrap()).unwrap();

    let store = SnapshotStore::new(&support_dir);
    let today = NaiveDate::from_ymd_opt(2022, 6, 1).unwrap();
    let source = FileSceneSource::new(&handover_path);
    let identifiers = store.refresh("HLSS30.v2.0", today, &source).unwrap();
    assert_eq!(identifiers.len(), scenes.len());

    let geometry = Geometry::from_json_file(&geometry_path).unwrap();
    let topology = resolve_topology(&geometry, ExceptionTable::utm_default())
        .unwrap()
        .topology;
    let catalog_build = TileCatalogIndex::build(&identifiers);
    assert!(catalog_build.skipped.is_empty());
    let catalog = catalog_build.index;

    let date = NaiveDate::from_ymd_opt(2022, 5, 30).unwrap();
    let found = find_same_day_neighbors(&topology, &catalog, "30UDE".parse().unwrap(), date);
    let raws: BTreeSet<&str> = found.iter().map(|s| s.raw()).collect();
    // Day 151 acquisition excluded; everything else is same-day reachable.
    assert_eq!(
        raws,
        BTreeSet::from([scenes[0].as_str(), scenes[1].as_str(), scenes[2].as_str()])
    );

    // Minor-cell strip: the east walk reaches 30U's EE, then its
    // continuation in 31U, which has no same-day scene, so the strip is
    // the contiguous DE-EE run inside 30U.
    let strip = assemble_strip(&topology, &catalog, "30UDE".parse().unwrap(), date);
    let strip_raws: BTreeSet<&str> = strip.files().iter().map(|s| s.raw()).collect();
    assert_eq!(
        strip_raws,
        BTreeSet::from([scenes[0].as_str(), scenes[1].as_str()])
    );

    // A second refresh the same day must serve the cached snapshot.
    fs::remove_file(&handover_path).unwrap();
    let cached = store.refresh("HLSS30.v2.0", today, &source).unwrap();
    assert_eq!(cached.len(), scenes.len());
}

#[test]
fn test_seed_only_catalog_terminates_everywhere() {
    let mut geometry = Geometry::new();
    for major in ["30T", "30U", "30V", "29U", "31U"] {
        geometry.insert(major, minor_grid(&['D'], &['E']));
    }
    let topology = resolve_topology(&geometry, ExceptionTable::utm_default())
        .unwrap()
        .topology;
    let seed_scene = scene_for("30UDE", 150);
    let catalog = TileCatalogIndex::build([&seed_scene]).index;

    let date = NaiveDate::from_ymd_opt(2022, 5, 30).unwrap();
    let found = find_same_day_neighbors(&topology, &catalog, "30UDE".parse().unwrap(), date);
    assert_eq!(found.len(), 1);
    assert_eq!(found.iter().next().unwrap().raw(), seed_scene);
}
