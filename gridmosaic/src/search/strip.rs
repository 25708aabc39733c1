//! Minor-cell strip assembly.
//!
//! The minor-cell-granularity companion to the coarse whole-tile search:
//! starting from one seed tile, collect the contiguous east-west strip of
//! same-day scenes suitable for mosaicking. Sliver duplicates of the seed
//! footprint in the northward/southward major neighbors join the strip
//! (and are recorded separately), and both they and the seed anchor the
//! east/west walk over the resolved minor-cell adjacency.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::catalog::{DayKey, SceneId, TileCatalogIndex};
use crate::grid::{Direction, TileCode};
use crate::topology::{MinorId, Topology};

/// One contiguous east-west run of same-day scenes around a seed tile.
#[derive(Debug, Clone)]
pub struct Strip {
    day: DayKey,
    files: Vec<SceneId>,
    northward_files: Vec<SceneId>,
    southward_files: Vec<SceneId>,
}

impl Strip {
    fn new(day: DayKey) -> Self {
        Self {
            day,
            files: Vec::new(),
            northward_files: Vec::new(),
            southward_files: Vec::new(),
        }
    }

    pub fn day(&self) -> DayKey {
        self.day
    }

    /// Every scene in the strip, in discovery order, deduplicated by
    /// scene identity.
    pub fn files(&self) -> &[SceneId] {
        &self.files
    }

    /// Sliver scenes found in the seed's northward major neighbor(s).
    pub fn northward_files(&self) -> &[SceneId] {
        &self.northward_files
    }

    /// Sliver scenes found in the seed's southward major neighbor(s).
    pub fn southward_files(&self) -> &[SceneId] {
        &self.southward_files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no coverage exists at the seed or any reached cell.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Assemble the east-west strip of same-day scenes around `seed`.
///
/// Empty coverage at the seed yields an empty strip, not an error.
pub fn assemble_strip(
    topology: &Topology,
    catalog: &TileCatalogIndex,
    seed: TileCode,
    date: impl Into<DayKey>,
) -> Strip {
    let day = date.into();
    let mut strip = Strip::new(day);
    let mut seen: HashSet<String> = HashSet::new();

    for scene in catalog.files_for_minor(seed, day) {
        push_unique(&mut strip.files, &mut seen, scene);
    }

    // Sliver check: the same minor letters in the north/south major
    // neighbor(s) are the seed footprint spilling across the boundary.
    let mut walk_seeds: Vec<MinorId> = topology.minor_by_tile(seed).into_iter().collect();
    for direction in [Direction::North, Direction::South] {
        for major in topology.major_neighbors(seed.major, direction) {
            let sliver_tile = TileCode::new(major, seed.minor);
            let mut found_any = false;
            for scene in catalog.files_for_minor(sliver_tile, day) {
                found_any = true;
                if push_unique(&mut strip.files, &mut seen, scene) {
                    match direction {
                        Direction::North => strip.northward_files.push(scene.clone()),
                        _ => strip.southward_files.push(scene.clone()),
                    }
                }
            }
            if found_any {
                debug!(seed = %seed, sliver = %sliver_tile, %direction, "sliver joins strip");
                walk_seeds.extend(topology.minor_by_tile(sliver_tile));
            }
        }
    }

    // East/west walk over the resolved minor-cell adjacency, anchored at
    // the seed and any slivers.
    for direction in [Direction::East, Direction::West] {
        let mut frontier = walk_seeds.clone();
        let mut queued: HashSet<MinorId> = frontier.iter().copied().collect();
        while let Some(current) = frontier.pop() {
            for neighbor in topology.minor_neighbors(current, direction).iter() {
                let tile = topology.tile_code(neighbor);
                let mut found_any = false;
                for scene in catalog.files_for_minor(tile, day) {
                    found_any = true;
                    push_unique(&mut strip.files, &mut seen, scene);
                }
                if found_any && queued.insert(neighbor) {
                    frontier.push(neighbor);
                }
            }
        }
    }

    info!(seed = %seed, %day, files = strip.len(), "assembled strip");
    strip
}

fn push_unique(files: &mut Vec<SceneId>, seen: &mut HashSet<String>, scene: &SceneId) -> bool {
    if seen.insert(scene.raw().to_string()) {
        files.push(scene.clone());
        true
    } else {
        false
    }
}
