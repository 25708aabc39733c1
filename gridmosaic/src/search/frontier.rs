//! Outward frontier search at major-cell granularity.
//!
//! Four direction-scoped searches share one shape: a LIFO frontier of
//! major cells seeded from the search origin, expanded one pop at a time
//! through the topology's major-cell stepping, and bounded by the catalog:
//! only a candidate that yields same-date scenes joins the frontier. Each
//! direction self-terminates at the data boundary, not at a fixed radius.
//!
//! The four directions couple in exactly one documented way: a cell
//! confirmed while walking north or south re-seeds the east and west
//! frontiers. The regular grid drifts diagonally with latitude, so
//! north/south progress can expose east/west column adjacencies that are
//! invisible from the seed row. East/west discoveries never re-seed
//! anything.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info};

use crate::catalog::{DayKey, SceneId, TileCatalogIndex};
use crate::grid::{Direction, MajorCellCode, TileCode};
use crate::topology::Topology;

/// Outcome of one direction's frontier walk.
pub(crate) struct DirectionSearch {
    /// Every scene discovered while walking this direction.
    pub scenes: BTreeSet<SceneId>,
    /// Major cells confirmed to hold same-date imagery, in confirmation
    /// order. North/south confirmations become east/west seeds.
    pub confirmed: Vec<MajorCellCode>,
}

/// Walk one direction outward from `seeds` until the frontier drains.
///
/// A candidate is queued at most once over the lifetime of the walk, so
/// revisits and wraparound columns cannot cycle.
pub(crate) fn search_direction(
    topology: &Topology,
    catalog: &TileCatalogIndex,
    day: DayKey,
    direction: Direction,
    seeds: &[MajorCellCode],
) -> DirectionSearch {
    let mut frontier: Vec<MajorCellCode> = Vec::new();
    let mut queued: HashSet<MajorCellCode> = HashSet::new();
    for seed in seeds {
        if queued.insert(*seed) {
            frontier.push(*seed);
        }
    }

    let mut scenes = BTreeSet::new();
    let mut confirmed = Vec::new();
    while let Some(current) = frontier.pop() {
        for candidate in topology.major_neighbors(current, direction) {
            let mut found_any = false;
            for scene in catalog.files_for(candidate, day) {
                found_any = true;
                scenes.insert(scene.clone());
            }
            if found_any {
                debug!(%direction, from = %current, cell = %candidate, "frontier confirmed cell");
                if queued.insert(candidate) {
                    confirmed.push(candidate);
                    frontier.push(candidate);
                }
            }
        }
    }
    DirectionSearch { scenes, confirmed }
}

/// Find every scene adjacent to `seed` with imagery on the same calendar
/// day, walking outward in all four cardinal directions.
///
/// The result is the union of the seed cell's own scenes and the four
/// direction walks, deduplicated by scene identity. A completely empty
/// result (no coverage anywhere, seed included) is valid, not an error.
pub fn find_same_day_neighbors(
    topology: &Topology,
    catalog: &TileCatalogIndex,
    seed: TileCode,
    date: impl Into<DayKey>,
) -> BTreeSet<SceneId> {
    let day = date.into();
    let mut result: BTreeSet<SceneId> =
        catalog.files_for(seed.major, day).cloned().collect();

    let north = search_direction(topology, catalog, day, Direction::North, &[seed.major]);
    let south = search_direction(topology, catalog, day, Direction::South, &[seed.major]);

    // North/south confirmations re-seed the east/west walks.
    let mut lateral_seeds = vec![seed.major];
    lateral_seeds.extend_from_slice(&north.confirmed);
    lateral_seeds.extend_from_slice(&south.confirmed);
    let east = search_direction(topology, catalog, day, Direction::East, &lateral_seeds);
    let west = search_direction(topology, catalog, day, Direction::West, &lateral_seeds);

    result.extend(north.scenes);
    result.extend(south.scenes);
    result.extend(east.scenes);
    result.extend(west.scenes);
    info!(seed = %seed, %day, scenes = result.len(), "same-day neighbor search complete");
    result
}
