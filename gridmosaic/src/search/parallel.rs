//! Parallel driver for the four-direction frontier search.
//!
//! The topology and catalog are immutable snapshots, so the directional
//! walks can run on scoped threads with no shared mutable state; each
//! thread keeps its own frontier and result set and the driver merges by
//! set union. The north-discoveries-re-seed-east/west rule is preserved
//! by phasing: north and south run concurrently first, then east and west
//! run concurrently over the seed plus every north/south confirmation.

use std::collections::BTreeSet;
use std::thread;

use tracing::info;

use crate::catalog::{DayKey, SceneId, TileCatalogIndex};
use crate::grid::{Direction, TileCode};
use crate::topology::Topology;

use super::frontier::search_direction;

/// Parallel equivalent of
/// [`find_same_day_neighbors`](super::find_same_day_neighbors).
///
/// Returns the identical scene set; only the evaluation strategy differs.
pub fn find_same_day_neighbors_parallel(
    topology: &Topology,
    catalog: &TileCatalogIndex,
    seed: TileCode,
    date: impl Into<DayKey>,
) -> BTreeSet<SceneId> {
    let day = date.into();
    let mut result: BTreeSet<SceneId> =
        catalog.files_for(seed.major, day).cloned().collect();

    // Phase 1: north and south walks, no data dependency between them.
    let (north, south) = thread::scope(|scope| {
        let north = scope
            .spawn(|| search_direction(topology, catalog, day, Direction::North, &[seed.major]));
        let south = scope
            .spawn(|| search_direction(topology, catalog, day, Direction::South, &[seed.major]));
        (
            north.join().expect("north search thread panicked"),
            south.join().expect("south search thread panicked"),
        )
    });

    // Phase 2: east and west walks over the re-seeded frontier.
    let mut lateral_seeds = vec![seed.major];
    lateral_seeds.extend_from_slice(&north.confirmed);
    lateral_seeds.extend_from_slice(&south.confirmed);
    let (east, west) = thread::scope(|scope| {
        let seeds = &lateral_seeds;
        let east =
            scope.spawn(|| search_direction(topology, catalog, day, Direction::East, seeds));
        let west =
            scope.spawn(|| search_direction(topology, catalog, day, Direction::West, seeds));
        (
            east.join().expect("east search thread panicked"),
            west.join().expect("west search thread panicked"),
        )
    });

    result.extend(north.scenes);
    result.extend(south.scenes);
    result.extend(east.scenes);
    result.extend(west.scenes);
    info!(seed = %seed, %day, scenes = result.len(), "parallel same-day neighbor search complete");
    result
}
