//! Frontier search for same-day adjacent imagery.
//!
//! Two granularities over one topology/catalog pair: the whole-tile search
//! walks major cells to collect every same-day scene reachable from a seed
//! tile, and strip assembly walks minor cells to build one contiguous
//! east-west mosaic run. Both read immutable snapshots only; the parallel
//! driver spreads the four directional walks over scoped threads.

mod frontier;
mod parallel;
mod strip;

pub use frontier::find_same_day_neighbors;
pub use parallel::find_same_day_neighbors_parallel;
pub use strip::{assemble_strip, Strip};
