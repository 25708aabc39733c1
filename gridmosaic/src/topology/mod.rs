//! Adjacency topology over the irregular two-layer grid.
//!
//! The builder ingests a geometry catalog (which minor cells exist inside
//! which major cells), constructs arena-backed cell records with row and
//! column groupings at both layers, and resolves the four cardinal
//! neighbor relations of every minor cell: exception table first, then
//! regular stepping, with cross-boundary lookups at major-cell seams. The
//! result is an immutable snapshot the frontier search reads without
//! locking.
//!
//! Neighbor relations are symmetric under the reverse direction except
//! across sliver boundaries, where one cell holds parallel references
//! whose owners each point back singly. That one-to-many asymmetry models
//! the split ground footprint and is intentional.

mod builder;
mod cells;
mod error;
mod geometry;

pub use builder::{resolve_topology, SkippedGeometry, Topology, TopologyBuild};
pub use cells::{MajorCell, MajorId, MinorCell, MinorId, Neighbors};
pub use error::TopologyError;
pub use geometry::{Geometry, GeometryError};
