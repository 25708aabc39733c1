//! GridMosaic - Same-day adjacent-scene discovery over the MGRS tiling grid
//!
//! This library locates, for a satellite image tile addressed in the
//! military-grid tiling scheme, every other tile that is geographically
//! adjacent and has imagery captured on the same calendar day, so that
//! adjacent-tile scenes can be mosaicked.
//!
//! # High-Level API
//!
//! Two phases: resolve an adjacency topology from a geometry catalog, then
//! search it against a tile catalog index.
//!
//! ```ignore
//! use gridmosaic::catalog::TileCatalogIndex;
//! use gridmosaic::exceptions::ExceptionTable;
//! use gridmosaic::search::find_same_day_neighbors;
//! use gridmosaic::topology::{resolve_topology, Geometry};
//!
//! let geometry = Geometry::from_json_file("support/MGRS_cells.json")?;
//! let build = resolve_topology(&geometry, ExceptionTable::utm_default())?;
//! let catalog = TileCatalogIndex::build(scene_identifiers).index;
//!
//! let scenes = find_same_day_neighbors(
//!     &build.topology,
//!     &catalog,
//!     "31UDE".parse()?,
//!     chrono::NaiveDate::from_ymd_opt(2022, 5, 30).unwrap(),
//! );
//! ```

pub mod catalog;
pub mod config;
pub mod exceptions;
pub mod grid;
pub mod logging;
pub mod search;
pub mod topology;

/// Version of the gridmosaic library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
