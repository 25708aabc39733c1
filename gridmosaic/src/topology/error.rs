//! Error types for topology construction.

use thiserror::Error;

/// Errors that can occur while resolving a grid topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// Geometry input produced no valid major cells. No search is
    /// meaningful over an empty grid, so this is fatal.
    #[error("Geometry input yielded zero major cells")]
    EmptyTopology,
}
