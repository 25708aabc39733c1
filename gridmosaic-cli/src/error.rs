//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use gridmosaic::catalog::SnapshotError;
use gridmosaic::config::SettingsError;
use gridmosaic::grid::GridCodeError;
use gridmosaic::topology::{GeometryError, TopologyError};

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Configuration error
    Config(SettingsError),
    /// Failed to load the geometry support file
    Geometry(GeometryError),
    /// Topology resolution failed
    Topology(TopologyError),
    /// Snapshot store or scene source failure
    Snapshot(SnapshotError),
    /// Invalid tile code on the command line
    TileCode(GridCodeError),
    /// No dataset configured or selected
    NoDataset,
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Snapshot(SnapshotError::NoSnapshot(dataset)) => {
                eprintln!();
                eprintln!("No catalog snapshot exists for '{dataset}'.");
                eprintln!("Run: gridmosaic refresh --handover <scene-list.json>");
            }
            CliError::Geometry(_) => {
                eprintln!();
                eprintln!("The geometry support file should be a JSON object mapping");
                eprintln!("major-cell codes to minor-cell code lists, e.g.");
                eprintln!("  {{\"31U\": [\"DE\", \"EE\"]}}");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Geometry(e) => write!(f, "Failed to load geometry: {}", e),
            CliError::Topology(e) => write!(f, "Topology resolution failed: {}", e),
            CliError::Snapshot(e) => write!(f, "Catalog snapshot error: {}", e),
            CliError::TileCode(e) => write!(f, "Invalid tile code: {}", e),
            CliError::NoDataset => write!(f, "No dataset configured or selected"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Geometry(e) => Some(e),
            CliError::Topology(e) => Some(e),
            CliError::Snapshot(e) => Some(e),
            CliError::TileCode(e) => Some(e),
            CliError::NoDataset => None,
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        CliError::Config(e)
    }
}

impl From<GeometryError> for CliError {
    fn from(e: GeometryError) -> Self {
        CliError::Geometry(e)
    }
}

impl From<TopologyError> for CliError {
    fn from(e: TopologyError) -> Self {
        CliError::Topology(e)
    }
}

impl From<SnapshotError> for CliError {
    fn from(e: SnapshotError) -> Self {
        CliError::Snapshot(e)
    }
}

impl From<GridCodeError> for CliError {
    fn from(e: GridCodeError) -> Self {
        CliError::TileCode(e)
    }
}
