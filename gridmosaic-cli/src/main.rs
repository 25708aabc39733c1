//! GridMosaic CLI - Command-line interface
//!
//! This binary provides a command-line interface to the gridmosaic
//! library: topology statistics, catalog snapshot refresh, same-day
//! neighbor search, and mosaic strip assembly.

mod error;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;

use gridmosaic::catalog::{FileSceneSource, SnapshotError, SnapshotStore, TileCatalogIndex};
use gridmosaic::config::Settings;
use gridmosaic::exceptions::ExceptionTable;
use gridmosaic::grid::TileCode;
use gridmosaic::logging::init_logging;
use gridmosaic::search::{
    assemble_strip, find_same_day_neighbors, find_same_day_neighbors_parallel,
};
use gridmosaic::topology::{resolve_topology, Geometry, TopologyBuild};

use error::CliError;

#[derive(Parser)]
#[command(name = "gridmosaic")]
#[command(about = "Find same-day adjacent satellite scenes on the MGRS grid", long_about = None)]
#[command(version = gridmosaic::VERSION)]
struct Args {
    /// Configuration file path
    #[arg(long, default_value = "config.ini")]
    config: PathBuf,

    /// Geometry support file (default: <support_dir>/MGRS_cells.json)
    #[arg(long)]
    geometry: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the grid topology and print statistics
    Topology,

    /// Refresh catalog snapshots for every configured dataset
    Refresh {
        /// JSON scene-list file handed over by the catalog collaborator
        #[arg(long)]
        handover: PathBuf,
    },

    /// Find every same-day scene adjacent to a seed tile
    Search {
        /// Seed tile code, e.g. 31UDE
        #[arg(long)]
        tile: String,

        /// Acquisition date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Dataset tag (default: first configured dataset)
        #[arg(long)]
        dataset: Option<String>,

        /// Run the four direction walks on parallel threads
        #[arg(long)]
        parallel: bool,
    },

    /// Assemble the east-west mosaic strip around a seed tile
    Strip {
        /// Seed tile code, e.g. 31UDE
        #[arg(long)]
        tile: String,

        /// Acquisition date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Dataset tag (default: first configured dataset)
        #[arg(long)]
        dataset: Option<String>,
    },
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let settings = Settings::load_from(&args.config)?;
    let _guard =
        init_logging(&settings.log_dir, "gridmosaic.log").map_err(CliError::LoggingInit)?;
    info!(version = gridmosaic::VERSION, "gridmosaic starting");

    match args.command {
        Command::Topology => {
            let build = load_topology_build(&settings, &args.geometry)?;
            println!("Major cells:          {}", build.topology.major_count());
            println!("Minor cells:          {}", build.topology.minor_count());
            println!(
                "Unresolved relations: {}",
                build.topology.unresolved_relation_count()
            );
            println!("Skipped entries:      {}", build.skipped.len());
            for skip in &build.skipped {
                match &skip.minor {
                    Some(minor) => println!("  skipped {}/{}: {}", skip.major, minor, skip.reason),
                    None => println!("  skipped {}: {}", skip.major, skip.reason),
                }
            }
        }
        Command::Refresh { handover } => {
            let store = SnapshotStore::new(&settings.support_dir);
            let source = FileSceneSource::new(&handover);
            let today = Local::now().date_naive();
            for dataset in &settings.datasets {
                let identifiers = store.refresh(dataset, today, &source)?;
                println!("{dataset}: {} scene identifiers", identifiers.len());
            }
        }
        Command::Search {
            tile,
            date,
            dataset,
            parallel,
        } => {
            let seed: TileCode = tile.parse()?;
            let topology = load_topology_build(&settings, &args.geometry)?.topology;
            let catalog = load_catalog(&settings, dataset.as_deref())?;
            let scenes = if parallel || settings.parallel_search {
                find_same_day_neighbors_parallel(&topology, &catalog, seed, date)
            } else {
                find_same_day_neighbors(&topology, &catalog, seed, date)
            };
            for scene in &scenes {
                println!("{scene}");
            }
            println!("{} scene(s) for {} on {}", scenes.len(), seed, date);
        }
        Command::Strip {
            tile,
            date,
            dataset,
        } => {
            let seed: TileCode = tile.parse()?;
            let topology = load_topology_build(&settings, &args.geometry)?.topology;
            let catalog = load_catalog(&settings, dataset.as_deref())?;
            let strip = assemble_strip(&topology, &catalog, seed, date);
            for scene in strip.files() {
                let annotation = if strip.northward_files().contains(scene) {
                    "  [northward sliver]"
                } else if strip.southward_files().contains(scene) {
                    "  [southward sliver]"
                } else {
                    ""
                };
                println!("{scene}{annotation}");
            }
            println!("{} scene(s) in strip for {} on {}", strip.len(), seed, date);
        }
    }
    Ok(())
}

/// Resolve the topology from the geometry support file.
fn load_topology_build(
    settings: &Settings,
    geometry_override: &Option<PathBuf>,
) -> Result<TopologyBuild, CliError> {
    let path = geometry_override
        .clone()
        .unwrap_or_else(|| settings.support_dir.join("MGRS_cells.json"));
    let geometry = Geometry::from_json_file(&path)?;
    Ok(resolve_topology(&geometry, ExceptionTable::utm_default())?)
}

/// Build the catalog index from the most recent snapshot of the selected
/// dataset.
fn load_catalog(settings: &Settings, dataset: Option<&str>) -> Result<TileCatalogIndex, CliError> {
    let dataset = match dataset {
        Some(dataset) => dataset,
        None => settings
            .datasets
            .first()
            .map(String::as_str)
            .ok_or(CliError::NoDataset)?,
    };
    let store = SnapshotStore::new(&settings.support_dir);
    let (_, path) = store
        .latest(dataset)?
        .ok_or_else(|| SnapshotError::NoSnapshot(dataset.to_string()))?;
    let identifiers = store.read(&path)?;
    let build = TileCatalogIndex::build(&identifiers);
    if !build.skipped.is_empty() {
        eprintln!(
            "Warning: {} malformed scene identifier(s) skipped",
            build.skipped.len()
        );
    }
    Ok(build.index)
}
