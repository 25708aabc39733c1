//! Topology construction and neighbor resolution.
//!
//! Two passes over the geometry input: the first constructs the major- and
//! minor-cell arenas and the row/column groupings, the second resolves the
//! four cardinal neighbor relations of every minor cell against the frozen
//! arenas. Resolution consults the exception table first, then regular
//! stepping inside the same major cell, then the stepped major cell
//! (sliver continuation before the regular cross-boundary cell). A cell
//! with no candidate after all three keeps an unset relation; that is a
//! grid edge or data gap, not an error.
//!
//! Resolution reads only the frozen arenas, so re-running it over the same
//! geometry yields an identical topology.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, warn};

use crate::exceptions::ExceptionTable;
use crate::grid::{Direction, GridCodeError, MajorCellCode, MinorCellCode, TileCode};

use super::cells::{MajorCell, MajorId, MinorCell, MinorId, Neighbors};
use super::error::TopologyError;
use super::geometry::Geometry;

/// A geometry entry rejected during construction, with the offending code
/// and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedGeometry {
    /// The major-cell key the entry appeared under
    pub major: String,
    /// The minor-cell code, when the minor code was at fault
    pub minor: Option<String>,
    /// Why the code was rejected
    pub reason: GridCodeError,
}

/// Result of a topology build: the resolved topology plus the batch of
/// geometry entries that were rejected along the way.
#[derive(Debug)]
pub struct TopologyBuild {
    pub topology: Topology,
    pub skipped: Vec<SkippedGeometry>,
}

/// Immutable adjacency topology over the two-layer grid.
///
/// Built once per geometry refresh by [`resolve_topology`]; read-only for
/// the lifetime of every search over it.
#[derive(Debug)]
pub struct Topology {
    majors: Vec<MajorCell>,
    minors: Vec<MinorCell>,
    major_index: HashMap<MajorCellCode, MajorId>,
    /// Grid-wide row groups, keyed by the major cells' row letter.
    rows: BTreeMap<char, Vec<MajorId>>,
    /// Grid-wide column groups, keyed by the major cells' zone number.
    zones: BTreeMap<u8, Vec<MajorId>>,
    exceptions: ExceptionTable,
}

impl Topology {
    pub fn major(&self, id: MajorId) -> &MajorCell {
        &self.majors[id.0]
    }

    pub fn minor(&self, id: MinorId) -> &MinorCell {
        &self.minors[id.0]
    }

    pub fn major_by_code(&self, code: MajorCellCode) -> Option<MajorId> {
        self.major_index.get(&code).copied()
    }

    /// Find the minor cell addressed by a full tile code.
    pub fn minor_by_tile(&self, tile: TileCode) -> Option<MinorId> {
        let major = self.major_by_code(tile.major)?;
        self.majors[major.0].minor(tile.minor)
    }

    /// Reconstruct the full tile code of a minor cell.
    pub fn tile_code(&self, id: MinorId) -> TileCode {
        let minor = &self.minors[id.0];
        TileCode::new(self.majors[minor.major().0].code(), minor.code())
    }

    /// Major cells holding this row letter, in ingestion order.
    pub fn row_group(&self, row: char) -> &[MajorId] {
        self.rows.get(&row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Major cells holding this zone number, in ingestion order.
    pub fn zone_group(&self, zone: u8) -> &[MajorId] {
        self.zones.get(&zone).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn major_count(&self) -> usize {
        self.majors.len()
    }

    pub fn minor_count(&self) -> usize {
        self.minors.len()
    }

    /// Total number of (minor cell, direction) relations left unset.
    ///
    /// Diagnostic only; unset relations are normal at grid edges.
    pub fn unresolved_relation_count(&self) -> usize {
        self.minors.iter().map(MinorCell::unset_direction_count).sum()
    }

    /// Iterate all major cells with their ids.
    pub fn majors(&self) -> impl Iterator<Item = (MajorId, &MajorCell)> {
        self.majors.iter().enumerate().map(|(i, c)| (MajorId(i), c))
    }

    /// Iterate all minor cells with their ids.
    pub fn minors(&self) -> impl Iterator<Item = (MinorId, &MinorCell)> {
        self.minors.iter().enumerate().map(|(i, c)| (MinorId(i), c))
    }

    /// The exception table this topology was resolved against.
    pub fn exceptions(&self) -> &ExceptionTable {
        &self.exceptions
    }

    /// Major-cell-granularity stepping: the cell(s) one step away in
    /// `direction`.
    ///
    /// Exception-table entries are authoritative and returned verbatim;
    /// otherwise the single regular-stepped code. The result is not
    /// required to exist in this topology: whether a stepped-to cell has
    /// imagery is the catalog's question, not the grid's.
    pub fn major_neighbors(&self, code: MajorCellCode, direction: Direction) -> Vec<MajorCellCode> {
        match self.exceptions.lookup(code, direction) {
            Some(listed) => listed.to_vec(),
            None => vec![code.step(direction)],
        }
    }

    /// Resolved minor-cell neighbors of `id` in `direction`.
    pub fn minor_neighbors(&self, id: MinorId, direction: Direction) -> &Neighbors {
        self.minors[id.0].neighbors(direction)
    }
}

/// Build the adjacency topology for a geometry catalog.
///
/// Invalid codes are rejected per entry and reported on the returned
/// [`TopologyBuild`]; the build continues with the remainder. Fails only
/// when no valid major cell survives.
pub fn resolve_topology(
    geometry: &Geometry,
    exceptions: ExceptionTable,
) -> Result<TopologyBuild, TopologyError> {
    let mut skipped = Vec::new();
    let mut majors: Vec<MajorCell> = Vec::new();
    let mut minors: Vec<MinorCell> = Vec::new();
    let mut major_index: HashMap<MajorCellCode, MajorId> = HashMap::new();
    let mut rows: BTreeMap<char, Vec<MajorId>> = BTreeMap::new();
    let mut zones: BTreeMap<u8, Vec<MajorId>> = BTreeMap::new();

    // Pass 1: construct cells and groupings.
    for (major_str, minor_strs) in &geometry.0 {
        let major_code: MajorCellCode = match major_str.parse() {
            Ok(code) => code,
            Err(reason) => {
                warn!(major = %major_str, %reason, "skipping geometry entry");
                skipped.push(SkippedGeometry {
                    major: major_str.clone(),
                    minor: None,
                    reason,
                });
                continue;
            }
        };
        let major_id = MajorId(majors.len());
        let mut cell = MajorCell::new(major_code);
        for minor_str in minor_strs {
            match minor_str.parse::<MinorCellCode>() {
                Ok(minor_code) => {
                    let minor_id = MinorId(minors.len());
                    if cell.insert(minor_code, minor_id) {
                        minors.push(MinorCell::new(minor_code, major_id));
                    }
                }
                Err(reason) => {
                    warn!(major = %major_str, minor = %minor_str, %reason, "skipping minor cell");
                    skipped.push(SkippedGeometry {
                        major: major_str.clone(),
                        minor: Some(minor_str.clone()),
                        reason,
                    });
                }
            }
        }
        debug!(major = %major_code, minors = cell.minor_count(), "indexed major cell");
        major_index.insert(major_code, major_id);
        rows.entry(major_code.row).or_default().push(major_id);
        zones.entry(major_code.zone).or_default().push(major_id);
        majors.push(cell);
    }

    if majors.is_empty() {
        return Err(TopologyError::EmptyTopology);
    }

    // Pass 2: resolve every neighbor relation against the frozen arenas.
    let resolved: Vec<[Vec<MinorId>; 4]> = minors
        .iter()
        .map(|minor| {
            let home = &majors[minor.major().0];
            Direction::ALL.map(|direction| {
                resolve_neighbor(&majors, &major_index, &exceptions, home, minor.code(), direction)
            })
        })
        .collect();
    for (minor, refs) in minors.iter_mut().zip(resolved) {
        for (direction, refs) in Direction::ALL.into_iter().zip(refs) {
            minor.set_neighbors(direction, refs);
        }
    }

    let topology = Topology {
        majors,
        minors,
        major_index,
        rows,
        zones,
        exceptions,
    };
    info!(
        majors = topology.major_count(),
        minors = topology.minor_count(),
        unresolved = topology.unresolved_relation_count(),
        skipped = skipped.len(),
        "resolved grid topology"
    );
    Ok(TopologyBuild { topology, skipped })
}

/// Resolve one (minor cell, direction) relation.
///
/// Order of authority: exception table, same-major stepping, stepped major
/// cell (exact code before stepped code). An empty result is a grid edge.
fn resolve_neighbor(
    majors: &[MajorCell],
    major_index: &HashMap<MajorCellCode, MajorId>,
    exceptions: &ExceptionTable,
    home: &MajorCell,
    code: MinorCellCode,
    direction: Direction,
) -> Vec<MinorId> {
    // Exceptions are authoritative: every listed major cell contributes a
    // parallel neighbor when it holds the same minor letters. A listed
    // cell without a match is skipped, never guessed.
    if let Some(listed) = exceptions.lookup(home.code(), direction) {
        return listed
            .iter()
            .filter_map(|major_code| major_index.get(major_code))
            .filter_map(|major_id| majors[major_id.0].minor(code))
            .collect();
    }

    // Regular stepping inside the same major cell.
    let stepped_minor = code.step(direction);
    if let Some(id) = home.minor(stepped_minor) {
        return vec![id];
    }

    // Cross-boundary: the stepped major cell, preferring a sliver
    // continuation (same minor letters) over the stepped minor letters.
    let stepped_major = home.code().step(direction);
    if let Some(major_id) = major_index.get(&stepped_major) {
        let next = &majors[major_id.0];
        if let Some(id) = next.minor(code) {
            return vec![id];
        }
        if let Some(id) = next.minor(stepped_minor) {
            return vec![id];
        }
    }

    Vec::new()
}
