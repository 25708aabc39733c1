//! Arena records for major and minor grid cells.
//!
//! Cells live in flat arenas owned by [`Topology`](super::Topology) and
//! refer to each other through stable index newtypes. Neighbor relations
//! are index lists, never owning references, so the cyclic
//! minor ↔ major ↔ grid shape of the domain carries no lifetime cost.

use std::collections::{BTreeMap, HashMap};

use crate::grid::{Direction, MajorCellCode, MinorCellCode};

/// Stable index of a major cell within a topology arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MajorId(pub(crate) usize);

/// Stable index of a minor cell within a topology arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinorId(pub(crate) usize);

/// Resolved neighbor references for one direction.
///
/// Uniformly a list: empty means unset (grid edge or data gap), one entry
/// is the regular case, and multiple entries occur only where an exception
/// records parallel neighbors (a sliver). Call sites never special-case
/// the three shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors(pub(crate) Vec<MinorId>);

impl Neighbors {
    /// True when no neighbor exists in this direction.
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parallel neighbor references (0, 1, or more for slivers).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[MinorId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = MinorId> + '_ {
        self.0.iter().copied()
    }
}

/// One major grid cell and the minor cells it contains.
#[derive(Debug, Clone)]
pub struct MajorCell {
    code: MajorCellCode,
    minors: Vec<MinorId>,
    by_code: HashMap<MinorCellCode, MinorId>,
    /// Minor cells grouped by row letter.
    by_row: BTreeMap<char, Vec<MinorId>>,
    /// Minor cells grouped by column letter.
    by_col: BTreeMap<char, Vec<MinorId>>,
}

impl MajorCell {
    pub(crate) fn new(code: MajorCellCode) -> Self {
        Self {
            code,
            minors: Vec::new(),
            by_code: HashMap::new(),
            by_row: BTreeMap::new(),
            by_col: BTreeMap::new(),
        }
    }

    /// Register a minor cell. Returns false if the code was already present.
    pub(crate) fn insert(&mut self, code: MinorCellCode, id: MinorId) -> bool {
        if self.by_code.contains_key(&code) {
            return false;
        }
        self.by_code.insert(code, id);
        self.by_row.entry(code.row).or_default().push(id);
        self.by_col.entry(code.col).or_default().push(id);
        self.minors.push(id);
        true
    }

    pub fn code(&self) -> MajorCellCode {
        self.code
    }

    /// Minor cells in ingestion order.
    pub fn minors(&self) -> &[MinorId] {
        &self.minors
    }

    /// Lookup by (column, row) letter pair.
    pub fn minor(&self, code: MinorCellCode) -> Option<MinorId> {
        self.by_code.get(&code).copied()
    }

    /// Minor cells in this major cell's row `row`, in ingestion order.
    pub fn row_group(&self, row: char) -> &[MinorId] {
        self.by_row.get(&row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Minor cells in this major cell's column `col`, in ingestion order.
    pub fn col_group(&self, col: char) -> &[MinorId] {
        self.by_col.get(&col).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn minor_count(&self) -> usize {
        self.minors.len()
    }
}

/// One minor grid cell with its four resolved neighbor relations.
#[derive(Debug, Clone)]
pub struct MinorCell {
    code: MinorCellCode,
    major: MajorId,
    neighbors: [Neighbors; 4],
}

impl MinorCell {
    pub(crate) fn new(code: MinorCellCode, major: MajorId) -> Self {
        Self {
            code,
            major,
            neighbors: Default::default(),
        }
    }

    pub(crate) fn set_neighbors(&mut self, direction: Direction, refs: Vec<MinorId>) {
        self.neighbors[direction.index()] = Neighbors(refs);
    }

    pub fn code(&self) -> MinorCellCode {
        self.code
    }

    /// The owning major cell.
    pub fn major(&self) -> MajorId {
        self.major
    }

    /// Resolved neighbors in the given direction.
    pub fn neighbors(&self, direction: Direction) -> &Neighbors {
        &self.neighbors[direction.index()]
    }

    /// Number of directions with no resolved neighbor.
    pub fn unset_direction_count(&self) -> usize {
        Direction::ALL
            .iter()
            .filter(|d| self.neighbors(**d).is_unset())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minor(code: &str) -> MinorCellCode {
        code.parse().unwrap()
    }

    #[test]
    fn test_major_cell_insert_and_lookup() {
        let mut cell = MajorCell::new("31U".parse().unwrap());
        assert!(cell.insert(minor("DE"), MinorId(0)));
        assert!(cell.insert(minor("EE"), MinorId(1)));
        assert_eq!(cell.minor(minor("DE")), Some(MinorId(0)));
        assert_eq!(cell.minor(minor("FF")), None);
        assert_eq!(cell.minor_count(), 2);
    }

    #[test]
    fn test_major_cell_row_and_col_groups() {
        let mut cell = MajorCell::new("31U".parse().unwrap());
        cell.insert(minor("DE"), MinorId(0));
        cell.insert(minor("EE"), MinorId(1));
        cell.insert(minor("DF"), MinorId(2));
        assert_eq!(cell.row_group('E'), &[MinorId(0), MinorId(1)]);
        assert_eq!(cell.row_group('F'), &[MinorId(2)]);
        assert_eq!(cell.col_group('D'), &[MinorId(0), MinorId(2)]);
        assert!(cell.row_group('A').is_empty());
    }

    #[test]
    fn test_major_cell_rejects_duplicate_minor() {
        let mut cell = MajorCell::new("31U".parse().unwrap());
        assert!(cell.insert(minor("DE"), MinorId(0)));
        assert!(!cell.insert(minor("DE"), MinorId(1)));
        assert_eq!(cell.minor(minor("DE")), Some(MinorId(0)));
        assert_eq!(cell.minor_count(), 1);
    }

    #[test]
    fn test_minor_cell_neighbors_start_unset() {
        let cell = MinorCell::new(minor("DE"), MajorId(0));
        for dir in Direction::ALL {
            assert!(cell.neighbors(dir).is_unset());
        }
        assert_eq!(cell.unset_direction_count(), 4);
    }

    #[test]
    fn test_minor_cell_set_neighbors() {
        let mut cell = MinorCell::new(minor("DE"), MajorId(0));
        cell.set_neighbors(Direction::North, vec![MinorId(7), MinorId(9)]);
        let north = cell.neighbors(Direction::North);
        assert_eq!(north.len(), 2);
        assert_eq!(north.as_slice(), &[MinorId(7), MinorId(9)]);
        assert_eq!(cell.unset_direction_count(), 3);
    }
}
