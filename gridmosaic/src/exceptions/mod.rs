//! Exception table for irregular major-cell adjacencies.
//!
//! At high latitudes the zone grid converges: zones merge, split, or skip,
//! and the regular "increment the row or column" stepping rule produces a
//! wrong or incomplete neighbor. This module records those anomalies as a
//! hand-curated table keyed by (major cell, direction). A hit replaces
//! regular stepping entirely, and every listed cell is a parallel neighbor
//! (one-to-many), not an alternative.

use std::collections::HashMap;

use crate::grid::{Direction, MajorCellCode};

/// Northward anomalies: zones that merge or split crossing the band above.
const NORTHWARD: &[(&str, &[&str])] = &[
    ("31U", &["31V", "32V"]),
    ("32V", &["31W", "32W"]),
    ("32W", &["31X", "33X"]),
    ("34W", &["33X", "35X"]),
    ("36W", &["35X", "37X"]),
];

/// Southward anomalies: the reverse crossings, one-to-many where a wide
/// polar zone overlaps several zones in the band below.
const SOUTHWARD: &[(&str, &[&str])] = &[
    ("31X", &["31W", "32W"]),
    ("33X", &["32W", "33W", "34W"]),
    ("35X", &["34W", "35W", "36W"]),
    ("37X", &["36W", "37W"]),
    ("31W", &["31V", "32V"]),
];

/// Eastward anomalies: polar band X has no even-numbered zones 32-36.
const EASTWARD: &[(&str, &[&str])] = &[
    ("31X", &["33X"]),
    ("33X", &["35X"]),
    ("35X", &["37X"]),
];

/// Westward anomalies: mirror of the eastward set.
const WESTWARD: &[(&str, &[&str])] = &[
    ("37X", &["35X"]),
    ("35X", &["33X"]),
    ("33X", &["31X"]),
];

/// Static lookup of major cells whose cardinal neighbors deviate from the
/// regular stepping rule.
///
/// Read-only after construction. When [`lookup`](Self::lookup) returns a
/// list, the caller must use it verbatim instead of regular stepping and
/// treat every entry as a simultaneous neighbor. Absence means "no
/// exception; step regularly."
#[derive(Debug, Clone, Default)]
pub struct ExceptionTable {
    entries: HashMap<(MajorCellCode, Direction), Vec<MajorCellCode>>,
}

impl ExceptionTable {
    /// An empty table: every lookup falls through to regular stepping.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table of UTM zone convergence anomalies.
    pub fn utm_default() -> Self {
        let mut table = Self::default();
        for (direction, rows) in [
            (Direction::North, NORTHWARD),
            (Direction::South, SOUTHWARD),
            (Direction::East, EASTWARD),
            (Direction::West, WESTWARD),
        ] {
            for (from, to_list) in rows {
                let from: MajorCellCode =
                    from.parse().expect("static exception table code is valid");
                let to_list = to_list
                    .iter()
                    .map(|code| code.parse().expect("static exception table code is valid"))
                    .collect();
                table.entries.insert((from, direction), to_list);
            }
        }
        table
    }

    /// Build a table from explicit entries.
    ///
    /// Later entries for the same (cell, direction) key replace earlier
    /// ones. Used by tests and by callers supplying their own anomaly data.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (MajorCellCode, Direction, Vec<MajorCellCode>)>,
    ) -> Self {
        let mut table = Self::default();
        for (from, direction, to_list) in entries {
            table.entries.insert((from, direction), to_list);
        }
        table
    }

    /// Look up the anomalous neighbor list for a cell and direction.
    ///
    /// `Some` means the listed cells replace the regular-stepping result,
    /// all of them in parallel. `None` means no anomaly is recorded.
    pub fn lookup(&self, cell: MajorCellCode, direction: Direction) -> Option<&[MajorCellCode]> {
        self.entries.get(&(cell, direction)).map(Vec::as_slice)
    }

    /// Number of recorded anomalies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no anomalies are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn major(code: &str) -> MajorCellCode {
        code.parse().unwrap()
    }

    #[test]
    fn test_default_table_loads() {
        let table = ExceptionTable::utm_default();
        assert_eq!(table.len(), NORTHWARD.len() + SOUTHWARD.len() + EASTWARD.len() + WESTWARD.len());
    }

    #[test]
    fn test_lookup_hit_preserves_order() {
        let table = ExceptionTable::utm_default();
        let hit = table.lookup(major("31U"), Direction::North).unwrap();
        assert_eq!(hit, &[major("31V"), major("32V")]);
    }

    #[test]
    fn test_lookup_one_to_many() {
        let table = ExceptionTable::utm_default();
        let hit = table.lookup(major("33X"), Direction::South).unwrap();
        assert_eq!(hit, &[major("32W"), major("33W"), major("34W")]);
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let table = ExceptionTable::utm_default();
        assert!(table.lookup(major("30T"), Direction::North).is_none());
        // Direction matters: 31U is anomalous northward only
        assert!(table.lookup(major("31U"), Direction::South).is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = ExceptionTable::empty();
        assert!(table.is_empty());
        assert!(table.lookup(major("31U"), Direction::North).is_none());
    }

    #[test]
    fn test_from_entries_replaces_duplicates() {
        let table = ExceptionTable::from_entries([
            (major("31U"), Direction::North, vec![major("31V")]),
            (major("31U"), Direction::North, vec![major("32V")]),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup(major("31U"), Direction::North).unwrap(),
            &[major("32V")]
        );
    }
}
