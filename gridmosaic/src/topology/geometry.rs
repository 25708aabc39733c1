//! Geometry input: which minor cells exist inside which major cells.
//!
//! The collaborator derives this mapping from grid geometry files and hands
//! it over in its support-file layout, a JSON object of
//! `{"31U": ["DE", "EE", ...], ...}`. Codes stay as raw strings here; the
//! topology builder validates them per entry so that one bad code never
//! sinks the build.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors loading a geometry support file.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// File could not be opened or read
    #[error("Failed to read geometry file: {0}")]
    Io(#[from] std::io::Error),

    /// File contents were not the expected JSON mapping
    #[error("Failed to parse geometry file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw major-cell to minor-cell mapping, as supplied by the collaborator.
///
/// Ordered by major-cell code so topology construction is deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Geometry(pub BTreeMap<String, Vec<String>>);

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the collaborator's JSON support-file layout.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, GeometryError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a geometry support file from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Add one major cell and its minor cells.
    pub fn insert(
        &mut self,
        major: impl Into<String>,
        minors: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.0
            .entry(major.into())
            .or_default()
            .extend(minors.into_iter().map(Into::into));
    }

    /// Number of major-cell entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_reader() {
        let json = r#"{"31U": ["DE", "EE"], "32V": ["DE"]}"#;
        let geometry = Geometry::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(geometry.len(), 2);
        assert_eq!(geometry.0["31U"], vec!["DE", "EE"]);
    }

    #[test]
    fn test_from_json_reader_rejects_wrong_shape() {
        let json = r#"["31U", "32V"]"#;
        assert!(Geometry::from_json_reader(json.as_bytes()).is_err());
    }

    #[test]
    fn test_insert_accumulates() {
        let mut geometry = Geometry::new();
        geometry.insert("31U", ["DE"]);
        geometry.insert("31U", ["EE"]);
        assert_eq!(geometry.len(), 1);
        assert_eq!(geometry.0["31U"], vec!["DE", "EE"]);
    }
}
