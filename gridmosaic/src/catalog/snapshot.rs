//! Snapshot store and catalog refresh policy.
//!
//! The catalog index is rebuilt from dated snapshot files cached in a
//! support directory, one per dataset per day, holding the collaborator's
//! raw enumeration of scene identifiers as a JSON array. The refresh rule:
//! if no snapshot dated today exists, ask the collaborator for a fresh
//! enumeration and write it as today's snapshot; then rebuild from
//! whichever snapshot is most recent. Network concerns (pagination, retry,
//! backoff) live entirely behind the [`SceneSource`] seam.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

/// Errors from the snapshot store or the collaborating scene source.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot directory or file could not be accessed
    #[error("Failed to access snapshot store: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file contents were not a JSON array of strings
    #[error("Failed to decode snapshot file {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The collaborating scene source failed to enumerate a dataset
    #[error("Scene source failed for dataset {dataset}: {reason}")]
    Source { dataset: String, reason: String },

    /// No snapshot exists and none could be produced
    #[error("No snapshot available for dataset {0}")]
    NoSnapshot(String),
}

impl SnapshotError {
    /// Convenience constructor for [`SceneSource`] implementors.
    pub fn source(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        SnapshotError::Source {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }
}

/// Collaborator seam for scene enumeration.
///
/// An implementor produces the complete current list of scene identifier
/// strings for a dataset. How it does so (catalog API polling, file
/// handover) is its own concern; enumeration must be complete before the
/// resulting snapshot is considered valid.
pub trait SceneSource {
    fn enumerate(&self, dataset: &str) -> Result<Vec<String>, SnapshotError>;
}

/// A scene source backed by a single JSON file handed over by the
/// collaborator (a JSON array of identifier strings).
pub struct FileSceneSource {
    path: PathBuf,
}

impl FileSceneSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SceneSource for FileSceneSource {
    fn enumerate(&self, dataset: &str) -> Result<Vec<String>, SnapshotError> {
        let file = File::open(&self.path)
            .map_err(|e| SnapshotError::source(dataset, format!("{}: {e}", self.path.display())))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| SnapshotError::Decode {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Dated snapshot files for scene enumerations, one directory for all
/// datasets.
///
/// File layout: `{dataset}_files_{MMDDYYYY}.json` in the support
/// directory. The layout is an internal cache convention, not a wire
/// contract.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The snapshot path for a dataset and date.
    pub fn path_for(&self, dataset: &str, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{dataset}_files_{}.json", date.format("%m%d%Y")))
    }

    /// The most recent snapshot on disk for a dataset, if any.
    pub fn latest(&self, dataset: &str) -> Result<Option<(NaiveDate, PathBuf)>, SnapshotError> {
        let prefix = format!("{dataset}_files_");
        let mut latest: Option<(NaiveDate, PathBuf)> = None;
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(stamp) = name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(".json"))
            else {
                continue;
            };
            let Ok(date) = NaiveDate::parse_from_str(stamp, "%m%d%Y") else {
                continue;
            };
            if latest.as_ref().map(|(d, _)| date > *d).unwrap_or(true) {
                latest = Some((date, entry.path()));
            }
        }
        Ok(latest)
    }

    /// Read one snapshot file back into its identifier list.
    pub fn read(&self, path: &Path) -> Result<Vec<String>, SnapshotError> {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| SnapshotError::Decode {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write a dataset snapshot for the given date, creating the support
    /// directory if needed.
    pub fn write(
        &self,
        dataset: &str,
        date: NaiveDate,
        identifiers: &[String],
    ) -> Result<PathBuf, SnapshotError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(dataset, date);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, identifiers).map_err(|e| SnapshotError::Decode {
            path: path.clone(),
            source: e,
        })?;
        writer.flush()?;
        info!(dataset, path = %path.display(), scenes = identifiers.len(), "wrote catalog snapshot");
        Ok(path)
    }

    /// Apply the refresh policy and return the identifier list to rebuild
    /// the index from.
    ///
    /// If no snapshot dated `today` exists, `source` is asked for a fresh
    /// enumeration, which is written as today's snapshot. The returned
    /// list always comes from the most recent snapshot on disk.
    pub fn refresh(
        &self,
        dataset: &str,
        today: NaiveDate,
        source: &dyn SceneSource,
    ) -> Result<Vec<String>, SnapshotError> {
        let latest = self.latest(dataset)?;
        match &latest {
            Some((date, path)) if *date == today => {
                debug!(dataset, path = %path.display(), "snapshot for today already cached");
            }
            _ => {
                info!(dataset, %today, "no snapshot for today; asking scene source");
                let identifiers = source.enumerate(dataset)?;
                self.write(dataset, today, &identifiers)?;
            }
        }
        let (_, path) = self
            .latest(dataset)?
            .ok_or_else(|| SnapshotError::NoSnapshot(dataset.to_string()))?;
        self.read(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scene source that counts calls and returns a fixed list.
    struct MockSource {
        identifiers: Vec<String>,
        calls: RefCell<usize>,
    }

    impl MockSource {
        fn new(identifiers: &[&str]) -> Self {
            Self {
                identifiers: identifiers.iter().map(|s| s.to_string()).collect(),
                calls: RefCell::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl SceneSource for MockSource {
        fn enumerate(&self, _dataset: &str) -> Result<Vec<String>, SnapshotError> {
            *self.calls.borrow_mut() += 1;
            Ok(self.identifiers.clone())
        }
    }

    struct FailingSource;

    impl SceneSource for FailingSource {
        fn enumerate(&self, dataset: &str) -> Result<Vec<String>, SnapshotError> {
            Err(SnapshotError::source(dataset, "catalog unreachable"))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_write_then_latest_and_read() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        let identifiers = vec!["HLS.S30.T31UDE.2022150T105031.v2.0".to_string()];
        store.write("HLSS30.v2.0", date(2022, 5, 30), &identifiers).unwrap();

        let (latest_date, path) = store.latest("HLSS30.v2.0").unwrap().unwrap();
        assert_eq!(latest_date, date(2022, 5, 30));
        assert_eq!(store.read(&path).unwrap(), identifiers);
    }

    #[test]
    fn test_latest_picks_most_recent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        store.write("HLSS30.v2.0", date(2022, 5, 28), &[]).unwrap();
        store.write("HLSS30.v2.0", date(2022, 5, 30), &[]).unwrap();
        store.write("HLSS30.v2.0", date(2022, 5, 29), &[]).unwrap();

        let (latest_date, _) = store.latest("HLSS30.v2.0").unwrap().unwrap();
        assert_eq!(latest_date, date(2022, 5, 30));
    }

    #[test]
    fn test_latest_ignores_other_datasets_and_noise() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        store.write("HLSL30.v2.0", date(2022, 5, 30), &[]).unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        fs::write(tmp.path().join("HLSS30.v2.0_files_baddate.json"), "[]").unwrap();

        assert!(store.latest("HLSS30.v2.0").unwrap().is_none());
    }

    #[test]
    fn test_latest_on_missing_dir_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path().join("absent"));
        assert!(store.latest("HLSS30.v2.0").unwrap().is_none());
    }

    #[test]
    fn test_refresh_fetches_when_no_snapshot_for_today() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        let source = MockSource::new(&["HLS.S30.T31UDE.2022150T105031.v2.0"]);

        let identifiers = store.refresh("HLSS30.v2.0", date(2022, 5, 30), &source).unwrap();
        assert_eq!(source.call_count(), 1);
        assert_eq!(identifiers.len(), 1);
        // Snapshot written for today
        assert!(store.path_for("HLSS30.v2.0", date(2022, 5, 30)).exists());
    }

    #[test]
    fn test_refresh_skips_source_when_today_cached() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        let cached = vec!["HLS.S30.T31UDE.2022150T105031.v2.0".to_string()];
        store.write("HLSS30.v2.0", date(2022, 5, 30), &cached).unwrap();
        let source = MockSource::new(&["unexpected"]);

        let identifiers = store.refresh("HLSS30.v2.0", date(2022, 5, 30), &source).unwrap();
        assert_eq!(source.call_count(), 0);
        assert_eq!(identifiers, cached);
    }

    #[test]
    fn test_refresh_propagates_source_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        let result = store.refresh("HLSS30.v2.0", date(2022, 5, 30), &FailingSource);
        assert!(matches!(result, Err(SnapshotError::Source { .. })));
    }

    #[test]
    fn test_file_scene_source_reads_handover() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("handover.json");
        fs::write(&path, r#"["HLS.S30.T31UDE.2022150T105031.v2.0"]"#).unwrap();
        let source = FileSceneSource::new(&path);
        let identifiers = source.enumerate("HLSS30.v2.0").unwrap();
        assert_eq!(identifiers.len(), 1);
    }

    #[test]
    fn test_file_scene_source_missing_file_is_source_error() {
        let source = FileSceneSource::new("/nonexistent/handover.json");
        assert!(matches!(
            source.enumerate("HLSS30.v2.0"),
            Err(SnapshotError::Source { .. })
        ));
    }
}
