//! In-memory index of available imagery.
//!
//! Two derived mappings over one arena of parsed scenes: by acquisition
//! date, and by major-cell code within each date bucket. Rebuilt whenever
//! the collaborator catalog refreshes; read-only between rebuilds, so a
//! search can hold it for its whole lifetime without locking.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::grid::{MajorCellCode, TileCode};

use super::scene::{DayKey, SceneId, SceneParseError};

/// A scene identifier rejected during catalog construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedScene {
    pub raw: String,
    pub reason: SceneParseError,
}

/// Result of a catalog build: the index plus the batch of identifiers
/// that failed to parse.
#[derive(Debug)]
pub struct CatalogBuild {
    pub index: TileCatalogIndex,
    pub skipped: Vec<SkippedScene>,
}

/// Date-and-tile index over a dataset's scene identifiers.
#[derive(Debug, Default)]
pub struct TileCatalogIndex {
    scenes: Vec<SceneId>,
    by_date: HashMap<DayKey, Vec<usize>>,
    by_date_tile: HashMap<DayKey, HashMap<MajorCellCode, Vec<usize>>>,
}

impl TileCatalogIndex {
    /// Build an index from a collaborator-supplied enumeration of scene
    /// identifier strings.
    ///
    /// Malformed identifiers are skipped and reported on the returned
    /// [`CatalogBuild`]; every parseable scene is retained, including
    /// multiple acquisitions of the same (tile, date) pair.
    pub fn build(identifiers: impl IntoIterator<Item = impl AsRef<str>>) -> CatalogBuild {
        let mut index = TileCatalogIndex::default();
        let mut skipped = Vec::new();
        for raw in identifiers {
            let raw = raw.as_ref();
            match SceneId::parse(raw) {
                Ok(scene) => index.insert(scene),
                Err(reason) => {
                    warn!(scene = %raw, %reason, "skipping malformed scene identifier");
                    skipped.push(SkippedScene {
                        raw: raw.to_string(),
                        reason,
                    });
                }
            }
        }
        info!(
            scenes = index.len(),
            dates = index.date_count(),
            skipped = skipped.len(),
            "built tile catalog index"
        );
        CatalogBuild { index, skipped }
    }

    fn insert(&mut self, scene: SceneId) {
        let slot = self.scenes.len();
        let day = scene.day();
        let major = scene.tile().major;
        self.by_date.entry(day).or_default().push(slot);
        self.by_date_tile
            .entry(day)
            .or_default()
            .entry(major)
            .or_default()
            .push(slot);
        self.scenes.push(scene);
    }

    /// Scenes for one major cell on one date, in insertion order.
    pub fn files_for(
        &self,
        major: MajorCellCode,
        day: impl Into<DayKey>,
    ) -> impl Iterator<Item = &SceneId> {
        self.by_date_tile
            .get(&day.into())
            .and_then(|tiles| tiles.get(&major))
            .into_iter()
            .flatten()
            .map(|slot| &self.scenes[*slot])
    }

    /// Scenes for one full tile address (major plus minor cell) on one
    /// date. Narrows the major-cell bucket by minor code.
    pub fn files_for_minor(
        &self,
        tile: TileCode,
        day: impl Into<DayKey>,
    ) -> impl Iterator<Item = &SceneId> {
        self.files_for(tile.major, day)
            .filter(move |scene| scene.tile().minor == tile.minor)
    }

    /// All scenes on one date, in insertion order.
    pub fn files_on(&self, day: impl Into<DayKey>) -> impl Iterator<Item = &SceneId> {
        self.by_date
            .get(&day.into())
            .into_iter()
            .flatten()
            .map(|slot| &self.scenes[*slot])
    }

    /// Total number of indexed scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Number of distinct acquisition dates.
    pub fn date_count(&self) -> usize {
        self.by_date.len()
    }
}
