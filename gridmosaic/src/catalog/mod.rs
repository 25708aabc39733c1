//! Tile catalog: scene identifiers, the date-and-tile index, and the
//! snapshot refresh policy.

mod index;
mod scene;
mod snapshot;

pub use index::{CatalogBuild, SkippedScene, TileCatalogIndex};
pub use scene::{DayKey, SceneId, SceneParseError};
pub use snapshot::{FileSceneSource, SceneSource, SnapshotError, SnapshotStore};
