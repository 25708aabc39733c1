//! Scene identifier parsing.
//!
//! Scene identifiers arrive as dot-delimited strings with fixed positional
//! fields:
//!
//! ```text
//! {instrument}.{mission}.T{zone}{row}{minor-col}{minor-row}.{YYYYDDD}T{time}.{version}
//! e.g.  HLS.S30.T31UDE.2022150T105031.v2.0
//! ```
//!
//! The catalog extracts the dataset tag (instrument + mission), the tile
//! address, and the acquisition date as (year, day-of-year). Day-of-year
//! is taken at face value in 1-366; whether 366 is real for the year is
//! the collaborator's concern.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::grid::TileCode;

/// Errors raised for a scene identifier whose fixed fields cannot be
/// parsed. Offending identifiers are rejected from the catalog and
/// reported as skipped entries, never a fatal failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneParseError {
    /// Fewer dot-delimited fields than the format requires
    #[error("Scene identifier '{0}' has too few dot-delimited fields")]
    TooFewFields(String),

    /// Dataset fields empty
    #[error("Scene identifier '{0}' has an empty dataset field")]
    EmptyDataset(String),

    /// Tile field not of the form T{zone}{row}{col}{row}
    #[error("Scene identifier '{0}' has a malformed tile field")]
    BadTileField(String),

    /// Acquisition field not of the form {YYYYDDD}T{time}
    #[error("Scene identifier '{0}' has a malformed acquisition field")]
    BadAcquisitionField(String),

    /// Day-of-year outside 1-366
    #[error("Scene identifier '{0}' has day-of-year {1} outside 1-366")]
    DayOfYearOutOfRange(String, u16),
}

/// Coarse temporal key for imagery grouping: calendar year plus 1-based
/// ordinal day within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey {
    pub year: i32,
    pub doy: u16,
}

impl DayKey {
    pub fn new(year: i32, doy: u16) -> Self {
        Self { year, doy }
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            doy: date.ordinal() as u16,
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.year, self.doy)
    }
}

/// A parsed scene identifier. Immutable once parsed; identity (equality,
/// hashing, ordering) is the raw identifier string, so two acquisitions of
/// the same tile on the same day remain distinct entries.
#[derive(Debug, Clone)]
pub struct SceneId {
    raw: String,
    dataset: String,
    tile: TileCode,
    day: DayKey,
}

impl SceneId {
    /// Parse a scene identifier by the fixed positional rules.
    pub fn parse(raw: &str) -> Result<Self, SceneParseError> {
        let fields: Vec<&str> = raw.split('.').collect();
        if fields.len() < 5 {
            return Err(SceneParseError::TooFewFields(raw.to_string()));
        }
        if fields[0].is_empty() || fields[1].is_empty() {
            return Err(SceneParseError::EmptyDataset(raw.to_string()));
        }
        let dataset = format!("{}.{}", fields[0], fields[1]);

        let tile_field = fields[2];
        if tile_field.len() != 6 || !tile_field.starts_with('T') {
            return Err(SceneParseError::BadTileField(raw.to_string()));
        }
        let tile: TileCode = tile_field[1..]
            .parse()
            .map_err(|_| SceneParseError::BadTileField(raw.to_string()))?;

        let acq_field = fields[3];
        let acq_bytes = acq_field.as_bytes();
        if acq_bytes.len() < 8
            || acq_bytes[7] != b'T'
            || !acq_bytes[..7].iter().all(u8::is_ascii_digit)
        {
            return Err(SceneParseError::BadAcquisitionField(raw.to_string()));
        }
        let year: i32 = acq_field[..4]
            .parse()
            .map_err(|_| SceneParseError::BadAcquisitionField(raw.to_string()))?;
        let doy: u16 = acq_field[4..7]
            .parse()
            .map_err(|_| SceneParseError::BadAcquisitionField(raw.to_string()))?;
        if !(1..=366).contains(&doy) {
            return Err(SceneParseError::DayOfYearOutOfRange(raw.to_string(), doy));
        }

        Ok(Self {
            raw: raw.to_string(),
            dataset,
            tile,
            day: DayKey::new(year, doy),
        })
    }

    /// The full identifier string.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Dataset tag: instrument plus mission, e.g. `HLS.S30`.
    pub fn dataset(&self) -> &str {
        &self.dataset
    }

    /// Tile address (major plus minor cell).
    pub fn tile(&self) -> TileCode {
        self.tile
    }

    /// Acquisition date key.
    pub fn day(&self) -> DayKey {
        self.day
    }
}

impl PartialEq for SceneId {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for SceneId {}

impl std::hash::Hash for SceneId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for SceneId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SceneId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracts_fields() {
        let scene = SceneId::parse("HLS.S30.T31UDE.2022150T105031.v2.0").unwrap();
        assert_eq!(scene.dataset(), "HLS.S30");
        assert_eq!(scene.tile().to_string(), "31UDE");
        assert_eq!(scene.day(), DayKey::new(2022, 150));
        assert_eq!(scene.raw(), "HLS.S30.T31UDE.2022150T105031.v2.0");
    }

    #[test]
    fn test_parse_day_366_accepted() {
        // Non-leap-aware on purpose; the collaborator owns calendar sanity.
        let scene = SceneId::parse("HLS.L30.T31UDE.2021366T000000.v2.0").unwrap();
        assert_eq!(scene.day().doy, 366);
    }

    #[test]
    fn test_parse_rejects_too_few_fields() {
        assert!(matches!(
            SceneId::parse("HLS.S30.T31UDE"),
            Err(SceneParseError::TooFewFields(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_tile_field() {
        assert!(matches!(
            SceneId::parse("HLS.S30.X31UDE.2022150T105031.v2.0"),
            Err(SceneParseError::BadTileField(_))
        ));
        assert!(matches!(
            SceneId::parse("HLS.S30.T31UD.2022150T105031.v2.0"),
            Err(SceneParseError::BadTileField(_))
        ));
        assert!(matches!(
            SceneId::parse("HLS.S30.T31IDE.2022150T105031.v2.0"),
            Err(SceneParseError::BadTileField(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_acquisition_field() {
        assert!(matches!(
            SceneId::parse("HLS.S30.T31UDE.2022150.v2.0"),
            Err(SceneParseError::BadAcquisitionField(_))
        ));
        assert!(matches!(
            SceneId::parse("HLS.S30.T31UDE.202215XT105031.v2.0"),
            Err(SceneParseError::BadAcquisitionField(_))
        ));
    }

    #[test]
    fn test_parse_rejects_doy_out_of_range() {
        assert!(matches!(
            SceneId::parse("HLS.S30.T31UDE.2022000T105031.v2.0"),
            Err(SceneParseError::DayOfYearOutOfRange(_, 0))
        ));
        assert!(matches!(
            SceneId::parse("HLS.S30.T31UDE.2022367T105031.v2.0"),
            Err(SceneParseError::DayOfYearOutOfRange(_, 367))
        ));
    }

    #[test]
    fn test_identity_is_raw_string() {
        // Same tile and day, different acquisition times: distinct scenes.
        let a = SceneId::parse("HLS.S30.T31UDE.2022150T105031.v2.0").unwrap();
        let b = SceneId::parse("HLS.S30.T31UDE.2022150T112019.v2.0").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_day_key_from_date() {
        let date = NaiveDate::from_ymd_opt(2022, 5, 30).unwrap();
        assert_eq!(DayKey::from(date), DayKey::new(2022, 150));
        assert_eq!(DayKey::from(date).to_string(), "2022150");
    }
}
