//! Grid cell identifiers.
//!
//! Three levels of addressing: a [`MajorCellCode`] names a zone/row-band
//! cell ("31U"), a [`MinorCellCode`] names a 100 km subdivision within a
//! major cell ("DE", column letter then row letter), and a [`TileCode`]
//! concatenates the two ("31UDE") to name one imagery tile.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::step::{
    decrement_letter, decrement_zone, increment_letter, increment_zone, is_grid_letter,
    is_grid_zone,
};

/// Errors raised when a grid code falls outside the valid alphabet or
/// zone range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridCodeError {
    /// Letter outside the 24-letter grid alphabet
    #[error("Invalid grid letter '{0}': must be A-Z excluding I and O")]
    InvalidLetter(char),

    /// Zone number outside 1-60
    #[error("Invalid zone {0}: must be between 1 and 60")]
    InvalidZone(u8),

    /// Major cell code string malformed
    #[error("Invalid major cell code '{0}': expected two-digit zone then row letter, e.g. 31U")]
    InvalidMajorCode(String),

    /// Minor cell code string malformed
    #[error("Invalid minor cell code '{0}': expected column letter then row letter, e.g. DE")]
    InvalidMinorCode(String),

    /// Tile code string malformed
    #[error("Invalid tile code '{0}': expected major then minor code, e.g. 31UDE")]
    InvalidTileCode(String),
}

/// One of the four cardinal directions used for grid stepping and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions, in the order the search processes them.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The reverse direction (North ↔ South, East ↔ West).
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Stable array index for per-direction storage.
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

/// Identity of a major grid cell: zone number (column) and row-band letter.
///
/// Formats as the zero-padded three-character form, e.g. `05W` or `31U`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MajorCellCode {
    /// Column: zone number 1-60
    pub zone: u8,
    /// Row: band letter from the grid alphabet
    pub row: char,
}

impl MajorCellCode {
    /// Build a code from parts, validating the zone range and row letter.
    pub fn new(zone: u8, row: char) -> Result<Self, GridCodeError> {
        if !is_grid_zone(zone) {
            return Err(GridCodeError::InvalidZone(zone));
        }
        if !is_grid_letter(row) {
            return Err(GridCodeError::InvalidLetter(row));
        }
        Ok(Self { zone, row })
    }

    /// The regular-grid neighbor code one step in `direction`.
    ///
    /// North/south step the row letter (skipping I and O), east/west step
    /// the zone number (wrapping around the globe). This is the fallback
    /// rule only; exception-table entries override it where configured.
    pub fn step(&self, direction: Direction) -> MajorCellCode {
        match direction {
            Direction::North => MajorCellCode {
                zone: self.zone,
                row: increment_letter(self.row),
            },
            Direction::South => MajorCellCode {
                zone: self.zone,
                row: decrement_letter(self.row),
            },
            Direction::East => MajorCellCode {
                zone: increment_zone(self.zone),
                row: self.row,
            },
            Direction::West => MajorCellCode {
                zone: decrement_zone(self.zone),
                row: self.row,
            },
        }
    }
}

impl FromStr for MajorCellCode {
    type Err = GridCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(d1), Some(d2), Some(row), None) =
            (chars.next(), chars.next(), chars.next(), chars.next())
        else {
            return Err(GridCodeError::InvalidMajorCode(s.to_string()));
        };
        let (Some(d1), Some(d2)) = (d1.to_digit(10), d2.to_digit(10)) else {
            return Err(GridCodeError::InvalidMajorCode(s.to_string()));
        };
        MajorCellCode::new((d1 * 10 + d2) as u8, row)
            .map_err(|_| GridCodeError::InvalidMajorCode(s.to_string()))
    }
}

impl fmt::Display for MajorCellCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{}", self.zone, self.row)
    }
}

/// Identity of a minor cell within a major cell: column letter then
/// row letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinorCellCode {
    /// Column letter (east-west axis)
    pub col: char,
    /// Row letter (north-south axis)
    pub row: char,
}

impl MinorCellCode {
    /// Build a code from parts, validating both letters.
    pub fn new(col: char, row: char) -> Result<Self, GridCodeError> {
        if !is_grid_letter(col) {
            return Err(GridCodeError::InvalidLetter(col));
        }
        if !is_grid_letter(row) {
            return Err(GridCodeError::InvalidLetter(row));
        }
        Ok(Self { col, row })
    }

    /// The regular-grid neighbor code one step in `direction`.
    ///
    /// Both axes are letters: north/south step the row letter, east/west
    /// step the column letter, all with I/O skipping and Z-A wraparound.
    pub fn step(&self, direction: Direction) -> MinorCellCode {
        match direction {
            Direction::North => MinorCellCode {
                col: self.col,
                row: increment_letter(self.row),
            },
            Direction::South => MinorCellCode {
                col: self.col,
                row: decrement_letter(self.row),
            },
            Direction::East => MinorCellCode {
                col: increment_letter(self.col),
                row: self.row,
            },
            Direction::West => MinorCellCode {
                col: decrement_letter(self.col),
                row: self.row,
            },
        }
    }
}

impl FromStr for MinorCellCode {
    type Err = GridCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(col), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(GridCodeError::InvalidMinorCode(s.to_string()));
        };
        MinorCellCode::new(col, row).map_err(|_| GridCodeError::InvalidMinorCode(s.to_string()))
    }
}

impl fmt::Display for MinorCellCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col, self.row)
    }
}

/// Full address of one imagery tile: major cell plus minor cell, e.g.
/// `31UDE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCode {
    pub major: MajorCellCode,
    pub minor: MinorCellCode,
}

impl TileCode {
    pub fn new(major: MajorCellCode, minor: MinorCellCode) -> Self {
        Self { major, minor }
    }
}

impl FromStr for TileCode {
    type Err = GridCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 5 || !s.is_ascii() {
            return Err(GridCodeError::InvalidTileCode(s.to_string()));
        }
        let major = s[..3]
            .parse()
            .map_err(|_| GridCodeError::InvalidTileCode(s.to_string()))?;
        let minor = s[3..]
            .parse()
            .map_err(|_| GridCodeError::InvalidTileCode(s.to_string()))?;
        Ok(Self { major, minor })
    }
}

impl fmt::Display for TileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.major, self.minor)
    }
}
