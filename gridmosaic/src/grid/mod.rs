//! Grid addressing for the military-grid tiling scheme.
//!
//! The grid is two-layered: major cells (zone number 1-60 east-west, row
//! band letter north-south) subdivide into minor cells (column and row
//! letters). All letter axes use the 24-letter alphabet that skips I and O;
//! zone numbers wrap around the globe mod 60.

mod code;
mod step;

pub use code::{Direction, GridCodeError, MajorCellCode, MinorCellCode, TileCode};
pub use step::{
    decrement_letter, decrement_zone, increment_letter, increment_zone, is_grid_letter,
    is_grid_zone,
};
