//! Letter and zone stepping primitives.
//!
//! The grid labels minor-cell columns/rows and major-cell row bands with the
//! 24-letter alphabet (A-Z excluding I and O) and major-cell columns with
//! zone numbers 1-60. Stepping wraps at both ends: Z steps to A, zone 60
//! steps to zone 1. Landing on a skipped letter steps once more.

/// Returns true if `letter` belongs to the 24-letter grid alphabet.
///
/// I and O are excluded from grid labelling to avoid confusion with 1 and 0.
#[inline]
pub fn is_grid_letter(letter: char) -> bool {
    letter.is_ascii_uppercase() && letter != 'I' && letter != 'O'
}

/// Returns true if `zone` is a valid major-cell column number (1-60).
#[inline]
pub fn is_grid_zone(zone: u8) -> bool {
    (1..=60).contains(&zone)
}

/// Increment a grid letter, wrapping Z to A and skipping I and O.
///
/// Total over the grid alphabet: any valid input yields a valid output.
pub fn increment_letter(letter: char) -> char {
    debug_assert!(is_grid_letter(letter), "not a grid letter: {letter}");
    let mut next = wrap_forward(letter);
    if next == 'I' || next == 'O' {
        next = wrap_forward(next);
        // I and O are not adjacent, so a single extra step cannot land
        // on the other skipped letter.
        debug_assert!(next != 'I' && next != 'O');
    }
    next
}

/// Decrement a grid letter, wrapping A to Z and skipping I and O.
///
/// Total over the grid alphabet: any valid input yields a valid output.
pub fn decrement_letter(letter: char) -> char {
    debug_assert!(is_grid_letter(letter), "not a grid letter: {letter}");
    let mut prev = wrap_backward(letter);
    if prev == 'I' || prev == 'O' {
        prev = wrap_backward(prev);
        debug_assert!(prev != 'I' && prev != 'O');
    }
    prev
}

/// Increment a zone number, wrapping 60 to 1.
///
/// Zone numbers format as zero-padded two-digit strings ("01"-"60"); see
/// [`MajorCellCode`](super::MajorCellCode)'s `Display` implementation.
#[inline]
pub fn increment_zone(zone: u8) -> u8 {
    debug_assert!(is_grid_zone(zone), "not a grid zone: {zone}");
    if zone == 60 {
        1
    } else {
        zone + 1
    }
}

/// Decrement a zone number, wrapping 1 to 60.
#[inline]
pub fn decrement_zone(zone: u8) -> u8 {
    debug_assert!(is_grid_zone(zone), "not a grid zone: {zone}");
    if zone == 1 {
        60
    } else {
        zone - 1
    }
}

fn wrap_forward(letter: char) -> char {
    if letter == 'Z' {
        'A'
    } else {
        (letter as u8 + 1) as char
    }
}

fn wrap_backward(letter: char) -> char {
    if letter == 'A' {
        'Z'
    } else {
        (letter as u8 - 1) as char
    }
}
