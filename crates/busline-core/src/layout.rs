//! # Seat Layout
//!
//! The fixed seat-grid layout function.
//!
//! Seats are provisioned once, when a bus is added to the catalog: one row
//! per physical seat, contiguous numbering starting at 1. Grid positions are
//! derived here so the provisioning code and the seat-map renderer can never
//! disagree.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  4-across coach layout (SEATS_PER_ROW = 4)                              │
//! │                                                                         │
//! │        col 0   col 1       col 2   col 3                                │
//! │  row 0 [ 1 ]   [ 2 ]  ───  [ 3 ]   [ 4 ]                                │
//! │  row 1 [ 5 ]   [ 6 ]  ───  [ 7 ]   [ 8 ]                                │
//! │  row 2 [ 9 ]   [10 ]  ───  [11 ]   [12 ]                                │
//! │   ...                                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::SEATS_PER_ROW;

/// Grid position of a seat, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatPosition {
    pub row_no: i64,
    pub col_no: i64,
}

/// Computes the grid position for a 1-based seat number.
///
/// ## Example
/// ```rust
/// use busline_core::layout::seat_position;
///
/// assert_eq!(seat_position(1).row_no, 0);
/// assert_eq!(seat_position(1).col_no, 0);
/// assert_eq!(seat_position(7).row_no, 1);
/// assert_eq!(seat_position(7).col_no, 2);
/// ```
#[inline]
pub const fn seat_position(seat_no: i64) -> SeatPosition {
    SeatPosition {
        row_no: (seat_no - 1) / SEATS_PER_ROW,
        col_no: (seat_no - 1) % SEATS_PER_ROW,
    }
}

/// Iterates the seat numbers for a coach with `seat_count` seats.
///
/// Contiguous, 1-based. Provisioning walks this once per new bus.
pub fn seat_numbers(seat_count: i64) -> impl Iterator<Item = i64> {
    1..=seat_count
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row() {
        for (seat_no, col) in [(1, 0), (2, 1), (3, 2), (4, 3)] {
            let pos = seat_position(seat_no);
            assert_eq!(pos.row_no, 0);
            assert_eq!(pos.col_no, col);
        }
    }

    #[test]
    fn test_row_wraps_every_four_seats() {
        assert_eq!(seat_position(5), SeatPosition { row_no: 1, col_no: 0 });
        assert_eq!(seat_position(8), SeatPosition { row_no: 1, col_no: 3 });
        assert_eq!(seat_position(40), SeatPosition { row_no: 9, col_no: 3 });
    }

    #[test]
    fn test_seat_numbers_are_contiguous_from_one() {
        let nums: Vec<i64> = seat_numbers(40).collect();
        assert_eq!(nums.len(), 40);
        assert_eq!(nums.first(), Some(&1));
        assert_eq!(nums.last(), Some(&40));
    }
}
