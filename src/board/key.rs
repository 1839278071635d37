//! Structural hash key for boards.

use super::state::{Board, COLS, IN_PLAY, THROWN, X, Y};

/// Exact identity of a board's non-derived rows.
///
/// Positions are compared bit for bit. Boards hold grid-snapped positions
/// with negative zero normalized away, so equal boards give equal keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardKey {
    positions: [u64; 2 * COLS],
    thrown: u16,
    in_play: u16,
}

fn bits(flags: &[f64; COLS]) -> u16 {
    flags
        .iter()
        .enumerate()
        .filter(|(_, v)| **v != 0.0)
        .fold(0, |acc, (i, _)| acc | (1 << i))
}

impl BoardKey {
    #[must_use]
    pub fn new(board: &Board) -> Self {
        let mut positions = [0u64; 2 * COLS];
        for column in 0..COLS {
            positions[column] = board.row(X)[column].to_bits();
            positions[COLS + column] = board.row(Y)[column].to_bits();
        }

        Self {
            positions,
            thrown: bits(board.row(THROWN)),
            in_play: bits(board.row(IN_PLAY)),
        }
    }

    /// Number of thrown stones still in play.
    #[must_use]
    pub fn in_play_count(&self) -> usize {
        (self.thrown & self.in_play).count_ones() as usize
    }
}
