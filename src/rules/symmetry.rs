//! Training-time board symmetries.
//!
//! Stones of one team are interchangeable once thrown, and the sheet is
//! symmetric left to right. Shots are not remapped under the mirror, so
//! every variant keeps the original policy vector.

use crate::board::Board;
use crate::core::Player;

/// Boards equivalent to `board` for training, each paired with `policy`.
///
/// The first entry is the board itself. Then, for each team, one variant
/// per pair of its live stones with the two exchanged. Finally a mirrored
/// copy of every variant listed so far.
#[must_use]
pub fn symmetries(board: &Board, policy: &[f64]) -> Vec<(Board, Vec<f64>)> {
    let mut boards = vec![board.clone()];

    for player in Player::ALL {
        let live: Vec<usize> = player.columns().filter(|&c| board.is_live(c)).collect();
        for (i, &a) in live.iter().enumerate() {
            for &b in &live[i + 1..] {
                boards.push(board.with_swapped_stones(a, b));
            }
        }
    }

    let mirrored: Vec<Board> = boards.iter().map(Board::mirrored).collect();
    boards.extend(mirrored);

    boards.into_iter().map(|b| (b, policy.to_vec())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::BUTTON;
    use glam::DVec2;

    #[test]
    fn test_empty_board_original_and_mirror() {
        let variants = symmetries(&Board::new(), &[0.5, 0.5]);
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].0, Board::new());
        assert_eq!(variants[1].0, Board::new());
        assert!(variants.iter().all(|(_, p)| p == &[0.5, 0.5]));
    }

    #[test]
    fn test_pairwise_swaps_per_team() {
        let mut board = Board::new();
        for id in 0..3 {
            board.set_stone(Player::One, id, BUTTON + DVec2::new(10.0 * id as f64, 0.0), true, true);
        }
        board.set_stone(Player::Two, 0, BUTTON + DVec2::new(-30.0, 0.0), true, true);
        board.set_stone(Player::Two, 1, BUTTON + DVec2::new(-40.0, 0.0), true, true);
        board.set_stone(Player::Two, 2, DVec2::ZERO, true, false);

        let variants = symmetries(&board, &[1.0]);
        // (1 + 3 + 1) * 2
        assert_eq!(variants.len(), 10);

        let swapped = &variants[1].0;
        assert_eq!(swapped.position(0), board.position(1));
        assert_eq!(swapped.position(1), board.position(0));

        let mirror = &variants[5].0;
        assert_eq!(mirror.position(2).x, -board.position(2).x);
        assert_eq!(mirror.row(crate::board::SCORING), board.row(crate::board::SCORING));
    }
}
