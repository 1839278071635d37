//! The environment trait consumed by the search, and end results.

use crate::board::Board;
use crate::core::{Player, Result};

/// Value reported for an end where no stone finished in the house.
///
/// Slightly positive so a blank end reads as better than giving up a point.
pub const DRAW_VALUE: f64 = 1e-5;

/// Result of a completed end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// A team scored `points` stones.
    Scored { player: Player, points: usize },
    /// No stone in the house.
    Blank,
}

impl GameResult {
    /// Check if a player won the end.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Scored { player: p, .. } if *p == player)
    }

    /// Value of the result from `player`'s point of view: the points scored,
    /// negated for the other team, or [`DRAW_VALUE`] for a blank end.
    #[must_use]
    pub fn value_for(&self, player: Player) -> f64 {
        match *self {
            GameResult::Scored { player: p, points } if p == player => points as f64,
            GameResult::Scored { points, .. } => -(points as f64),
            GameResult::Blank => DRAW_VALUE,
        }
    }
}

/// A two-player, alternating-turn environment over [`Board`]s.
///
/// ## Implementation Notes
///
/// - `apply_move` and `legal_moves` run the physics and must be
///   deterministic; they take `&mut self` for the simulation world and cache.
/// - Precondition failures (end already over, wrong player) are returned as
///   errors, never silently corrected.
/// - `game_ended` returns `0.0` while the end continues.
pub trait GameEnvironment {
    /// Board at the start of an end.
    fn init_board(&self) -> Board {
        Board::new()
    }

    /// Board shape as (rows, columns).
    fn board_shape(&self) -> (usize, usize) {
        Board::shape()
    }

    /// Number of discrete actions.
    fn action_size(&self) -> usize;

    /// Throw `player`'s next stone with `action`. Returns the settled board
    /// and the player to move next.
    fn apply_move(&mut self, board: &Board, player: Player, action: usize) -> Result<(Board, Player)>;

    /// Legality mask over all actions for `player`.
    fn legal_moves(&mut self, board: &Board, player: Player) -> Result<Vec<bool>>;

    /// Result of the end, `None` while stones remain to be thrown.
    fn game_result(&self, board: &Board) -> Option<GameResult>;

    /// Board as seen by `player`. Applying it twice restores the board.
    fn canonical_form(&self, board: &Board, player: Player) -> Board {
        board.canonical(player)
    }

    /// Equivalent boards for training, each paired with a policy.
    fn symmetries(&self, board: &Board, policy: &[f64]) -> Vec<(Board, Vec<f64>)>;

    /// Canonical string form.
    fn serialize(&self, board: &Board) -> String {
        board.to_text()
    }

    /// Parse the canonical string form.
    fn deserialize(&self, text: &str) -> Result<Board> {
        Ok(Board::from_text(text)?)
    }

    /// Human readable text.
    fn render(&self, board: &Board) -> String {
        board.render()
    }

    // === Convenience Methods ===

    /// End value from `player`'s point of view: `0.0` while the end
    /// continues, otherwise [`GameResult::value_for`].
    fn game_ended(&self, board: &Board, player: Player) -> f64 {
        self.game_result(board)
            .map_or(0.0, |result| result.value_for(player))
    }

    /// Ids of the legal actions.
    fn legal_actions(&mut self, board: &Board, player: Player) -> Result<Vec<usize>> {
        let mask = self.legal_moves(board, player)?;
        Ok(mask
            .iter()
            .enumerate()
            .filter_map(|(action, &legal)| legal.then_some(action))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Scored {
            player: Player::Two,
            points: 2,
        };
        assert!(!result.is_winner(Player::One));
        assert!(result.is_winner(Player::Two));
        assert!(!GameResult::Blank.is_winner(Player::One));
    }

    #[test]
    fn test_value_for() {
        let result = GameResult::Scored {
            player: Player::Two,
            points: 2,
        };
        assert_eq!(result.value_for(Player::Two), 2.0);
        assert_eq!(result.value_for(Player::One), -2.0);
        assert_eq!(GameResult::Blank.value_for(Player::One), DRAW_VALUE);
        assert_eq!(GameResult::Blank.value_for(Player::Two), DRAW_VALUE);
    }
}
