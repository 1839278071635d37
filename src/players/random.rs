use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::core::{Player, Result};
use crate::rules::GameEnvironment;

use super::Agent;

/// Picks a uniformly random legal action. Same seed, same shots.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<G: GameEnvironment> Agent<G> for RandomPlayer {
    fn choose_action(&mut self, game: &mut G, canonical: &Board) -> Result<usize> {
        let legal = game.legal_actions(canonical, Player::One)?;
        // legal_moves never returns an all-false mask.
        Ok(legal.choose(&mut self.rng).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionSpaceConfig;
    use crate::players::play_game;
    use crate::rules::{CurlingGame, EngineConfig};

    fn small_game() -> CurlingGame {
        let actions = ActionSpaceConfig::default()
            .keep_weights(&["3", "7", "control"])
            .with_brooms(-1, 1);
        CurlingGame::new(EngineConfig::default().with_actions(actions))
    }

    #[test]
    fn test_choice_is_legal() {
        let mut game = small_game();
        let mut player = RandomPlayer::new(7);
        let board = Board::new();

        let legal = game.legal_moves(&board, Player::One).unwrap();
        for _ in 0..5 {
            let action = player.choose_action(&mut game, &board).unwrap();
            assert!(legal[action]);
        }
    }

    #[test]
    fn test_same_seed_same_end() {
        let mut game = small_game();
        let a = play_game(&mut game, &mut RandomPlayer::new(1), &mut RandomPlayer::new(2)).unwrap();
        let b = play_game(&mut game, &mut RandomPlayer::new(1), &mut RandomPlayer::new(2)).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.moves.len(), 16);
        assert_eq!(a.board.thrown_count(), 16);
        assert_eq!(a.moves[0].0, Player::One);
        assert_eq!(a.moves[1].0, Player::Two);
    }
}
