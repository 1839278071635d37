//! Simple agents and a driver that plays a full end between two of them.
//!
//! Agents see the canonical board, so they always choose as player one.

mod random;

pub use random::RandomPlayer;

use tracing::debug;

use crate::board::Board;
use crate::core::{Player, Result};
use crate::rules::{GameEnvironment, GameResult};

/// Something that picks shots.
pub trait Agent<G: GameEnvironment> {
    /// Choose an action for player one on a canonical board.
    fn choose_action(&mut self, game: &mut G, canonical: &Board) -> Result<usize>;
}

/// A finished end.
#[derive(Clone, Debug, PartialEq)]
pub struct EndRecord {
    /// Board after the last stone.
    pub board: Board,
    pub result: GameResult,
    /// Actions in throwing order, with the player who threw each.
    pub moves: Vec<(Player, usize)>,
}

/// Play one end from the initial board. `first` throws for player one.
pub fn play_game<G, A, B>(game: &mut G, first: &mut A, second: &mut B) -> Result<EndRecord>
where
    G: GameEnvironment,
    A: Agent<G>,
    B: Agent<G>,
{
    let mut board = game.init_board();
    let mut player = Player::One;
    let mut moves = Vec::new();

    loop {
        if let Some(result) = game.game_result(&board) {
            debug!(?result, moves = moves.len(), "end finished");
            return Ok(EndRecord {
                board,
                result,
                moves,
            });
        }

        let canonical = game.canonical_form(&board, player);
        let action = match player {
            Player::One => first.choose_action(game, &canonical)?,
            Player::Two => second.choose_action(game, &canonical)?,
        };

        moves.push((player, action));
        let (next, next_player) = game.apply_move(&board, player, action)?;
        board = next;
        player = next_player;
    }
}
