//! The curling end as a [`GameEnvironment`].

use tracing::{debug, error, warn};

use crate::board::Board;
use crate::core::units::STONES_PER_END;
use crate::core::{ActionSpace, CurlingError, Player, Result, RulesError};
use crate::physics::World;

use super::cache::{CacheStats, TransitionCache};
use super::config::EngineConfig;
use super::engine::{GameEnvironment, GameResult};
use super::symmetry;

/// One end of curling: physics world, action space and transition cache.
///
/// Moves are always simulated from player one's point of view on the
/// canonical board, so the cache is shared by both teams. Input boards are
/// first snapped to the engine grid, so a shot that moves nothing leaves
/// the board exactly as it was.
#[derive(Clone, Debug)]
pub struct CurlingGame {
    config: EngineConfig,
    actions: ActionSpace,
    world: World,
    cache: TransitionCache,
}

impl Default for CurlingGame {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn fatal<E: Into<CurlingError>>(err: E) -> CurlingError {
    let err = err.into();
    error!(%err, "fatal engine error");
    err
}

impl CurlingGame {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            actions: ActionSpace::new(config.actions.clone()),
            world: World::new(config.physics.clone(), config.grid),
            cache: TransitionCache::new(config.cache.clone()),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn action_space(&self) -> &ActionSpace {
        &self.actions
    }

    #[must_use]
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    /// Drop all memoized results.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Settled board after player one throws `action` on a canonical board.
    fn simulate(&mut self, canonical: &Board, action: usize) -> Result<Board> {
        let key = canonical.key();
        if let Some(next) = self.cache.get_move(&key, action) {
            return Ok(next);
        }

        let shot = self.actions.decode(action).map_err(fatal)?;
        let (next, outcome) = self
            .world
            .simulate(canonical, Player::One, &shot, &self.actions)
            .map_err(fatal)?;
        debug!(action = %self.actions.describe(action), ?outcome, "shot simulated");

        self.cache.put_move(key, action, next.clone());
        Ok(next)
    }

    /// Reject a finished end and a player whose turn it is not.
    fn check_turn(board: &Board, player: Player, request: &'static str) -> Result<()> {
        let Some(expected) = board.next_player() else {
            return Err(fatal(RulesError::GameOver(request)));
        };
        if expected != player {
            return Err(fatal(RulesError::TurnMismatch {
                requested: player,
                expected,
            }));
        }
        Ok(())
    }
}

impl GameEnvironment for CurlingGame {
    fn action_size(&self) -> usize {
        self.actions.len()
    }

    fn apply_move(&mut self, board: &Board, player: Player, action: usize) -> Result<(Board, Player)> {
        Self::check_turn(board, player, "apply_move")?;
        let before = board.thrown_count();

        let canonical = board.canonical(player).snapped(&self.config.grid);
        let next = self.simulate(&canonical, action)?.canonical(player);

        let after = next.thrown_count();
        if after != before + 1 {
            return Err(fatal(RulesError::StoneCount {
                expected: before + 1,
                actual: after,
            }));
        }

        let next_player = player.opponent();
        if after < STONES_PER_END {
            if let Some(expected) = next.next_player().filter(|&p| p != next_player) {
                return Err(fatal(RulesError::TurnMismatch {
                    requested: next_player,
                    expected,
                }));
            }
        }

        debug!(%player, action, thrown = after, in_play = next.in_play_count(), "move applied");
        Ok((next, next_player))
    }

    fn legal_moves(&mut self, board: &Board, player: Player) -> Result<Vec<bool>> {
        Self::check_turn(board, player, "legal_moves")?;

        let canonical = board.canonical(player).snapped(&self.config.grid);
        let key = canonical.key();
        if let Some(mask) = self.cache.get_legal(&key) {
            return Ok(mask);
        }

        let mut mask = Vec::with_capacity(self.actions.len());
        for action in 0..self.actions.len() {
            let next = self.simulate(&canonical, action)?;
            mask.push(!next.same_positions(&canonical));
        }

        if !mask.iter().any(|&legal| legal) {
            warn!(board = %canonical.to_text(), "no shot changes the board, allowing all");
            mask.fill(true);
        }

        self.cache.put_legal(key, mask.clone());
        Ok(mask)
    }

    fn game_result(&self, board: &Board) -> Option<GameResult> {
        if !board.is_complete() {
            return None;
        }

        let result = match board.shot_rocks() {
            Some((player, points)) => GameResult::Scored { player, points },
            None => GameResult::Blank,
        };
        debug!(?result, "end scored");
        Some(result)
    }

    fn symmetries(&self, board: &Board, policy: &[f64]) -> Vec<(Board, Vec<f64>)> {
        symmetry::symmetries(board, policy)
    }
}
