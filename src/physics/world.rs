//! The physics world: stone bodies plus the per-end bookkeeping that the
//! board needs (which stones were thrown, which are still in play).
//!
//! A shot is resolved in three calls:
//!
//! 1. [`World::setup_board`] loads a board at rest and keeps it for rollback.
//! 2. [`World::setup_shot`] releases the next stone.
//! 3. [`World::run`] steps until every stone is at rest, removing stones
//!    that leave the sheet, or rolls the shot back on a five-rock violation.
//!
//! [`World::board`] reads the settled state back as a [`Board`].

use glam::DVec2;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::board::Board;
use crate::core::units::{STONES_PER_END, STONES_PER_TEAM};
use crate::core::{ActionSpace, GridTransform, Player, Shot, SimulationError};

use super::collision::{decide_removal, out_of_bounds, resolve_contacts, Removal, RuleContext};
use super::config::PhysicsConfig;
use super::dynamics::{decay_spin, integrate_position, integrate_velocity};
use super::stone::Stone;

/// How a shot ended.
#[derive(Clone, Debug, PartialEq)]
pub enum ShotOutcome {
    /// All stones came to rest.
    Settled {
        /// Simulated seconds until rest.
        elapsed: f64,
        /// Stone-stone impacts resolved.
        impacts: usize,
        /// Columns of stones taken out of play during the shot.
        removed: Vec<usize>,
    },
    /// The shot would have removed a protected guard. The board was restored
    /// and the shooter counted as thrown out of play.
    FiveRockViolation {
        /// Column of the guard that would have been removed.
        guard: usize,
    },
}

impl ShotOutcome {
    #[must_use]
    pub fn is_violation(&self) -> bool {
        matches!(self, ShotOutcome::FiveRockViolation { .. })
    }
}

/// Physics world for one end.
#[derive(Clone, Debug)]
pub struct World {
    config: PhysicsConfig,
    grid: GridTransform,
    stones: SmallVec<[Stone; STONES_PER_END]>,
    thrown: [bool; STONES_PER_END],
    in_play: [bool; STONES_PER_END],
    five_rock_violation: bool,
    snapshot: Option<Board>,
}

impl Default for World {
    fn default() -> Self {
        Self::new(PhysicsConfig::default(), GridTransform::default())
    }
}

impl World {
    pub fn new(config: PhysicsConfig, grid: GridTransform) -> Self {
        Self {
            config,
            grid,
            stones: SmallVec::new(),
            thrown: [false; STONES_PER_END],
            in_play: [true; STONES_PER_END],
            five_rock_violation: false,
            snapshot: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &GridTransform {
        &self.grid
    }

    /// Stone bodies currently on the sheet.
    #[must_use]
    pub fn stones(&self) -> &[Stone] {
        &self.stones
    }

    /// The last shot was rolled back by the five-rock rule.
    #[must_use]
    pub fn five_rock_violation(&self) -> bool {
        self.five_rock_violation
    }

    /// Stones thrown so far, including one in flight.
    #[must_use]
    pub fn thrown_count(&self) -> usize {
        self.thrown.iter().filter(|&&t| t).count()
    }

    /// First unthrown stone of a team.
    pub fn next_stone_id(&self, team: Player) -> Result<usize, SimulationError> {
        (0..STONES_PER_TEAM)
            .find(|&id| !self.thrown[team.column_offset() + id])
            .ok_or(SimulationError::NoStoneAvailable(team))
    }

    /// Replace the world contents with a board at rest.
    ///
    /// Guard status is fixed here from each stone's resting position and
    /// does not change while a shot is resolved. The board is kept as given
    /// for a five-rock rollback.
    pub fn setup_board(&mut self, board: &Board) {
        self.stones.clear();
        self.thrown = board.thrown_flags();
        self.in_play = board.in_play_flags();
        self.five_rock_violation = false;
        self.snapshot = Some(board.clone());

        for column in board.live_columns() {
            let team = Player::of_column(column);
            let stone = Stone::at_rest(team, column - team.column_offset(), board.position(column));
            self.stones.push(stone);
        }
    }

    /// Read the world back as a board. Stones that settled during a shot
    /// were already moved to their grid cells.
    #[must_use]
    pub fn board(&self) -> Board {
        let mut board = Board::new();
        board.put_flags(&self.thrown, &self.in_play);

        for stone in &self.stones {
            let column = stone.column();
            board.put_stone(column, stone.position, self.thrown[column], self.in_play[column]);
        }

        board.update_distance_and_score();
        board
    }

    /// Release `player`'s next stone with the given shot. Returns its column.
    pub fn setup_shot(
        &mut self,
        player: Player,
        shot: &Shot,
        actions: &ActionSpace,
    ) -> Result<usize, SimulationError> {
        let id = self.next_stone_id(player)?;
        if self.snapshot.is_none() {
            self.snapshot = Some(self.board());
        }
        self.five_rock_violation = false;

        let velocity = actions.velocity(shot, self.config.friction);
        let stone = Stone::delivered(player, id, velocity, shot.handle.spin());
        let column = stone.column();
        trace!(%stone, vx = velocity.x, vy = velocity.y, "stone released");

        self.stones.push(stone);
        self.thrown[column] = true;
        self.in_play[column] = true;
        Ok(column)
    }

    /// Step the world until every stone is at rest.
    pub fn run(&mut self) -> Result<ShotOutcome, SimulationError> {
        let shooter = self
            .stones
            .iter()
            .find(|s| s.is_shooter)
            .map(Stone::column)
            .ok_or(SimulationError::ShooterNotFound)?;

        let context = RuleContext {
            thrown: self.thrown_count(),
            shooter: Player::of_column(shooter),
        };

        let dt = self.config.dt;
        let mut steps: u64 = 0;
        let mut impacts = 0;
        let mut removed = Vec::new();

        loop {
            for stone in self.stones.iter_mut() {
                integrate_velocity(stone, &self.config);
            }
            for stone in self.stones.iter_mut() {
                decay_spin(stone, &self.config);
                integrate_position(stone, dt);
            }

            impacts += resolve_contacts(&mut self.stones, self.config.restitution);

            let mut index = 0;
            while index < self.stones.len() {
                let Some(boundary) = out_of_bounds(&self.stones[index]) else {
                    index += 1;
                    continue;
                };

                match decide_removal(&self.stones[index], &context) {
                    Removal::Remove => {
                        let stone = self.stones.remove(index);
                        debug!(%stone, ?boundary, "stone out of play");
                        self.in_play[stone.column()] = false;
                        removed.push(stone.column());
                    }
                    Removal::VetoWithRollback => {
                        let guard = self.stones[index].column();
                        debug!(guard = %self.stones[index], "five-rock violation, rolling back");
                        self.rollback(shooter)?;
                        return Ok(ShotOutcome::FiveRockViolation { guard });
                    }
                }
            }

            steps += 1;
            let elapsed = steps as f64 * dt;
            if elapsed > self.config.time_limit {
                warn!(elapsed, "shot did not settle");
                return Err(SimulationError::Timeout {
                    limit: self.config.time_limit,
                });
            }

            if self.stones.iter().all(|s| !s.is_moving(self.config.rest_speed)) {
                removed.extend(self.remove_off_grid());
                self.settle();
                trace!(elapsed, impacts, "stones at rest");
                return Ok(ShotOutcome::Settled {
                    elapsed,
                    impacts,
                    removed,
                });
            }
        }
    }

    /// Resolve one shot from a board at rest and read the result back.
    pub fn simulate(
        &mut self,
        board: &Board,
        player: Player,
        shot: &Shot,
        actions: &ActionSpace,
    ) -> Result<(Board, ShotOutcome), SimulationError> {
        self.setup_board(board);
        self.setup_shot(player, shot, actions)?;
        let outcome = self.run()?;
        Ok((self.board(), outcome))
    }

    /// Restore the pre-shot board exactly and count the shooter as thrown
    /// but out of play.
    fn rollback(&mut self, shooter: usize) -> Result<(), SimulationError> {
        let snapshot = self.snapshot.take().ok_or(SimulationError::MissingSnapshot)?;
        self.setup_board(&snapshot);
        self.snapshot = None;
        self.thrown[shooter] = true;
        self.in_play[shooter] = false;
        self.five_rock_violation = true;
        Ok(())
    }

    /// Take stones that came to rest off the grid (short of the hog line,
    /// mostly) out of play.
    fn remove_off_grid(&mut self) -> Vec<usize> {
        let mut removed = Vec::new();
        let grid = self.grid;
        let in_play = &mut self.in_play;
        self.stones.retain(|stone| {
            if grid.to_cell(stone.position).is_some() {
                return true;
            }
            debug!(%stone, "stone at rest off the grid");
            in_play[stone.column()] = false;
            removed.push(stone.column());
            false
        });
        removed
    }

    /// Stop every stone on its grid cell. Runs after off-grid stones were
    /// removed, so every position has a cell.
    fn settle(&mut self) {
        for stone in self.stones.iter_mut() {
            if let Some(position) = self.grid.snap(stone.position) {
                stone.position = position;
            }
            stone.velocity = DVec2::ZERO;
            stone.spin = 0.0;
            stone.is_shooter = false;
            stone.update_guard();
        }
        self.snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::{HOG_LINE, TEE_LINE};
    use crate::core::Handle;

    fn straight_world() -> World {
        World::new(PhysicsConfig::default().with_curl(0.0, 0.2, 1.5), GridTransform::default())
    }

    fn shot(actions: &ActionSpace, handle: Handle, weight: &str, broom: i32) -> Shot {
        let id = actions.find(handle, weight, broom).unwrap();
        actions.decode(id).unwrap()
    }

    fn board_with_guard() -> Board {
        let mut board = Board::new();
        board.set_stone(Player::One, 0, DVec2::new(0.0, 1400.0), true, true);
        board
    }

    #[test]
    fn test_setup_board_round_trip() {
        let mut board = board_with_guard();
        board.set_stone(Player::Two, 0, DVec2::new(12.5, TEE_LINE), true, true);
        board.set_stone(Player::Two, 1, DVec2::ZERO, true, false);

        let mut world = World::default();
        world.setup_board(&board);
        assert_eq!(world.stones().len(), 2);
        assert_eq!(world.thrown_count(), 3);
        assert_eq!(world.board(), board);
    }

    #[test]
    fn test_next_stone_id() {
        let mut world = World::default();
        world.setup_board(&board_with_guard());
        assert_eq!(world.next_stone_id(Player::One), Ok(1));
        assert_eq!(world.next_stone_id(Player::Two), Ok(0));

        world.setup_board(&Board::all_out_of_play());
        assert_eq!(
            world.next_stone_id(Player::Two),
            Err(SimulationError::NoStoneAvailable(Player::Two))
        );
    }

    #[test]
    fn test_run_without_shooter() {
        let mut world = World::default();
        world.setup_board(&board_with_guard());
        assert_eq!(world.run(), Err(SimulationError::ShooterNotFound));
    }

    #[test]
    fn test_straight_draw_stops_near_tee() {
        let actions = ActionSpace::default();
        let mut world = straight_world();
        let shot = shot(&actions, Handle::CounterClockwise, "7", 0);

        let (board, outcome) = world.simulate(&Board::new(), Player::One, &shot, &actions).unwrap();
        assert!(matches!(outcome, ShotOutcome::Settled { impacts: 0, .. }));
        assert!(board.is_live(0));
        assert_eq!(board.position(0).x, 0.0);
        assert!((board.position(0).y - TEE_LINE).abs() < 3.0);
    }

    #[test]
    fn test_counter_clockwise_curls_left() {
        let actions = ActionSpace::default();
        let mut world = World::default();
        let shot = shot(&actions, Handle::CounterClockwise, "7", 0);

        let (board, _) = world.simulate(&Board::new(), Player::One, &shot, &actions).unwrap();
        assert!(board.is_live(0));
        assert!(board.position(0).x < -10.0);
    }

    #[test]
    fn test_control_weight_leaves_play() {
        let actions = ActionSpace::default();
        let mut world = straight_world();
        let shot = shot(&actions, Handle::Clockwise, "control", 0);

        let (board, outcome) = world.simulate(&Board::new(), Player::One, &shot, &actions).unwrap();
        assert!(matches!(
            outcome,
            ShotOutcome::Settled { impacts: 0, ref removed, .. } if removed == &[0]
        ));
        assert!(board.is_thrown(0));
        assert!(!board.is_in_play(0));
        assert_eq!(board.in_play_count(), 0);
    }

    #[test]
    fn test_takeout_of_protected_guard_rolls_back() {
        let actions = ActionSpace::default();
        let mut world = straight_world();
        let before = board_with_guard();
        let shot = shot(&actions, Handle::Clockwise, "control", 0);

        let (after, outcome) = world.simulate(&before, Player::Two, &shot, &actions).unwrap();
        assert_eq!(outcome, ShotOutcome::FiveRockViolation { guard: 0 });
        assert!(world.five_rock_violation());

        let mut expected = before.clone();
        expected.set_stone(Player::Two, 0, DVec2::ZERO, true, false);
        assert_eq!(after, expected);
    }

    #[test]
    fn test_rollback_restores_loaded_board_exactly() {
        let actions = ActionSpace::default();
        let mut world = World::default();
        let mut before = Board::new();
        before.put_stone(0, DVec2::new(7.1, 1414.1), true, true);
        before.update_distance_and_score();
        let shot = shot(&actions, Handle::CounterClockwise, "control", 5);

        let (after, outcome) = world.simulate(&before, Player::Two, &shot, &actions).unwrap();
        assert!(outcome.is_violation());
        assert_eq!(after.position(0), DVec2::new(7.1, 1414.1));
        assert!(after.is_live(0));
        assert!(after.is_thrown(8) && !after.is_in_play(8));
    }

    #[test]
    fn test_settled_stones_sit_on_grid() {
        let actions = ActionSpace::default();
        let mut world = World::default();
        let shot = shot(&actions, Handle::CounterClockwise, "7", 3);

        world.simulate(&Board::new(), Player::One, &shot, &actions).unwrap();
        for stone in world.stones() {
            assert_eq!(world.grid().snap(stone.position), Some(stone.position));
        }
        assert_eq!(world.board().snapped(world.grid()), world.board());
    }

    #[test]
    fn test_takeout_after_five_stones() {
        let actions = ActionSpace::default();
        let mut world = straight_world();
        let mut before = board_with_guard();
        for id in 1..4 {
            before.set_stone(Player::One, id, DVec2::ZERO, true, false);
        }
        for id in 0..2 {
            before.set_stone(Player::Two, id, DVec2::ZERO, true, false);
        }
        let shot = shot(&actions, Handle::Clockwise, "control", 0);

        let (after, outcome) = world.simulate(&before, Player::Two, &shot, &actions).unwrap();
        assert!(!outcome.is_violation());
        assert!(!after.is_in_play(0));
        assert!(after.is_live(10));
        assert!(after.position(10).y > HOG_LINE);
    }

    #[test]
    fn test_timeout() {
        let actions = ActionSpace::default();
        let mut world = World::new(PhysicsConfig::default().with_time_limit(1.0), GridTransform::default());
        let shot = shot(&actions, Handle::Clockwise, "7", 0);

        let result = world.simulate(&Board::new(), Player::One, &shot, &actions);
        assert_eq!(result, Err(SimulationError::Timeout { limit: 1.0 }));
    }
}
