//! # rust-curling
//!
//! A deterministic simulator for one end of curling, built as the game
//! environment of an AlphaZero-style search.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the same board and action always produce the same
//!    settled board, so results can be memoized and replayed.
//!
//! 2. **Board In, Board Out**: the search only ever sees the 6×16 board.
//!    The physics world is rebuilt from the board for every shot.
//!
//! 3. **Configuration Over Constants**: physics calibration, grid
//!    resolution, the action space and the cache are plain config structs.
//!
//! ## Modules
//!
//! - `core`: Units and sheet geometry, the board grid, players, actions, errors
//! - `physics`: Stones, friction and curl, impacts, the five-rock rule, the world
//! - `board`: Board model, structural key, text form and rendering
//! - `rules`: `GameEnvironment` trait and the `CurlingGame` implementation
//! - `players`: Random agent and an end driver
//!
//! ## Example
//!
//! ```
//! use rust_curling::{CurlingGame, GameEnvironment, Player};
//!
//! let mut game = CurlingGame::default();
//! let board = game.init_board();
//! let (board, next) = game.apply_move(&board, Player::One, 0).unwrap();
//! assert_eq!(next, Player::Two);
//! assert_eq!(board.thrown_count(), 1);
//! ```

pub mod board;
pub mod core;
pub mod physics;
pub mod players;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    ActionError, ActionSpace, ActionSpaceConfig, BoardParseError, Cell, CurlingError, GridTransform,
    Handle, Player, Result, RulesError, Shot, SimulationError, WeightClass,
};

pub use crate::board::{Board, BoardKey};

pub use crate::physics::{PhysicsConfig, ShotOutcome, Stone, World};

pub use crate::rules::{
    CacheConfig, CacheStats, CurlingGame, EngineConfig, GameEnvironment, GameResult, TransitionCache,
    DRAW_VALUE,
};

pub use crate::players::{play_game, Agent, EndRecord, RandomPlayer};
