//! Rules of an end: turn order, legal moves, scoring, canonical form,
//! training symmetries and move memoization.
//!
//! The search talks to [`GameEnvironment`]; [`CurlingGame`] implements it on
//! top of the physics world.

pub mod cache;
pub mod config;
pub mod engine;
pub mod game;
pub mod symmetry;

pub use cache::{CacheStats, TransitionCache};
pub use config::{CacheConfig, EngineConfig};
pub use engine::{GameEnvironment, GameResult, DRAW_VALUE};
pub use game::CurlingGame;
pub use symmetry::symmetries;
