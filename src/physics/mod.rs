//! Rigid-body simulation of stones on the sheet.
//!
//! Units are inches, seconds and radians. The world is deterministic: the
//! same board and shot always produce the same settled board.

pub mod collision;
pub mod config;
pub mod dynamics;
pub mod stone;
pub mod world;

pub use collision::{decide_removal, out_of_bounds, violates_five_rock_rule, Boundary, Removal, RuleContext, FIVE_ROCK_LIMIT};
pub use config::PhysicsConfig;
pub use stone::Stone;
pub use world::{ShotOutcome, World};
