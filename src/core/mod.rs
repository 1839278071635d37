//! Core types shared by the physics world, the board and the rules:
//! units and sheet geometry, the board grid, players, shots and errors.

pub mod action;
pub mod error;
pub mod grid;
pub mod player;
pub mod units;

pub use action::{velocity_for, ActionSpace, ActionSpaceConfig, Handle, Shot, WeightClass};
pub use error::{ActionError, BoardParseError, CurlingError, Result, RulesError, SimulationError};
pub use grid::{round_half_up, Cell, GridTransform, InvalidResolution};
pub use player::Player;
