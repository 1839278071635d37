//! Error types.
//!
//! Every error here is fatal for the move in flight: it signals a caller or
//! engine bug (desync) or a physics parameter problem. Five-rock violations
//! are ordinary outcomes and never show up as errors.

use thiserror::Error;

use super::action::Shot;
use super::player::Player;

/// Invalid action ids or shots.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("action {action} out of range for action space of size {size}")]
    OutOfRange { action: usize, size: usize },

    #[error("shot {0:?} is not part of the action space")]
    UnknownShot(Shot),
}

/// Failures of the physics world.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimulationError {
    /// A shot was expected to be in flight but no stone is marked shooter.
    #[error("no shooter stone in the world")]
    ShooterNotFound,

    /// Stones did not come to rest before the time ceiling.
    #[error("simulation did not settle within {limit} simulated seconds")]
    Timeout { limit: f64 },

    /// The team asked to throw has no stone left.
    #[error("{0} has no unthrown stone left")]
    NoStoneAvailable(Player),

    /// A rollback was requested with no pre-shot board recorded.
    #[error("no pre-shot snapshot to roll back to")]
    MissingSnapshot,

    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Rule violations by the caller or inconsistent engine state.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RulesError {
    #[error("{0} requested after the end was over")]
    GameOver(&'static str),

    #[error("moves requested for {requested} but it is {expected}'s turn")]
    TurnMismatch { requested: Player, expected: Player },

    #[error("expected {expected} thrown stones after the move, found {actual}")]
    StoneCount { expected: usize, actual: usize },

    #[error("player sign must be +1 or -1, got {0}")]
    InvalidPlayer(i8),
}

/// Malformed serialized boards.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("expected `1:<stones>:2:<stones>:d:<thrown>/<in_play>`, got {0:?}")]
    Layout(String),

    #[error("bad stone entry {0:?}")]
    Stone(String),

    #[error("stone id {0} out of range 0-7")]
    StoneId(usize),

    #[error("stone entry {0:?} is not on a board grid cell")]
    OffGrid(String),

    #[error("bad flag vector {0:?}")]
    Flags(String),

    #[error("stone {column} position does not match its flags thrown={thrown} in_play={in_play}")]
    Inconsistent {
        column: usize,
        thrown: bool,
        in_play: bool,
    },
}

/// Any error surfaced by the engine.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CurlingError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Parse(#[from] BoardParseError),

    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, CurlingError>;
