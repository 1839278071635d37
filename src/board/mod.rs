//! Board model: the 6×16 snapshot of an end between shots, its structural
//! hash key, canonical text form and rendering.

pub mod codec;
pub mod key;
pub mod render;
pub mod state;

pub use key::BoardKey;
pub use state::{Board, COLS, DISTANCE, IN_PLAY, ROWS, SCORING, THROWN, X, Y};
