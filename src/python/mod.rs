//! Python bindings for the curling engine.
//!
//! # Quick Start
//!
//! ```python
//! import rust_curling as curling
//!
//! game = curling.CurlingGame()
//! board = game.init_board()          # numpy array, shape (6, 16)
//! valid = game.legal_moves(board, 1)
//! board, player = game.apply_move(board, 1, valid.index(True))
//! print(game.render(board))
//! ```

use pyo3::prelude::*;

mod py_game;

pub use py_game::*;

/// rust_curling: a curling end simulator for AlphaZero-style training.
#[pymodule]
fn rust_curling(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCurlingGame>()?;
    m.add("DRAW_VALUE", crate::rules::DRAW_VALUE)?;
    Ok(())
}
