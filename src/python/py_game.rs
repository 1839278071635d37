//! `CurlingGame` bindings. Boards cross the boundary as `float64` numpy
//! arrays of shape (6, 16); players as `1` / `-1`.

use numpy::{PyArray2, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::board::{Board, COLS, ROWS};
use crate::core::{CurlingError, Player, RulesError};
use crate::rules::{CacheConfig, CurlingGame, EngineConfig, GameEnvironment};

fn to_py_err(err: CurlingError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn player_from(sign: i8) -> PyResult<Player> {
    Player::from_sign(sign).ok_or_else(|| to_py_err(RulesError::InvalidPlayer(sign).into()))
}

fn board_from(array: PyReadonlyArray2<'_, f64>) -> PyResult<Board> {
    if array.shape() != [ROWS, COLS] {
        return Err(PyValueError::new_err(format!(
            "board must have shape ({}, {}), got {:?}",
            ROWS,
            COLS,
            array.shape()
        )));
    }

    let view = array.as_array();
    let mut rows = [[0.0; COLS]; ROWS];
    for (r, row) in rows.iter_mut().enumerate() {
        for (c, value) in row.iter_mut().enumerate() {
            *value = view[[r, c]];
        }
    }
    Ok(Board::from_rows(rows))
}

fn board_to<'py>(py: Python<'py>, board: &Board) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let rows: Vec<Vec<f64>> = board.rows().iter().map(|row| row.to_vec()).collect();
    PyArray2::from_vec2_bound(py, &rows).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Python wrapper for CurlingGame.
#[pyclass(name = "CurlingGame")]
pub struct PyCurlingGame {
    game: CurlingGame,
}

#[pymethods]
impl PyCurlingGame {
    /// Create a game.
    ///
    /// # Arguments
    /// - cache: Memoize simulated shots and legal moves
    /// - partition_capacity: Cache entries per stones-in-play partition
    #[new]
    #[pyo3(signature = (cache = true, partition_capacity = 50_000))]
    fn new(cache: bool, partition_capacity: usize) -> Self {
        let cache = CacheConfig {
            enabled: cache,
            partition_capacity,
        };
        Self {
            game: CurlingGame::new(EngineConfig::default().with_cache(cache)),
        }
    }

    fn init_board<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        board_to(py, &self.game.init_board())
    }

    fn board_shape(&self) -> (usize, usize) {
        self.game.board_shape()
    }

    fn action_size(&self) -> usize {
        self.game.action_size()
    }

    /// Throw a stone. Returns (next_board, next_player).
    fn apply_move<'py>(
        &mut self,
        py: Python<'py>,
        board: PyReadonlyArray2<'py, f64>,
        player: i8,
        action: usize,
    ) -> PyResult<(Bound<'py, PyArray2<f64>>, i8)> {
        let board = board_from(board)?;
        let player = player_from(player)?;
        let (next, next_player) = self
            .game
            .apply_move(&board, player, action)
            .map_err(to_py_err)?;
        Ok((board_to(py, &next)?, next_player.sign()))
    }

    fn legal_moves(&mut self, board: PyReadonlyArray2<'_, f64>, player: i8) -> PyResult<Vec<bool>> {
        let board = board_from(board)?;
        let player = player_from(player)?;
        self.game.legal_moves(&board, player).map_err(to_py_err)
    }

    fn game_ended(&self, board: PyReadonlyArray2<'_, f64>, player: i8) -> PyResult<f64> {
        let board = board_from(board)?;
        Ok(self.game.game_ended(&board, player_from(player)?))
    }

    fn canonical_form<'py>(
        &self,
        py: Python<'py>,
        board: PyReadonlyArray2<'py, f64>,
        player: i8,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let board = board_from(board)?;
        board_to(py, &self.game.canonical_form(&board, player_from(player)?))
    }

    fn symmetries<'py>(
        &self,
        py: Python<'py>,
        board: PyReadonlyArray2<'py, f64>,
        policy: Vec<f64>,
    ) -> PyResult<Vec<(Bound<'py, PyArray2<f64>>, Vec<f64>)>> {
        let board = board_from(board)?;
        self.game
            .symmetries(&board, &policy)
            .into_iter()
            .map(|(b, p)| Ok((board_to(py, &b)?, p)))
            .collect()
    }

    fn serialize(&self, board: PyReadonlyArray2<'_, f64>) -> PyResult<String> {
        Ok(self.game.serialize(&board_from(board)?))
    }

    fn deserialize<'py>(&self, py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let board = self.game.deserialize(text).map_err(to_py_err)?;
        board_to(py, &board)
    }

    fn render(&self, board: PyReadonlyArray2<'_, f64>) -> PyResult<String> {
        Ok(self.game.render(&board_from(board)?))
    }

    /// Human readable description of an action id.
    fn describe_action(&self, action: usize) -> String {
        self.game.action_space().describe(action)
    }

    /// Cache counters as (hits, misses, evictions).
    fn cache_stats(&self) -> (u64, u64, u64) {
        let stats = self.game.cache_stats();
        (stats.hits, stats.misses, stats.evictions)
    }
}
