//! The board: a 6×16 array describing an end at rest.
//!
//! ## Layout
//!
//! Columns 0-7 are player one's stones, 8-15 player two's, in throwing
//! order. Rows:
//!
//! | row | meaning |
//! |-----|---------|
//! | `X` | x position (inches) |
//! | `Y` | y position (inches) |
//! | `THROWN` | 1 once the stone has been delivered |
//! | `IN_PLAY` | 0 once the stone left play |
//! | `DISTANCE` | derived: distance to the button |
//! | `SCORING` | derived: 1 if the stone currently counts |
//!
//! A stone that has not been thrown, or that left play, sits at (0, 0).
//! The derived rows are always recomputed, never patched.
//!
//! Live stones always sit on cell centers of the default [`GridTransform`].
//! [`Board::set_stone`] and [`Board::from_rows`] snap positions on the way in,
//! and a stone that falls off the grid is taken out of play, the same rule
//! the physics world applies to stones at rest.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::units::{
    distance_to_button, in_house, BUTTON, STONES_PER_END, STONES_PER_TEAM, TEE_LINE,
};
use crate::core::{GridTransform, Player};

use super::key::BoardKey;

/// Row of x positions.
pub const X: usize = 0;
/// Row of y positions.
pub const Y: usize = 1;
/// Row of thrown flags.
pub const THROWN: usize = 2;
/// Row of in-play flags.
pub const IN_PLAY: usize = 3;
/// Row of distances to the button (derived).
pub const DISTANCE: usize = 4;
/// Row of scoring flags (derived).
pub const SCORING: usize = 5;

/// Number of rows.
pub const ROWS: usize = 6;
/// Number of columns.
pub const COLS: usize = STONES_PER_END;

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Turn `-0.0` into `0.0` so equal boards have equal bits.
fn clean(value: f64) -> f64 {
    value + 0.0
}

/// Game state between shots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBoard")]
pub struct Board {
    cells: [[f64; COLS]; ROWS],
}

/// Wire shape of [`Board`]; deserialized boards go through [`Board::from_rows`].
#[derive(Deserialize)]
struct RawBoard {
    cells: [[f64; COLS]; ROWS],
}

impl From<RawBoard> for Board {
    fn from(raw: RawBoard) -> Self {
        Board::from_rows(raw.cells)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Board at the start of an end: nothing thrown, everything in play.
    #[must_use]
    pub fn new() -> Self {
        let mut cells = [[0.0; COLS]; ROWS];
        cells[IN_PLAY] = [1.0; COLS];
        Self { cells }
    }

    /// Build a board from raw rows.
    ///
    /// Any non-zero flag counts as set. Live positions are snapped to the
    /// board grid, other positions cleared, and derived rows recomputed.
    #[must_use]
    pub fn from_rows(cells: [[f64; COLS]; ROWS]) -> Self {
        let grid = GridTransform::default();
        let mut board = Self::new();
        for column in 0..COLS {
            let position = DVec2::new(cells[X][column], cells[Y][column]);
            let thrown = cells[THROWN][column] != 0.0;
            let in_play = cells[IN_PLAY][column] != 0.0;
            board.put_stone(column, position, thrown, in_play);
            board.snap_column(column, &grid);
        }
        board.update_distance_and_score();
        board
    }

    /// Raw rows.
    #[must_use]
    pub fn rows(&self) -> &[[f64; COLS]; ROWS] {
        &self.cells
    }

    /// One row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64; COLS] {
        &self.cells[row]
    }

    /// Board shape as (rows, columns).
    #[must_use]
    pub const fn shape() -> (usize, usize) {
        (ROWS, COLS)
    }

    // === Per-stone access ===

    #[must_use]
    pub fn position(&self, column: usize) -> DVec2 {
        DVec2::new(self.cells[X][column], self.cells[Y][column])
    }

    #[must_use]
    pub fn is_thrown(&self, column: usize) -> bool {
        self.cells[THROWN][column] != 0.0
    }

    #[must_use]
    pub fn is_in_play(&self, column: usize) -> bool {
        self.cells[IN_PLAY][column] != 0.0
    }

    /// Thrown and still in play: the stone has a position on the sheet.
    #[must_use]
    pub fn is_live(&self, column: usize) -> bool {
        self.is_thrown(column) && self.is_in_play(column)
    }

    #[must_use]
    pub fn distance(&self, column: usize) -> f64 {
        self.cells[DISTANCE][column]
    }

    #[must_use]
    pub fn is_scoring(&self, column: usize) -> bool {
        self.cells[SCORING][column] != 0.0
    }

    /// Columns of stones with a position on the sheet.
    pub fn live_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(move |&c| self.is_live(c))
    }

    /// Set the state of one stone and recompute the derived rows.
    ///
    /// Positions are only kept for stones that are thrown and in play, and
    /// are snapped to the board grid. A live stone placed off the grid is
    /// recorded as out of play.
    pub fn set_stone(&mut self, player: Player, id: usize, position: DVec2, thrown: bool, in_play: bool) {
        assert!(id < STONES_PER_TEAM, "Stone id must be 0-7");
        let column = player.column_offset() + id;
        self.put_stone(column, position, thrown, in_play);
        self.snap_column(column, &GridTransform::default());
        self.update_distance_and_score();
    }

    /// Copy with every live stone moved to its cell center on `grid`.
    /// Stones off that grid are taken out of play.
    #[must_use]
    pub fn snapped(&self, grid: &GridTransform) -> Self {
        let mut board = self.clone();
        for column in self.live_columns() {
            board.snap_column(column, grid);
        }
        board.update_distance_and_score();
        board
    }

    fn snap_column(&mut self, column: usize, grid: &GridTransform) {
        if !self.is_live(column) {
            return;
        }
        match grid.snap(self.position(column)) {
            Some(position) => self.put_stone(column, position, true, true),
            None => self.put_stone(column, DVec2::ZERO, true, false),
        }
    }

    /// Set one column without recomputing derived rows.
    pub(crate) fn put_stone(&mut self, column: usize, position: DVec2, thrown: bool, in_play: bool) {
        let position = if thrown && in_play { position } else { DVec2::ZERO };
        self.cells[X][column] = clean(position.x);
        self.cells[Y][column] = clean(position.y);
        self.cells[THROWN][column] = flag(thrown);
        self.cells[IN_PLAY][column] = flag(in_play);
    }

    /// Set the thrown/in-play flags of every column, clearing positions.
    pub(crate) fn put_flags(&mut self, thrown: &[bool; COLS], in_play: &[bool; COLS]) {
        for column in 0..COLS {
            self.put_stone(column, DVec2::ZERO, thrown[column], in_play[column]);
        }
    }

    /// Thrown flags as a bit vector.
    #[must_use]
    pub fn thrown_flags(&self) -> [bool; COLS] {
        std::array::from_fn(|c| self.is_thrown(c))
    }

    /// In-play flags as a bit vector.
    #[must_use]
    pub fn in_play_flags(&self) -> [bool; COLS] {
        std::array::from_fn(|c| self.is_in_play(c))
    }

    // === Counting ===

    /// Stones thrown by both teams.
    #[must_use]
    pub fn thrown_count(&self) -> usize {
        (0..COLS).filter(|&c| self.is_thrown(c)).count()
    }

    /// Stones thrown by one team.
    #[must_use]
    pub fn thrown_by(&self, player: Player) -> usize {
        player.columns().filter(|&c| self.is_thrown(c)).count()
    }

    /// Stones a team still has to throw.
    #[must_use]
    pub fn unthrown_by(&self, player: Player) -> usize {
        STONES_PER_TEAM - self.thrown_by(player)
    }

    /// Stones with a position on the sheet.
    #[must_use]
    pub fn in_play_count(&self) -> usize {
        self.live_columns().count()
    }

    /// Check whether all sixteen stones have been thrown.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.thrown_count() >= STONES_PER_END
    }

    /// Team throwing next: the one with more stones left, player one on a
    /// tie. `None` once the end is complete.
    #[must_use]
    pub fn next_player(&self) -> Option<Player> {
        let one = self.unthrown_by(Player::One);
        let two = self.unthrown_by(Player::Two);
        match (one, two) {
            (0, 0) => None,
            (one, two) if one >= two => Some(Player::One),
            _ => Some(Player::Two),
        }
    }

    /// Stone number the team throws next (its first unthrown column).
    #[must_use]
    pub fn next_stone_id(&self, player: Player) -> Option<usize> {
        (0..STONES_PER_TEAM).find(|&id| !self.is_thrown(player.column_offset() + id))
    }

    // === Derived rows ===

    /// Live columns sorted by distance to the button (ties by column).
    #[must_use]
    pub fn by_distance(&self) -> Vec<usize> {
        let mut columns: Vec<usize> = self.live_columns().collect();
        columns.sort_by(|&a, &b| self.distance(a).total_cmp(&self.distance(b)).then(a.cmp(&b)));
        columns
    }

    /// Recompute the DISTANCE and SCORING rows.
    ///
    /// The team with the stone closest to the button scores every stone of
    /// its own that is closer than the opponent's best stone.
    pub fn update_distance_and_score(&mut self) {
        for column in 0..COLS {
            self.cells[DISTANCE][column] = if self.is_live(column) {
                distance_to_button(self.position(column))
            } else {
                0.0
            };
            self.cells[SCORING][column] = 0.0;
        }

        let order = self.by_distance();
        let Some(&closest) = order.first() else {
            return;
        };

        let team = Player::of_column(closest);
        for column in order {
            if Player::of_column(column) != team {
                break;
            }
            self.cells[SCORING][column] = 1.0;
        }
    }

    /// Scoring stones per the in-house rule: the team owning the stones
    /// in the house closest to the button, and how many it has before the
    /// opponent's best stone. `None` when the house is empty.
    #[must_use]
    pub fn shot_rocks(&self) -> Option<(Player, usize)> {
        let in_house: Vec<usize> = self
            .by_distance()
            .into_iter()
            .filter(|&c| in_house(self.position(c)))
            .collect();

        let team = Player::of_column(*in_house.first()?);
        let count = in_house
            .iter()
            .take_while(|&&c| Player::of_column(c) == team)
            .count();
        Some((team, count))
    }

    // === Transformations ===

    /// Swap the two team blocks, in every row.
    #[must_use]
    pub fn swapped_teams(&self) -> Self {
        let mut cells = self.cells;
        for row in cells.iter_mut() {
            let (one, two) = row.split_at_mut(STONES_PER_TEAM);
            one.swap_with_slice(two);
        }
        Self { cells }
    }

    /// The board seen by `player`: unchanged for player one, team blocks
    /// swapped for player two. Applying it twice restores the board.
    #[must_use]
    pub fn canonical(&self, player: Player) -> Self {
        match player {
            Player::One => self.clone(),
            Player::Two => self.swapped_teams(),
        }
    }

    /// Left-right mirror image: x negated.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let mut board = self.clone();
        for column in 0..COLS {
            board.cells[X][column] = clean(-self.cells[X][column]);
        }
        board.update_distance_and_score();
        board
    }

    /// Exchange two columns.
    #[must_use]
    pub fn with_swapped_stones(&self, a: usize, b: usize) -> Self {
        let mut board = self.clone();
        for row in board.cells.iter_mut() {
            row.swap(a, b);
        }
        board
    }

    /// Check whether the X and Y rows are identical.
    #[must_use]
    pub fn same_positions(&self, other: &Board) -> bool {
        self.cells[X] == other.cells[X] && self.cells[Y] == other.cells[Y]
    }

    /// Structural hash key over the non-derived rows.
    #[must_use]
    pub fn key(&self) -> BoardKey {
        BoardKey::new(self)
    }

    // === Fixtures ===

    /// Every stone thrown and out of play.
    #[must_use]
    pub fn all_out_of_play() -> Self {
        let mut board = Self::new();
        board.put_flags(&[true; COLS], &[false; COLS]);
        board.update_distance_and_score();
        board
    }

    /// Complete end where only player two's last stone (the hammer) is in
    /// play, on the button.
    #[must_use]
    pub fn hammer_one() -> Self {
        let mut board = Self::all_out_of_play();
        board.set_stone(Player::Two, STONES_PER_TEAM - 1, BUTTON, true, true);
        board
    }

    /// Like [`Board::hammer_one`] with player two's seventh stone also in
    /// the house, six inches right of and behind the button.
    #[must_use]
    pub fn hammer_two() -> Self {
        let mut board = Self::hammer_one();
        let position = DVec2::new(6.0, TEE_LINE + 6.0);
        board.set_stone(Player::Two, STONES_PER_TEAM - 2, position, true, true);
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::HOUSE_RADIUS;

    fn near_button(dx: f64, dy: f64) -> DVec2 {
        BUTTON + DVec2::new(dx, dy)
    }

    #[test]
    fn test_initial_board() {
        let board = Board::new();
        assert_eq!(board.thrown_count(), 0);
        assert_eq!(board.in_play_count(), 0);
        assert_eq!(board.next_player(), Some(Player::One));
        assert_eq!(board.row(IN_PLAY), &[1.0; COLS]);
        assert_eq!(Board::shape(), (6, 16));
    }

    #[test]
    fn test_update_distance_and_score() {
        let mut board = Board::new();
        board.set_stone(Player::One, 0, near_button(1.0, 1.0), true, true);

        assert!(1.41 < board.distance(0) && board.distance(0) < 1.42);
        assert!(board.is_scoring(0));
    }

    #[test]
    fn test_scoring_stops_at_first_opponent() {
        let mut board = Board::new();
        board.set_stone(Player::One, 0, near_button(1.0, 1.0), true, true);
        board.set_stone(Player::One, 1, near_button(2.0, 2.0), true, true);
        board.set_stone(Player::One, 2, near_button(3.0, 3.0), true, true);
        board.set_stone(Player::Two, 0, near_button(4.0, 4.0), true, true);
        board.set_stone(Player::One, 4, near_button(5.0, 5.0), true, true);

        let scoring: f64 = board.row(SCORING).iter().sum();
        assert_eq!(scoring, 3.0);
        assert!(!board.is_scoring(4));
        assert!(!board.is_scoring(8));
    }

    #[test]
    fn test_scoring_for_second_team() {
        let mut board = Board::new();
        board.set_stone(Player::Two, 0, near_button(1.0, 1.0), true, true);
        board.set_stone(Player::Two, 1, near_button(2.0, 2.0), true, true);
        board.set_stone(Player::Two, 2, near_button(3.0, 3.0), true, true);
        board.set_stone(Player::One, 0, near_button(4.0, 4.0), true, true);
        board.set_stone(Player::Two, 4, near_button(5.0, 5.0), true, true);

        let scoring: f64 = board.row(SCORING).iter().sum();
        assert_eq!(scoring, 3.0);
        assert!(board.is_scoring(8) && board.is_scoring(9) && board.is_scoring(10));
    }

    #[test]
    fn test_out_of_play_stone_has_no_position() {
        let mut board = Board::new();
        board.set_stone(Player::One, 0, near_button(1.0, 1.0), true, false);
        assert_eq!(board.position(0), DVec2::ZERO);
        assert_eq!(board.distance(0), 0.0);
        assert!(!board.is_scoring(0));
    }

    #[test]
    fn test_next_player_alternates() {
        let mut board = Board::new();
        assert_eq!(board.next_player(), Some(Player::One));

        board.set_stone(Player::One, 0, BUTTON, true, true);
        assert_eq!(board.next_player(), Some(Player::Two));

        board.set_stone(Player::Two, 0, BUTTON, true, false);
        assert_eq!(board.next_player(), Some(Player::One));
        assert_eq!(board.next_stone_id(Player::One), Some(1));
        assert_eq!(board.next_stone_id(Player::Two), Some(1));

        assert_eq!(Board::all_out_of_play().next_player(), None);
        assert_eq!(Board::all_out_of_play().next_stone_id(Player::One), None);
    }

    #[test]
    fn test_canonical_involution() {
        let mut board = Board::new();
        board.set_stone(Player::One, 0, near_button(3.0, -7.0), true, true);
        board.set_stone(Player::Two, 0, near_button(-20.0, 4.0), true, false);

        assert_eq!(board.canonical(Player::One), board);
        let swapped = board.canonical(Player::Two);
        assert_ne!(swapped, board);
        assert_eq!(swapped.position(8), board.position(0));
        assert_eq!(swapped.canonical(Player::Two), board);
    }

    #[test]
    fn test_mirrored() {
        let mut board = Board::new();
        board.set_stone(Player::One, 0, near_button(3.0, -7.0), true, true);

        let mirror = board.mirrored();
        assert_eq!(mirror.position(0), near_button(-3.0, -7.0));
        assert_eq!(mirror.distance(0), board.distance(0));
        // Unthrown stones keep a positive zero.
        assert_eq!(mirror.row(X)[1].to_bits(), 0.0f64.to_bits());
        assert_eq!(mirror.mirrored(), board);
    }

    #[test]
    fn test_shot_rocks() {
        assert_eq!(Board::all_out_of_play().shot_rocks(), None);
        assert_eq!(Board::hammer_one().shot_rocks(), Some((Player::Two, 1)));
        assert_eq!(Board::hammer_two().shot_rocks(), Some((Player::Two, 2)));
    }

    #[test]
    fn test_shot_rocks_ignores_stones_outside_house() {
        let mut board = Board::all_out_of_play();
        board.set_stone(Player::One, 0, near_button(0.0, -(HOUSE_RADIUS + 20.0)), true, true);
        board.set_stone(Player::Two, 0, near_button(30.0, 0.0), true, true);
        assert_eq!(board.shot_rocks(), Some((Player::Two, 1)));
    }

    #[test]
    fn test_from_rows_recomputes_derived() {
        let mut board = Board::new();
        board.set_stone(Player::Two, 3, near_button(1.0, 0.0), true, true);

        let mut rows = *board.rows();
        rows[DISTANCE] = [9.0; COLS];
        rows[SCORING] = [1.0; COLS];
        assert_eq!(Board::from_rows(rows), board);
    }

    #[test]
    fn test_set_stone_snaps_to_grid() {
        let mut board = Board::new();
        board.set_stone(Player::One, 0, near_button(7.1, -79.9), true, true);
        assert_eq!(board.position(0), near_button(7.0, -80.0));
        assert_eq!(board.distance(0), distance_to_button(near_button(7.0, -80.0)));

        // Short of the hog line: no cell, so out of play.
        board.set_stone(Player::One, 1, DVec2::new(0.0, 1000.0), true, true);
        assert!(board.is_thrown(1));
        assert!(!board.is_in_play(1));
        assert_eq!(board.position(1), DVec2::ZERO);
    }

    #[test]
    fn test_from_rows_cleans_input() {
        let mut rows = *Board::new().rows();
        rows[X][0] = 40.1;
        rows[Y][0] = 1494.1;
        rows[THROWN][0] = 1.0;
        // Not thrown: the stray position is dropped.
        rows[X][1] = 3.0;
        rows[Y][1] = f64::NAN;
        // Thrown, in play, but not on the sheet.
        rows[THROWN][8] = 1.0;
        rows[X][8] = f64::NAN;

        let board = Board::from_rows(rows);
        assert_eq!(board.position(0), DVec2::new(40.0, 1494.0));
        assert_eq!(board.position(1), DVec2::ZERO);
        assert!(board.is_thrown(8) && !board.is_in_play(8));
        assert_eq!(board.in_play_count(), 1);
    }

    #[test]
    fn test_snapped_to_coarser_grid() {
        let mut board = Board::new();
        board.set_stone(Player::Two, 0, near_button(2.5, 0.5), true, true);

        let coarse = board.snapped(&GridTransform::new(1.0));
        assert_eq!(coarse.position(8), near_button(3.0, 1.0));
        assert_eq!(coarse.snapped(&GridTransform::new(1.0)), coarse);
        assert_eq!(board.snapped(&GridTransform::default()), board);
    }

    #[test]
    fn test_serde_goes_through_from_rows() {
        let board = Board::hammer_two();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        let mut rows = *Board::new().rows();
        rows[X][0] = 40.1;
        rows[Y][0] = 1494.1;
        rows[THROWN][0] = 1.0;
        rows[DISTANCE] = [7.0; COLS];
        let json = serde_json::json!({ "cells": rows }).to_string();
        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Board::from_rows(rows));
        assert_eq!(parsed.position(0), DVec2::new(40.0, 1494.0));
        assert_eq!(parsed.distance(1), 0.0);
    }

    #[test]
    #[should_panic(expected = "Stone id must be 0-7")]
    fn test_set_stone_bad_id() {
        Board::new().set_stone(Player::One, 8, BUTTON, true, true);
    }
}
