//! Canonical text form of a board.
//!
//! ```text
//! 1:<stones>:2:<stones>:d:<thrown>/<in_play>
//! ```
//!
//! `<stones>` lists the team's thrown, in-play stones as `id=x,y` separated
//! by `;`. Positions must be cell centers of the board grid. The two flag
//! vectors hold one `0`/`1` per column. Derived rows are not stored; parsing
//! recomputes them.
//!
//! ```
//! use rust_curling::board::Board;
//!
//! let board = Board::hammer_two();
//! let text = board.to_text();
//! assert_eq!(text.parse::<Board>().unwrap(), board);
//! ```

use std::str::FromStr;

use glam::DVec2;

use crate::core::units::STONES_PER_TEAM;
use crate::core::{BoardParseError, GridTransform, Player};

use super::state::{Board, COLS};

fn team_tag(player: Player) -> &'static str {
    match player {
        Player::One => "1",
        Player::Two => "2",
    }
}

fn flag_string(flags: &[bool; COLS]) -> String {
    flags.iter().map(|&f| if f { '1' } else { '0' }).collect()
}

fn parse_flags(text: &str) -> Result<[bool; COLS], BoardParseError> {
    let bad = || BoardParseError::Flags(text.to_string());
    if text.len() != COLS {
        return Err(bad());
    }

    let mut flags = [false; COLS];
    for (flag, ch) in flags.iter_mut().zip(text.chars()) {
        *flag = match ch {
            '0' => false,
            '1' => true,
            _ => return Err(bad()),
        };
    }
    Ok(flags)
}

fn parse_stone(entry: &str, grid: &GridTransform) -> Result<(usize, DVec2), BoardParseError> {
    let bad = || BoardParseError::Stone(entry.to_string());

    let (id, coords) = entry.split_once('=').ok_or_else(bad)?;
    let (x, y) = coords.split_once(',').ok_or_else(bad)?;

    let id: usize = id.trim().parse().map_err(|_| bad())?;
    if id >= STONES_PER_TEAM {
        return Err(BoardParseError::StoneId(id));
    }

    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(bad());
    }

    let position = DVec2::new(x, y);
    if grid.snap(position) != Some(position) {
        return Err(BoardParseError::OffGrid(entry.to_string()));
    }
    Ok((id, position))
}

impl Board {
    /// Canonical text form. Equal boards give equal strings.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for player in Player::ALL {
            let stones: Vec<String> = player
                .columns()
                .filter(|&c| self.is_live(c))
                .map(|c| {
                    let p = self.position(c);
                    format!("{}={},{}", c - player.column_offset(), p.x, p.y)
                })
                .collect();
            out.push_str(team_tag(player));
            out.push(':');
            out.push_str(&stones.join(";"));
            out.push(':');
        }
        out.push_str("d:");
        out.push_str(&flag_string(&self.thrown_flags()));
        out.push('/');
        out.push_str(&flag_string(&self.in_play_flags()));
        out
    }

    /// Parse the canonical text form.
    pub fn from_text(text: &str) -> Result<Self, BoardParseError> {
        let layout = || BoardParseError::Layout(text.to_string());

        let parts: Vec<&str> = text.trim().split(':').collect();
        let [one_tag, one, two_tag, two, flags_tag, flags] = parts.as_slice() else {
            return Err(layout());
        };
        if *one_tag != "1" || *two_tag != "2" || *flags_tag != "d" {
            return Err(layout());
        }

        let (thrown, in_play) = flags.split_once('/').ok_or_else(layout)?;
        let thrown = parse_flags(thrown)?;
        let in_play = parse_flags(in_play)?;

        let mut board = Board::new();
        board.put_flags(&thrown, &in_play);

        let grid = GridTransform::default();
        let mut listed = [false; COLS];
        for (player, stones) in [(Player::One, one), (Player::Two, two)] {
            for entry in stones.split(';').filter(|e| !e.is_empty()) {
                let (id, position) = parse_stone(entry, &grid)?;
                let column = player.column_offset() + id;
                if listed[column] || !(thrown[column] && in_play[column]) {
                    return Err(BoardParseError::Inconsistent {
                        column,
                        thrown: thrown[column],
                        in_play: in_play[column],
                    });
                }
                listed[column] = true;
                board.put_stone(column, position, true, true);
            }
        }

        if let Some(column) = (0..COLS).find(|&c| thrown[c] && in_play[c] && !listed[c]) {
            return Err(BoardParseError::Inconsistent {
                column,
                thrown: true,
                in_play: true,
            });
        }

        board.update_distance_and_score();
        Ok(board)
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_text(s)
    }
}
