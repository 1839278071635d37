//! Human readable board rendering: a stone table and an ASCII house map.

use std::fmt;

use glam::DVec2;

use crate::core::units::{distance_to_button, to_feet_str, BUTTON, HOUSE_RADIUS};
use crate::core::Player;

use super::state::Board;

/// Inches per map character.
const CELL: f64 = 6.0;
/// Map half extent in characters around the button.
const HALF_SPAN: i32 = 14;

fn stone_char(player: Player, scoring: bool) -> char {
    match (player, scoring) {
        (Player::One, true) => 'R',
        (Player::One, false) => 'r',
        (Player::Two, true) => 'B',
        (Player::Two, false) => 'b',
    }
}

fn background(col: i32, row: i32) -> char {
    let point = BUTTON + DVec2::new(f64::from(col) * CELL, f64::from(-row) * CELL);
    if col == 0 && row == 0 {
        '+'
    } else if distance_to_button(point) <= HOUSE_RADIUS {
        '.'
    } else if row == 0 {
        '-'
    } else if col == 0 {
        '|'
    } else {
        ' '
    }
}

fn map_cell(position: DVec2) -> Option<(i32, i32)> {
    let col = ((position.x - BUTTON.x) / CELL).round() as i32;
    let row = ((BUTTON.y - position.y) / CELL).round() as i32;
    let span = -HALF_SPAN..=HALF_SPAN;
    (span.contains(&col) && span.contains(&row)).then_some((col, row))
}

impl Board {
    /// Render the board as text. The map is drawn looking down the sheet
    /// from the delivery end, far side at the top.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        let next = match self.next_player() {
            Some(player) => player.to_string(),
            None => "end over".to_string(),
        };
        out.push_str(&format!(
            "thrown {}/16, in play {}, next: {}\n",
            self.thrown_count(),
            self.in_play_count(),
            next
        ));

        out.push_str(" col team  id        x        y   dist(ft) scoring\n");
        for column in self.by_distance() {
            let player = Player::of_column(column);
            let p = self.position(column);
            out.push_str(&format!(
                "{:>4} {:<5} {:>2} {:>8.2} {:>8.2} {:>10} {}\n",
                column,
                player.color(),
                column - player.column_offset(),
                p.x,
                p.y,
                to_feet_str(self.distance(column)),
                if self.is_scoring(column) { "*" } else { "" }
            ));
        }

        let width = (2 * HALF_SPAN + 1) as usize;
        let mut grid = vec![vec![' '; width]; width];
        for (r, line) in grid.iter_mut().enumerate() {
            for (c, ch) in line.iter_mut().enumerate() {
                *ch = background(c as i32 - HALF_SPAN, r as i32 - HALF_SPAN);
            }
        }
        for column in self.live_columns() {
            if let Some((col, row)) = map_cell(self.position(column)) {
                let ch = stone_char(Player::of_column(column), self.is_scoring(column));
                grid[(row + HALF_SPAN) as usize][(col + HALF_SPAN) as usize] = ch;
            }
        }

        let border: String = std::iter::repeat('=').take(width + 2).collect();
        out.push_str(&border);
        out.push('\n');
        for line in grid {
            out.push('|');
            out.extend(line);
            out.push_str("|\n");
        }
        out.push_str(&border);
        out.push('\n');
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
