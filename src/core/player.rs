//! Player (team) identification.
//!
//! Curling is strictly two-sided, so players are a closed enum rather than
//! an index. Each player owns one block of eight board columns and one stone
//! color. The search side talks about players as `+1` / `-1`.

use serde::{Deserialize, Serialize};

use super::units::STONES_PER_TEAM;

/// One of the two teams in an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    /// Throws first, red stones, board columns 0-7.
    One,
    /// Blue stones, board columns 8-15.
    Two,
}

impl Player {
    /// Both players, in throwing order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Signed representation: `+1` for player one, `-1` for player two.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// Parse the signed representation. Anything but `+1`/`-1` is rejected.
    #[must_use]
    pub const fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Player::One),
            -1 => Some(Player::Two),
            _ => None,
        }
    }

    /// Index of the team's first board column.
    #[must_use]
    pub const fn column_offset(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => STONES_PER_TEAM,
        }
    }

    /// Board columns owned by this team.
    pub fn columns(self) -> std::ops::Range<usize> {
        let start = self.column_offset();
        start..start + STONES_PER_TEAM
    }

    /// Team owning a board column.
    #[must_use]
    pub const fn of_column(column: usize) -> Self {
        if column < STONES_PER_TEAM {
            Player::One
        } else {
            Player::Two
        }
    }

    /// Stone color name.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Player::One => "red",
            Player::Two => "blue",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {} ({})", self.sign(), self.color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }

    #[test]
    fn test_sign_round_trip() {
        for player in Player::ALL {
            assert_eq!(Player::from_sign(player.sign()), Some(player));
        }
        assert_eq!(Player::from_sign(0), None);
        assert_eq!(Player::from_sign(2), None);
    }

    #[test]
    fn test_columns() {
        assert_eq!(Player::One.columns(), 0..8);
        assert_eq!(Player::Two.columns(), 8..16);
        assert_eq!(Player::of_column(7), Player::One);
        assert_eq!(Player::of_column(8), Player::Two);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Player::Two), "Player -1 (blue)");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Player::Two).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Player::Two);
    }
}
