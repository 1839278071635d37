//! Stone bodies in the physics world.

use glam::DVec2;

use crate::core::units::is_guard_position;
use crate::core::Player;

/// A live stone. Stones that left play have no body.
#[derive(Clone, Debug, PartialEq)]
pub struct Stone {
    /// Stone number within its team (0-7), in throwing order.
    pub id: usize,
    pub team: Player,
    pub position: DVec2,
    pub velocity: DVec2,
    /// Angular velocity in rad/s. Positive spins counter-clockwise.
    pub spin: f64,
    /// This stone is the one being delivered.
    pub is_shooter: bool,
    /// The stone sat in the free guard zone when the shot began.
    pub is_guard: bool,
}

impl Stone {
    /// A stone resting at `position`.
    #[must_use]
    pub fn at_rest(team: Player, id: usize, position: DVec2) -> Self {
        let mut stone = Self {
            id,
            team,
            position,
            velocity: DVec2::ZERO,
            spin: 0.0,
            is_shooter: false,
            is_guard: false,
        };
        stone.update_guard();
        stone
    }

    /// A stone released from the delivery point.
    #[must_use]
    pub fn delivered(team: Player, id: usize, velocity: DVec2, spin: f64) -> Self {
        Self {
            id,
            team,
            position: DVec2::ZERO,
            velocity,
            spin,
            is_shooter: true,
            is_guard: false,
        }
    }

    /// Board column of this stone.
    #[must_use]
    pub fn column(&self) -> usize {
        self.team.column_offset() + self.id
    }

    /// Recompute the guard flag from the current position.
    pub fn update_guard(&mut self) {
        self.is_guard = is_guard_position(self.position);
    }

    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Check whether the stone moves faster than `rest_speed`.
    #[must_use]
    pub fn is_moving(&self, rest_speed: f64) -> bool {
        self.speed() >= rest_speed
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Stone {} {}", self.id, self.team.color())?;
        if self.is_guard {
            write!(f, " guard")?;
        }
        if self.is_shooter {
            write!(f, " shooter")?;
        }
        write!(f, " @ ({:.2},{:.2})>", self.position.x, self.position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::{BUTTON, TEE_LINE};

    #[test]
    fn test_guard_flag_set_at_rest() {
        let guard = Stone::at_rest(Player::One, 0, DVec2::new(0.0, TEE_LINE - 100.0));
        assert!(guard.is_guard);

        let in_house = Stone::at_rest(Player::One, 1, BUTTON);
        assert!(!in_house.is_guard);
    }

    #[test]
    fn test_column() {
        assert_eq!(Stone::at_rest(Player::One, 3, BUTTON).column(), 3);
        assert_eq!(Stone::at_rest(Player::Two, 3, BUTTON).column(), 11);
    }

    #[test]
    fn test_delivered() {
        let stone = Stone::delivered(Player::Two, 0, DVec2::new(0.0, 150.0), -1.0);
        assert!(stone.is_shooter);
        assert!(stone.is_moving(0.01));
        assert_eq!(stone.position, DVec2::ZERO);
    }

    #[test]
    fn test_display() {
        let stone = Stone::at_rest(Player::Two, 2, BUTTON);
        assert_eq!(format!("{}", stone), "<Stone 2 blue @ (0.00,1494.00)>");
    }
}
