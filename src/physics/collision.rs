//! Stone-stone impacts, boundary detection and the removal decision.
//!
//! Removal is decided by a pure function of the candidate stone and a
//! snapshot of the rule-relevant world state. The stepping loop acts on
//! the returned [`Removal`]; no callback mutates the world behind its back.

use crate::core::units::{BACK_LINE, HALF_ICE_WIDTH, STONE_RADIUS};
use crate::core::Player;

use super::stone::Stone;

/// Stones thrown (shooter included) up to which opposing guards are
/// protected from removal.
pub const FIVE_ROCK_LIMIT: usize = 5;

/// Where a stone left the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    LeftWall,
    RightWall,
    BackLine,
}

/// Check whether a stone has left the sheet.
///
/// A stone is out once its edge touches a side board or once it has fully
/// crossed the back line.
#[must_use]
pub fn out_of_bounds(stone: &Stone) -> Option<Boundary> {
    let p = stone.position;
    if p.x - STONE_RADIUS <= -HALF_ICE_WIDTH {
        Some(Boundary::LeftWall)
    } else if p.x + STONE_RADIUS >= HALF_ICE_WIDTH {
        Some(Boundary::RightWall)
    } else if p.y - STONE_RADIUS > BACK_LINE {
        Some(Boundary::BackLine)
    } else {
        None
    }
}

/// Rule-relevant state of the world while a shot is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleContext {
    /// Stones thrown so far in the end, including the one in flight.
    pub thrown: usize,
    /// Team delivering the current shot.
    pub shooter: Player,
}

/// What to do with a stone that left the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// Take the stone out of play.
    Remove,
    /// Removing it would break the five-rock rule: undo the shot and count
    /// the shooter as thrown out of play.
    VetoWithRollback,
}

/// Check whether removing `candidate` would violate the five-rock rule.
#[must_use]
pub fn violates_five_rock_rule(candidate: &Stone, context: &RuleContext) -> bool {
    context.thrown <= FIVE_ROCK_LIMIT && candidate.team != context.shooter && candidate.is_guard
}

/// Decide what happens to a stone that left the sheet.
#[must_use]
pub fn decide_removal(candidate: &Stone, context: &RuleContext) -> Removal {
    if violates_five_rock_rule(candidate, context) {
        Removal::VetoWithRollback
    } else {
        Removal::Remove
    }
}

/// Resolve overlapping, approaching stone pairs with an equal-mass impulse
/// along the contact normal. Returns the number of impacts.
pub fn resolve_contacts(stones: &mut [Stone], restitution: f64) -> usize {
    let contact = 2.0 * STONE_RADIUS;
    let mut impacts = 0;

    for i in 0..stones.len() {
        for j in (i + 1)..stones.len() {
            let offset = stones[j].position - stones[i].position;
            let dist = offset.length();
            if dist >= contact || dist == 0.0 {
                continue;
            }

            let normal = offset / dist;
            let closing = (stones[j].velocity - stones[i].velocity).dot(normal);
            if closing >= 0.0 {
                continue;
            }

            let impulse = -(1.0 + restitution) * closing / 2.0;
            stones[i].velocity -= normal * impulse;
            stones[j].velocity += normal * impulse;
            impacts += 1;
        }
    }

    impacts
}
