//! Physical constants and sheet geometry.
//!
//! All lengths are in inches, time in seconds. The delivery point (where a
//! shot is released) is the origin; the sheet runs along +Y toward the house
//! and the center line is `x = 0`.

use glam::DVec2;

/// Inches per foot.
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Inches per meter.
pub const INCHES_PER_METER: f64 = 39.3701;

/// Convert a length given in feet and inches to inches.
#[must_use]
pub fn dist(feet: f64, inches: f64) -> f64 {
    feet * INCHES_PER_FOOT + inches
}

/// Convert feet to inches.
#[must_use]
pub fn feet(ft: f64) -> f64 {
    ft * INCHES_PER_FOOT
}

/// Convert meters to inches.
#[must_use]
pub fn meters(m: f64) -> f64 {
    m * INCHES_PER_METER
}

/// Stone radius.
pub const STONE_RADIUS: f64 = 5.73;

/// Stone mass. Units cancel out of every force calculation.
pub const STONE_MASS: f64 = 2.0;

/// Gravitational acceleration in m/s^2.
pub const GRAVITY_MPS2: f64 = 9.81;

/// Gravitational acceleration in in/s^2.
pub const GRAVITY: f64 = GRAVITY_MPS2 * INCHES_PER_METER;

/// Surface friction coefficient between stone and pebbled ice.
///
/// Picked so that a draw weight stone travels its nominal distance.
pub const SURFACE_FRICTION: f64 = 0.02;

/// Width of the sheet between the side boards (14 ft).
pub const ICE_WIDTH: f64 = 14.0 * INCHES_PER_FOOT;

/// X coordinate of the right side wall. The left wall is at `-HALF_ICE_WIDTH`.
pub const HALF_ICE_WIDTH: f64 = ICE_WIDTH / 2.0;

/// Distance from the delivery point to the tee line (124.5 ft).
pub const TEE_LINE: f64 = 124.5 * INCHES_PER_FOOT;

/// Hog line, 21 ft in front of the tee line.
pub const HOG_LINE: f64 = TEE_LINE - 21.0 * INCHES_PER_FOOT;

/// Back line, 6 ft behind the tee line.
pub const BACK_LINE: f64 = TEE_LINE + 6.0 * INCHES_PER_FOOT;

/// Radius of the house (12 ft ring).
pub const HOUSE_RADIUS: f64 = 6.0 * INCHES_PER_FOOT;

/// A stone counts as "in the house" when its center is closer than this to
/// the button, i.e. any part of the stone touches the 12 ft ring.
pub const HOUSE_REACH: f64 = HOUSE_RADIUS + STONE_RADIUS;

/// Center of the house.
pub const BUTTON: DVec2 = DVec2::new(0.0, TEE_LINE);

/// Stones per team in one end.
pub const STONES_PER_TEAM: usize = 8;

/// Stones thrown in one end.
pub const STONES_PER_END: usize = 2 * STONES_PER_TEAM;

/// Euclidean distance from a point to the button.
#[must_use]
pub fn distance_to_button(position: DVec2) -> f64 {
    position.distance(BUTTON)
}

/// Check whether a stone centered at `position` sits in the house.
#[must_use]
pub fn in_house(position: DVec2) -> bool {
    distance_to_button(position) < HOUSE_REACH
}

/// Check whether a stone centered at `position` is a guard: past the hog
/// line, short of the tee line and clear of the house.
#[must_use]
pub fn is_guard_position(position: DVec2) -> bool {
    let between_lines = position.y >= HOG_LINE && position.y < TEE_LINE;
    between_lines && distance_to_button(position) > HOUSE_REACH
}

/// Format inches as feet with one decimal, for logs and rendering.
#[must_use]
pub fn to_feet_str(inches: f64) -> String {
    format!("{:.1}", inches / INCHES_PER_FOOT)
}
