//! Per-step stone dynamics: sliding friction, curl and spin decay.

use glam::DVec2;

use super::config::PhysicsConfig;
use super::stone::Stone;

/// Lateral speed change per step from curl at a given speed.
///
/// Bell shaped in speed: zero for a stopped stone, peaks at moderate
/// speed, fades out for fast stones.
#[must_use]
pub fn curl_magnitude(speed: f64, config: &PhysicsConfig) -> f64 {
    let s = speed / config.curl_speed_unit;
    config.curl_scale * s * (-(config.curl_width * s * s + config.curl_offset)).exp()
}

/// Unit vector the curl pushes *against*, for a stone moving along
/// `direction` with the given spin.
///
/// Positive spin curls toward the left of the direction of travel, negative
/// spin toward the right.
#[must_use]
pub fn curl_axis(direction: DVec2, spin: f64) -> DVec2 {
    if spin < 0.0 {
        direction.perp()
    } else {
        -direction.perp()
    }
}

/// Apply friction and curl to a stone's velocity for one step.
pub fn integrate_velocity(stone: &mut Stone, config: &PhysicsConfig) {
    let speed = stone.velocity.length();
    if speed == 0.0 {
        return;
    }

    // Friction would reverse a stone this slow; stop it instead.
    let decel = config.friction_step();
    if speed <= decel {
        stone.velocity = DVec2::ZERO;
        return;
    }

    let direction = stone.velocity / speed;
    stone.velocity -= direction * decel;

    if stone.spin.abs() >= config.spin_threshold {
        stone.velocity -= curl_axis(direction, stone.spin) * curl_magnitude(speed, config);
    }
}

/// Move a stone's spin toward zero by one step.
pub fn decay_spin(stone: &mut Stone, config: &PhysicsConfig) {
    if stone.spin > 0.0 {
        stone.spin = (stone.spin - config.spin_decay).max(0.0);
    } else if stone.spin < 0.0 {
        stone.spin = (stone.spin + config.spin_decay).min(0.0);
    }
}

/// Advance a stone's position by its velocity.
pub fn integrate_position(stone: &mut Stone, dt: f64) {
    stone.position += stone.velocity * dt;
}
