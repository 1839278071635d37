//! Physics calibration parameters.
//!
//! The curl and friction numbers were fitted so that a tee-line draw curls
//! roughly five and a half feet and lands on the button when the broom is
//! held six feet wide. Re-tune them against recorded trajectories rather
//! than treating them as physical truths.

use serde::{Deserialize, Serialize};

use crate::core::units::SURFACE_FRICTION;

/// Physics world parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Integration step in seconds.
    pub dt: f64,

    /// Simulated seconds after which a shot that has not settled is fatal.
    pub time_limit: f64,

    /// Speed (in/s) below which a stone counts as at rest.
    pub rest_speed: f64,

    /// Sliding friction coefficient.
    pub friction: f64,

    /// Peak height of the curl bell curve.
    pub curl_scale: f64,

    /// Width term of the curl bell curve (larger = narrower).
    pub curl_width: f64,

    /// Constant damping term of the curl bell curve.
    pub curl_offset: f64,

    /// Speed (in/s) that maps to one unit on the curl curve.
    pub curl_speed_unit: f64,

    /// Angular velocity lost per step (rad/s).
    pub spin_decay: f64,

    /// Stones spinning slower than this (rad/s) do not curl.
    pub spin_threshold: f64,

    /// Restitution of stone-on-stone impacts.
    pub restitution: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            dt: 0.016,
            time_limit: 60.0,
            rest_speed: 0.01,
            friction: SURFACE_FRICTION,
            curl_scale: 0.06,
            curl_width: 0.2,
            curl_offset: 1.5,
            curl_speed_unit: 72.0,
            spin_decay: 0.0005,
            spin_threshold: 0.01,
            restitution: 0.999_999,
        }
    }
}

impl PhysicsConfig {
    /// Set the integration step.
    #[must_use]
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Set the settle time ceiling.
    #[must_use]
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    /// Set the sliding friction coefficient.
    #[must_use]
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Set the curl bell curve parameters.
    #[must_use]
    pub fn with_curl(mut self, scale: f64, width: f64, offset: f64) -> Self {
        self.curl_scale = scale;
        self.curl_width = width;
        self.curl_offset = offset;
        self
    }

    /// Speed lost to friction in one step.
    #[must_use]
    pub fn friction_step(&self) -> f64 {
        self.friction * crate::core::units::GRAVITY * self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PhysicsConfig::default();
        assert_eq!(config.dt, 0.016);
        assert_eq!(config.time_limit, 60.0);
        assert_eq!(config.friction, SURFACE_FRICTION);
        assert!(config.restitution < 1.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = PhysicsConfig::default()
            .with_dt(0.008)
            .with_time_limit(5.0)
            .with_curl(0.0, 0.2, 1.5);

        assert_eq!(config.dt, 0.008);
        assert_eq!(config.time_limit, 5.0);
        assert_eq!(config.curl_scale, 0.0);
    }

    #[test]
    fn test_friction_step() {
        let config = PhysicsConfig::default();
        let expected = 0.02 * 9.81 * 39.3701 * 0.016;
        assert!((config.friction_step() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_serialization() {
        let config = PhysicsConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PhysicsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
