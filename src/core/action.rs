//! Shot representation and the discrete action space.
//!
//! A shot is three choices: the handle (spin direction), the weight class
//! (how far the stone would travel on a straight path) and the broom (where
//! the skip holds the broom, in feet left or right of the center line).
//!
//! The action space is the cross product of the configured handles, weights
//! and brooms, enumerated in that nesting order. Action ids are stable
//! indices into this enumeration.
//!
//! ```
//! use rust_curling::core::{ActionSpace, Handle};
//!
//! let space = ActionSpace::default();
//! assert_eq!(space.len(), 182);
//!
//! let id = space.find(Handle::CounterClockwise, "7", 6).unwrap();
//! let shot = space.decode(id).unwrap();
//! assert_eq!(space.weight(shot.weight).name, "7");
//! assert_eq!(space.encode(&shot).unwrap(), id);
//! ```

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::error::ActionError;
use super::units::{feet, GRAVITY, STONE_MASS};

/// Rotation applied at release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    /// Positive angular velocity. Curls toward negative X.
    CounterClockwise,
    /// Negative angular velocity. Curls toward positive X.
    Clockwise,
}

impl Handle {
    /// Initial angular velocity in rad/s.
    #[must_use]
    pub const fn spin(self) -> f64 {
        match self {
            Handle::CounterClockwise => 1.0,
            Handle::Clockwise => -1.0,
        }
    }

    /// Signed representation (`+1` / `-1`).
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Handle::CounterClockwise => 1,
            Handle::Clockwise => -1,
        }
    }

    /// The handle producing the mirror-image curl.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Handle::CounterClockwise => Handle::Clockwise,
            Handle::Clockwise => Handle::CounterClockwise,
        }
    }
}

/// A named weight class mapped to a target travel distance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightClass {
    /// Name used by skips ("3", "7", "control", ...).
    pub name: String,
    /// Target travel distance from the delivery point, in feet.
    pub distance_ft: f64,
}

impl WeightClass {
    pub fn new(name: impl Into<String>, distance_ft: f64) -> Self {
        Self {
            name: name.into(),
            distance_ft,
        }
    }

    /// Target travel distance in inches.
    #[must_use]
    pub fn distance(&self) -> f64 {
        feet(self.distance_ft)
    }
}

/// Configuration of the action space axes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionSpaceConfig {
    /// Handles, outermost axis.
    pub handles: Vec<Handle>,
    /// Weight classes, middle axis.
    pub weights: Vec<WeightClass>,
    /// Lowest broom offset in feet (inclusive).
    pub broom_min: i32,
    /// Highest broom offset in feet (inclusive).
    pub broom_max: i32,
}

impl Default for ActionSpaceConfig {
    fn default() -> Self {
        Self {
            handles: vec![Handle::CounterClockwise, Handle::Clockwise],
            weights: vec![
                WeightClass::new("3", 118.0),
                WeightClass::new("4", 120.0),
                WeightClass::new("5", 122.0),
                WeightClass::new("6", 123.0),
                WeightClass::new("7", 124.5),
                WeightClass::new("8", 126.0),
                WeightClass::new("control", 148.0),
            ],
            broom_min: -6,
            broom_max: 6,
        }
    }
}

impl ActionSpaceConfig {
    /// Restrict the handles.
    #[must_use]
    pub fn with_handles(mut self, handles: Vec<Handle>) -> Self {
        self.handles = handles;
        self
    }

    /// Replace the weight classes.
    #[must_use]
    pub fn with_weights(mut self, weights: Vec<WeightClass>) -> Self {
        self.weights = weights;
        self
    }

    /// Keep only the named weight classes of the current table.
    #[must_use]
    pub fn keep_weights(mut self, names: &[&str]) -> Self {
        self.weights.retain(|w| names.contains(&w.name.as_str()));
        self
    }

    /// Set the broom range (inclusive, feet).
    #[must_use]
    pub fn with_brooms(mut self, min: i32, max: i32) -> Self {
        self.broom_min = min;
        self.broom_max = max;
        self
    }

    fn broom_count(&self) -> usize {
        if self.broom_max < self.broom_min {
            0
        } else {
            (self.broom_max - self.broom_min + 1) as usize
        }
    }
}

/// A decoded shot. `weight` indexes the action space's weight table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shot {
    pub handle: Handle,
    pub weight: usize,
    pub broom: i32,
}

/// Release velocity for a weight class and broom.
///
/// The speed is chosen so that sliding friction does exactly enough work to
/// stop the stone after the weight's travel distance. The heading points
/// at the broom, held `broom` feet off the center line at that distance.
#[must_use]
pub fn velocity_for(weight: &WeightClass, broom: i32, friction: f64) -> DVec2 {
    let friction_force = friction * (STONE_MASS * GRAVITY);
    let work = weight.distance() * friction_force;
    let speed = (2.0 * work / STONE_MASS).sqrt();

    let direction = DVec2::new(feet(f64::from(broom)), weight.distance()).normalize_or_zero();
    direction * speed
}

/// The enumerated action space.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionSpace {
    config: ActionSpaceConfig,
}

impl Default for ActionSpace {
    fn default() -> Self {
        Self::new(ActionSpaceConfig::default())
    }
}

impl ActionSpace {
    pub fn new(config: ActionSpaceConfig) -> Self {
        assert!(!config.handles.is_empty(), "Action space needs at least one handle");
        assert!(!config.weights.is_empty(), "Action space needs at least one weight");
        assert!(config.broom_count() > 0, "Action space needs at least one broom");
        Self { config }
    }

    /// The axis configuration.
    #[must_use]
    pub fn config(&self) -> &ActionSpaceConfig {
        &self.config
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.config.handles.len() * self.config.weights.len() * self.config.broom_count()
    }

    /// Always false; an action space has at least one action.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Weight class by index.
    #[must_use]
    pub fn weight(&self, index: usize) -> &WeightClass {
        &self.config.weights[index]
    }

    /// Decode an action id.
    pub fn decode(&self, action: usize) -> Result<Shot, ActionError> {
        if action >= self.len() {
            return Err(ActionError::OutOfRange {
                action,
                size: self.len(),
            });
        }

        let brooms = self.config.broom_count();
        let weights = self.config.weights.len();

        let broom = (action % brooms) as i32 + self.config.broom_min;
        let weight = (action / brooms) % weights;
        let handle = self.config.handles[action / (brooms * weights)];

        Ok(Shot {
            handle,
            weight,
            broom,
        })
    }

    /// Encode a shot. Exact inverse of [`ActionSpace::decode`].
    pub fn encode(&self, shot: &Shot) -> Result<usize, ActionError> {
        let handle_index = self
            .config
            .handles
            .iter()
            .position(|h| *h == shot.handle)
            .ok_or(ActionError::UnknownShot(*shot))?;

        if shot.weight >= self.config.weights.len()
            || shot.broom < self.config.broom_min
            || shot.broom > self.config.broom_max
        {
            return Err(ActionError::UnknownShot(*shot));
        }

        let brooms = self.config.broom_count();
        let weights = self.config.weights.len();
        let broom_index = (shot.broom - self.config.broom_min) as usize;

        Ok((handle_index * weights + shot.weight) * brooms + broom_index)
    }

    /// Look up an action by handle, weight name and broom.
    #[must_use]
    pub fn find(&self, handle: Handle, weight: &str, broom: i32) -> Option<usize> {
        let weight = self.config.weights.iter().position(|w| w.name == weight)?;
        self.encode(&Shot {
            handle,
            weight,
            broom,
        })
        .ok()
    }

    /// Release velocity for a decoded shot.
    #[must_use]
    pub fn velocity(&self, shot: &Shot, friction: f64) -> DVec2 {
        velocity_for(self.weight(shot.weight), shot.broom, friction)
    }

    /// Iterate over all shots in id order.
    pub fn shots(&self) -> impl Iterator<Item = Shot> + '_ {
        (0..self.len()).filter_map(|id| self.decode(id).ok())
    }

    /// Human readable description of an action.
    #[must_use]
    pub fn describe(&self, action: usize) -> String {
        match self.decode(action) {
            Ok(shot) => format!(
                "{}:{:?}/{}/{:+}ft",
                action,
                shot.handle,
                self.weight(shot.weight).name,
                shot.broom
            ),
            Err(_) => format!("{}:invalid", action),
        }
    }
}
