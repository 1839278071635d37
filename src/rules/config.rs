//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::core::{ActionSpaceConfig, GridTransform};
use crate::physics::PhysicsConfig;

/// Memoization settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Memoize moves and legal-move vectors.
    pub enabled: bool,

    /// Entries per partition before it is cleared.
    /// Partitions are keyed by the number of stones in play.
    pub partition_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            partition_capacity: 50_000,
        }
    }
}

impl CacheConfig {
    /// Create a config with caching turned off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Create a new config with custom partition capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.partition_capacity = capacity;
        self
    }
}

/// Everything a [`CurlingGame`](super::CurlingGame) is built from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub physics: PhysicsConfig,
    pub grid: GridTransform,
    pub actions: ActionSpaceConfig,
    pub cache: CacheConfig,
}

impl EngineConfig {
    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_grid(mut self, grid: GridTransform) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_actions(mut self, actions: ActionSpaceConfig) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}
