//! Memoization of simulated moves and legal-move vectors.
//!
//! Entries are partitioned by the number of stones in play. Search trees
//! revisit positions with few stones far more often than crowded ones, and
//! a full partition is simply cleared, so crowded positions never push out
//! the cheap, common ones.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardKey};
use crate::core::units::STONES_PER_END;

use super::config::CacheConfig;

/// Cache counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped when a full partition was cleared.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Partition {
    moves: FxHashMap<(BoardKey, usize), Board>,
    legal: FxHashMap<BoardKey, Vec<bool>>,
}

impl Partition {
    fn len(&self) -> usize {
        self.moves.len() + self.legal.len()
    }

    fn clear(&mut self) {
        self.moves.clear();
        self.legal.clear();
    }
}

/// Partitioned transition cache.
#[derive(Clone, Debug)]
pub struct TransitionCache {
    config: CacheConfig,
    partitions: Vec<Partition>,
    stats: CacheStats,
}

impl TransitionCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            partitions: vec![Partition::default(); STONES_PER_END + 1],
            stats: CacheStats::default(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    #[must_use]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Total entries over all partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.partitions.iter().map(Partition::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.partitions.iter_mut().for_each(Partition::clear);
    }

    fn partition(&mut self, key: &BoardKey) -> &mut Partition {
        let index = key.in_play_count().min(STONES_PER_END);
        &mut self.partitions[index]
    }

    /// Make room for one more entry in the key's partition.
    fn reserve(&mut self, key: &BoardKey) {
        let capacity = self.config.partition_capacity;
        let partition = self.partition(key);
        if partition.len() >= capacity {
            let dropped = partition.len() as u64;
            partition.clear();
            self.stats.evictions += dropped;
        }
    }

    fn record(&mut self, hit: bool) {
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
    }

    /// Board resulting from `action` on the board with this key.
    pub fn get_move(&mut self, key: &BoardKey, action: usize) -> Option<Board> {
        if !self.config.enabled {
            return None;
        }
        let found = self.partition(key).moves.get(&(*key, action)).cloned();
        self.record(found.is_some());
        found
    }

    pub fn put_move(&mut self, key: BoardKey, action: usize, next: Board) {
        if !self.config.enabled {
            return;
        }
        self.reserve(&key);
        self.partition(&key).moves.insert((key, action), next);
    }

    /// Legal-move vector for the board with this key.
    pub fn get_legal(&mut self, key: &BoardKey) -> Option<Vec<bool>> {
        if !self.config.enabled {
            return None;
        }
        let found = self.partition(key).legal.get(key).cloned();
        self.record(found.is_some());
        found
    }

    pub fn put_legal(&mut self, key: BoardKey, legal: Vec<bool>) {
        if !self.config.enabled {
            return;
        }
        self.reserve(&key);
        self.partition(&key).legal.insert(key, legal);
    }
}
