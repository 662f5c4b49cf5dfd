//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, promotions and rollovers.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found their key
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of entries moved from the stale generation into the recent one
    pub promotions: u64,
    /// Number of times the recent generation was demoted
    pub rollovers: u64,
    /// Number of entries discarded by rollovers
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    // == Record Rollover ==
    /// Counts one rollover and the entries it discarded.
    pub fn record_rollover(&mut self, evicted: usize) {
        self.rollovers += 1;
        self.evictions += evicted as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
