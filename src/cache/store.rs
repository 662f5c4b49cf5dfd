//! Cache Store Module
//!
//! Main cache engine: answers lookups from two generations, promotes stale
//! hits and rolls generations over when the recent one fills up.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;

use tracing::{debug, trace};

use crate::cache::generation::Generations;
use crate::cache::{CacheStats, EvictionListener};
use crate::config::Config;
use crate::error::Result;

// == QuickLru ==
/// A bounded key/value cache with approximate LRU eviction.
///
/// Entries live in one of two generations. New and promoted entries go into
/// the `recent` generation; once it holds `capacity` entries, the next
/// insertion demotes it wholesale to `stale` and drops the previous `stale`
/// generation. A lookup that hits `stale` moves the entry back into `recent`.
///
/// # Eviction bound
/// Recency is tracked per generation, not per entry. After its last touch an
/// entry survives at least `capacity - 1` further insertions into `recent`,
/// and is evicted after at most `2 * capacity` insertions of fresh keys.
/// Up to `2 * capacity` entries can be live at once. Callers that need exact
/// least-recently-used order should use a map paired with a linked list
/// instead.
///
/// # Concurrency
/// No internal locking. Wrap the cache in a
/// [`SharedQuickLru`](crate::SharedQuickLru) to share it between threads.
pub struct QuickLru<K, V> {
    /// Recent and stale generations
    pub(super) generations: Generations<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Optional hook receiving entries discarded by a rollover
    listener: Option<Box<dyn EvictionListener<K, V>>>,
    /// Label attached to log records
    name: String,
}

impl<K, V> QuickLru<K, V>
where
    K: Hash + Eq,
{
    // == Constructor ==
    /// Creates an empty cache whose recent generation holds `capacity` entries.
    ///
    /// # Errors
    /// Returns `InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::from_config(&Config::new(capacity))
    }

    /// Creates an empty cache from a configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        debug!(cache = %config.name, capacity = config.capacity, "cache created");

        Ok(Self {
            generations: Generations::new(config.capacity),
            stats: CacheStats::new(),
            listener: None,
            name: config.name.clone(),
        })
    }

    /// Installs a hook that receives every batch of evicted entries.
    pub fn with_eviction_listener<L>(mut self, listener: L) -> Self
    where
        L: EvictionListener<K, V> + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    // == Get ==
    /// Returns the value for `key`, promoting it if it sits in the stale
    /// generation.
    ///
    /// A hit in the recent generation changes nothing but the statistics.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_mut(key).map(|value| &*value)
    }

    /// Like [`get`](Self::get), but yields the stored value for in-place changes.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.generations.recent().contains_key(key) {
            self.stats.record_hit();
            return self.generations.recent_mut().get_mut(key);
        }
        if !self.generations.stale().contains_key(key) {
            self.stats.record_miss();
            return None;
        }
        self.stats.record_hit();
        self.promote(key)
    }

    // == Peek ==
    /// Returns the value for `key` without promoting it or touching statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.generations.get(key)
    }

    // == Has ==
    /// Checks whether `key` is live. Never promotes.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.generations.contains_key(key)
    }

    // == Set ==
    /// Stores a value, returning the one it replaced.
    ///
    /// A key already in the recent generation is overwritten in place. A key
    /// in the stale generation is promoted with the new value. Anything else
    /// is inserted fresh, rolling the generations over first if needed.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.generations.recent_mut().get_mut(&key) {
            return Some(mem::replace(slot, value));
        }

        let previous = self.generations.take_stale(&key).map(|(_, old)| old);
        if previous.is_some() {
            self.stats.record_promotion();
            trace!(cache = %self.name, "promoted stale entry on write");
        }

        self.rollover_if_full();
        self.generations.insert_recent(key, value);
        previous
    }

    // == Remove ==
    /// Deletes `key` from whichever generation holds it.
    ///
    /// Returns whether anything was deleted.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.pop(key).is_some()
    }

    /// Deletes `key` and hands its value back.
    pub fn pop<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.generations.remove(key)
    }

    // == Clear ==
    /// Drops every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        let dropped = self.generations.clear();
        debug!(cache = %self.name, dropped, "cache cleared");
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len());
        stats
    }

    /// Zeroes every statistics counter.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::new();
    }

    // == Length ==
    /// Returns the number of live entries across both generations.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of entries the recent generation holds before a rollover.
    pub fn capacity(&self) -> usize {
        self.generations.capacity()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Iteration ==
    /// Iterates live entries, recent generation first, then stale.
    ///
    /// Order within a generation is unspecified. Iterating never promotes.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.generations.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    // == Promotion ==
    /// Moves a stale entry into the recent generation.
    fn promote<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (key, value) = self.generations.take_stale(key)?;
        self.rollover_if_full();
        self.stats.record_promotion();
        trace!(cache = %self.name, "promoted stale entry on read");
        Some(self.generations.insert_recent(key, value))
    }

    // == Rollover ==
    /// Demotes a full recent generation and reports what it pushed out.
    fn rollover_if_full(&mut self) {
        let Some(discarded) = self.generations.rollover_if_full() else {
            return;
        };

        let evicted = discarded.len();
        self.stats.record_rollover(evicted);
        debug!(
            cache = %self.name,
            capacity = self.generations.capacity(),
            evicted,
            "generation rollover"
        );

        if evicted > 0 {
            if let Some(listener) = self.listener.as_mut() {
                listener.on_evict(discarded.into_iter().collect());
            }
        }
    }
}

impl<K, V> fmt::Debug for QuickLru<K, V>
where
    K: Hash + Eq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickLru")
            .field("name", &self.name)
            .field("capacity", &self.generations.capacity())
            .field("recent", &self.generations.recent().len())
            .field("stale", &self.generations.stale().len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
