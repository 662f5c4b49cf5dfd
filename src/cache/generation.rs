//! Generation Store Module
//!
//! Holds the two generations the cache is built from and performs rollovers.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::mem;

use ahash::RandomState;

/// One generation of entries.
pub(crate) type Generation<K, V> = HashMap<K, V, RandomState>;

// == Generations ==
/// The `recent` and `stale` generations of a cache.
///
/// `recent` never holds more than `capacity` entries. A key lives in at most
/// one generation at a time.
#[derive(Debug)]
pub(crate) struct Generations<K, V> {
    recent: Generation<K, V>,
    stale: Generation<K, V>,
    capacity: usize,
}

impl<K, V> Generations<K, V>
where
    K: Hash + Eq,
{
    // == Constructor ==
    /// Creates two empty generations. `capacity` must be non-zero.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            recent: Generation::default(),
            stale: Generation::default(),
            capacity,
        }
    }

    // == Rollover ==
    /// Demotes `recent` to `stale` once `recent` is full.
    ///
    /// Returns the previous `stale` generation, which the caller now owns and
    /// which is no longer reachable from the cache. Returns `None` when
    /// `recent` still has room.
    pub fn rollover_if_full(&mut self) -> Option<Generation<K, V>> {
        if self.recent.len() < self.capacity {
            return None;
        }
        let demoted = mem::take(&mut self.recent);
        Some(mem::replace(&mut self.stale, demoted))
    }

    // == Insert Recent ==
    /// Inserts a key that is in neither generation.
    ///
    /// The caller runs `rollover_if_full` first.
    pub fn insert_recent(&mut self, key: K, value: V) -> &mut V {
        debug_assert!(self.recent.len() < self.capacity);
        self.recent.entry(key).or_insert(value)
    }

    // == Take Stale ==
    /// Removes an entry from `stale` so it can be promoted.
    pub fn take_stale<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.stale.remove_entry(key)
    }

    // == Remove ==
    /// Removes a key from whichever generation holds it.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.recent.remove(key).or_else(|| self.stale.remove(key))
    }

    // == Lookups ==
    /// Looks a key up in either generation without moving it.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.recent.get(key).or_else(|| self.stale.get(key))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.recent.contains_key(key) || self.stale.contains_key(key)
    }

    pub fn recent(&self) -> &Generation<K, V> {
        &self.recent
    }

    pub fn recent_mut(&mut self) -> &mut Generation<K, V> {
        &mut self.recent
    }

    pub fn stale(&self) -> &Generation<K, V> {
        &self.stale
    }

    // == Clear ==
    /// Drops every entry in both generations and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let dropped = self.len();
        self.recent = Generation::default();
        self.stale = Generation::default();
        dropped
    }

    // == Length ==
    /// Number of live keys. Generations never overlap, so the sizes add up.
    pub fn len(&self) -> usize {
        self.recent.len() + self.stale.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Iteration ==
    /// Iterates `recent` first, then `stale`.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.recent.iter().chain(self.stale.iter())
    }
}
