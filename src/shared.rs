//! Shared Cache Module
//!
//! Thread-safe handle around a QuickLru: one lock acquisition per call.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CacheStats, QuickLru};
use crate::config::Config;
use crate::error::Result;

// == Shared QuickLru ==
/// Cloneable, thread-safe handle to a [`QuickLru`].
///
/// Every method takes the lock once and releases it before returning, so
/// lookups hand back clones of the stored values. Use
/// [`with_lock`](Self::with_lock) to run several operations atomically.
pub struct SharedQuickLru<K, V> {
    inner: Arc<Mutex<QuickLru<K, V>>>,
}

impl<K, V> Clone for SharedQuickLru<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedQuickLru<K, V>
where
    K: Hash + Eq,
{
    /// Creates a shared cache with the given capacity.
    pub fn new(capacity: usize) -> Result<Self> {
        QuickLru::new(capacity).map(Self::from_cache)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        QuickLru::from_config(config).map(Self::from_cache)
    }

    /// Wraps an existing cache, keeping its entries and listener.
    pub fn from_cache(cache: QuickLru<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // == Get ==
    /// Returns a clone of the value for `key`, promoting it like [`QuickLru::get`].
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().has(key)
    }

    // == Set ==
    pub fn set(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().set(key, value)
    }

    // == Remove ==
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    pub fn pop<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().pop(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    // == Introspection ==
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    // == With Lock ==
    /// Runs `f` with exclusive access to the cache.
    ///
    /// The lock is held for the whole closure; do not call back into this
    /// handle from inside it.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut QuickLru<K, V>) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }
}
