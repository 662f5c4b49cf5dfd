//! Eviction Listener Module
//!
//! Hook for observing entries discarded by a rollover.

// == Eviction Listener ==
/// Receives the entries a rollover discards.
///
/// Called synchronously from inside the cache operation that triggered the
/// rollover, and only when the discarded generation is non-empty. Explicit
/// `remove`, `pop` and `clear` calls are not reported.
pub trait EvictionListener<K, V>: Send {
    /// Takes ownership of every evicted key/value pair. Order is unspecified.
    fn on_evict(&mut self, evicted: Vec<(K, V)>);
}

impl<K, V, F> EvictionListener<K, V> for F
where
    F: FnMut(Vec<(K, V)>) + Send,
{
    fn on_evict(&mut self, evicted: Vec<(K, V)>) {
        (*self)(evicted)
    }
}
