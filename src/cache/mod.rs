//! Cache Module
//!
//! Provides the two-generation QuickLru cache and its supporting types.

mod generation;
mod listener;
mod stats;
mod store;


// Re-export public types
pub use listener::EvictionListener;
pub use stats::CacheStats;
pub use store::QuickLru;

// == Public Constants ==
/// Capacity used when a configuration does not name one
pub const DEFAULT_CAPACITY: usize = 1000;
