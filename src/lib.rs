//! QuickLru - A bounded in-memory cache with approximate LRU eviction
//!
//! Entries are split between a recent and a stale generation. Filling the
//! recent generation demotes it to stale and drops the previous stale
//! generation in one step, giving O(1) amortized operations without
//! per-access bookkeeping.
//!
//! ```
//! use quick_lru::QuickLru;
//!
//! let mut cache = QuickLru::new(50).unwrap();
//! cache.set("test", "licia");
//! assert_eq!(cache.get("test"), Some(&"licia"));
//! assert!(cache.remove("test"));
//! assert_eq!(cache.get("test"), None);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod shared;

pub use cache::{CacheStats, EvictionListener, QuickLru};
pub use config::Config;
pub use error::{QuickLruError, Result};
pub use shared::SharedQuickLru;
