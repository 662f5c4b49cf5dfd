//! Integration Tests for the Public Cache API
//!
//! Exercises the crate the way a hosting application would: building caches
//! from configuration, sharing them across threads and observing evictions.

use std::sync::{Arc, Once};
use std::thread;

use parking_lot::Mutex;
use quick_lru::{CacheStats, Config, QuickLru, QuickLruError, SharedQuickLru};
use tracing_subscriber::EnvFilter;

// == Helper Functions ==

static TRACING: Once = Once::new();

/// Routes cache logs through the test harness. Set RUST_LOG=quick_lru=trace to see them.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| "quick_lru=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

// == Construction Tests ==

#[test]
fn test_zero_capacity_fails_loudly() {
    init_tracing();

    let err = QuickLru::<String, String>::new(0).unwrap_err();
    assert_eq!(err, QuickLruError::InvalidCapacity(0));
    assert!(SharedQuickLru::<String, String>::from_config(&Config::new(0)).is_err());
}

#[test]
fn test_build_from_json_config() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_json(r#"{"capacity": 2, "name": "sessions"}"#)?;
    let mut cache: QuickLru<&str, u32> = QuickLru::from_config(&config)?;
    assert_eq!(cache.capacity(), 2);
    assert_eq!(cache.name(), "sessions");

    cache.set("a", 1);
    assert_eq!(cache.get("a"), Some(&1));
    Ok(())
}

#[test]
fn test_bad_json_config_is_rejected() {
    init_tracing();

    assert!(matches!(
        Config::from_json(r#"{"capacity": -5}"#),
        Err(QuickLruError::InvalidConfig(_))
    ));
    assert!(matches!(
        Config::from_json("capacity = 5"),
        Err(QuickLruError::InvalidConfig(_))
    ));
    assert_eq!(
        Config::from_json(r#"{"capacity": 0}"#),
        Err(QuickLruError::InvalidCapacity(0))
    );
}

// == Scenario Tests ==

#[test]
fn test_basic_scenario() -> anyhow::Result<()> {
    init_tracing();

    let mut cache = QuickLru::new(50)?;
    cache.set("test".to_string(), "licia".to_string());
    cache.set("test1".to_string(), "licia1".to_string());
    cache.set("test2".to_string(), "licia2".to_string());

    assert_eq!(cache.get("test").map(String::as_str), Some("licia"));
    cache.remove("test");
    assert_eq!(cache.get("test"), None);

    cache.clear();
    assert_eq!(cache.get("test1"), None);
    assert_eq!(cache.get("test2"), None);
    assert!(!cache.has("test1"));
    assert_eq!(cache.len(), 0);
    Ok(())
}

#[test]
fn test_generation_discard_scenario() -> anyhow::Result<()> {
    init_tracing();

    let mut cache = QuickLru::new(2)?;
    cache.set('a', 1);
    cache.set('b', 2);
    cache.set('c', 3);
    assert_eq!(cache.get(&'a'), Some(&1));
    cache.set('d', 4);

    assert_eq!(cache.get(&'b'), None);
    assert_eq!(cache.get(&'a'), Some(&1));
    assert_eq!(cache.get(&'c'), Some(&3));
    assert_eq!(cache.get(&'d'), Some(&4));
    Ok(())
}

#[test]
fn test_unread_keys_age_out() -> anyhow::Result<()> {
    init_tracing();

    let capacity = 10;
    let mut cache = QuickLru::new(capacity)?;
    for i in 0..(3 * capacity) {
        cache.set(i, i * 10);
    }

    // the oldest generation is gone, the two newest survive
    for i in 0..capacity {
        assert!(!cache.has(&i), "key {} should be evicted", i);
    }
    for i in capacity..(3 * capacity) {
        assert_eq!(cache.peek(&i), Some(&(i * 10)));
    }
    assert_eq!(cache.len(), 2 * capacity);
    Ok(())
}

// == Eviction Listener Tests ==

#[test]
fn test_listener_receives_discarded_generation() -> anyhow::Result<()> {
    init_tracing();

    let evicted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);
    let mut cache = QuickLru::<u32, String>::new(3)?
        .with_eviction_listener(move |batch: Vec<(u32, String)>| sink.lock().push(batch));

    for i in 0..9u32 {
        cache.set(i, format!("value{}", i));
    }
    // third rollover happens on the tenth insert
    assert_eq!(evicted.lock().len(), 1);
    cache.set(9, "value9".to_string());

    let batches = evicted.lock();
    assert_eq!(batches.len(), 2);
    let mut first: Vec<u32> = batches[0].iter().map(|(k, _)| *k).collect();
    first.sort_unstable();
    assert_eq!(first, vec![0, 1, 2]);

    let stats: CacheStats = cache.stats();
    assert_eq!(stats.rollovers, 3);
    assert_eq!(stats.evictions, 6);
    Ok(())
}

// == Shared Cache Tests ==

#[test]
fn test_shared_cache_across_threads() -> anyhow::Result<()> {
    init_tracing();

    let cache: SharedQuickLru<String, usize> =
        SharedQuickLru::from_config(&Config::new(32).with_name("shared"))?;

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let key = format!("w{}-{}", worker, i % 40);
                    cache.set(key.clone(), i);
                    if let Some(value) = cache.get(&key) {
                        assert!(value < 200);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 8 * 200);
    assert!(cache.len() <= 2 * cache.capacity());
    Ok(())
}

#[test]
fn test_shared_cache_wraps_existing_cache() -> anyhow::Result<()> {
    init_tracing();

    let mut lru = QuickLru::new(4)?;
    lru.set("warm".to_string(), 1u8);
    let shared = SharedQuickLru::from_cache(lru);

    assert_eq!(shared.get("warm"), Some(1));
    let swapped = shared.with_lock(|cache| {
        let old = cache.pop("warm");
        cache.set("hot".to_string(), 2);
        old
    });
    assert_eq!(swapped, Some(1));
    assert!(shared.has("hot"));
    assert!(!shared.has("warm"));
    Ok(())
}
