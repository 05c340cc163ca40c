// ==============================================
// LFU CACHE LOGGING TESTS (integration)
// ==============================================
//
// Evictions are reported as tracing events after the cache lock is released.

use lfukit::policy::concurrent_lfu::ConcurrentLfuCache;
use tracing_test::traced_test;

#[traced_test]
#[test]
fn eviction_emits_debug_event_naming_the_key() {
    let cache = ConcurrentLfuCache::new(2);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.get(&"a");
    cache.put("c", 3);

    assert!(logs_contain("evicted least frequently used entry"));
    assert!(logs_contain(r#"key="b""#));
    assert!(!logs_contain(r#"key="a""#));
}

#[traced_test]
#[test]
fn construction_is_logged_with_capacity() {
    let _cache: ConcurrentLfuCache<u32, u32> = ConcurrentLfuCache::new(42);
    assert!(logs_contain("created LFU cache"));
    assert!(logs_contain("capacity=42"));
}

#[traced_test]
#[test]
fn no_eviction_no_event() {
    let cache = ConcurrentLfuCache::new(4);
    cache.put(1, ());
    cache.put(1, ());
    cache.get(&1);
    assert!(!logs_contain("evicted"));
}
