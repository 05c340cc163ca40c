// ==============================================
// CROSS-POLICY SERVICE TESTS (integration)
// ==============================================
//
// Behavior every CacheService implementation must share, written once and
// run against each policy the builder can produce.

use std::sync::Arc;

use lfukit::builder::{CacheBuilder, CachePolicy};
use lfukit::traits::CacheService;

fn policies() -> Vec<CachePolicy> {
    vec![
        CachePolicy::Lfu,
        #[cfg(feature = "lru")]
        CachePolicy::Lru,
    ]
}

fn service(policy: CachePolicy, capacity: usize) -> Arc<dyn CacheService<u64, String> + Send + Sync> {
    match CacheBuilder::new().capacity(capacity).try_build(policy) {
        Ok(service) => service,
        Err(err) => panic!("{policy:?}: {err}"),
    }
}

#[test]
fn get_returns_what_put_stored() {
    for policy in policies() {
        let cache = service(policy, 8);
        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());

        assert_eq!(cache.get(&1).as_deref().map(String::as_str), Some("one"), "{policy:?}");
        assert_eq!(cache.get(&3), None, "{policy:?}");
        assert_eq!(cache.hits(), 1, "{policy:?}");
        assert_eq!(cache.misses(), 1, "{policy:?}");
        assert_eq!(cache.insertions(), 2, "{policy:?}");
    }
}

#[test]
fn avg_insertion_time_is_undefined_without_puts() {
    for policy in policies() {
        let cache = service(policy, 4);
        cache.get(&1);
        assert_eq!(cache.avg_insertion_time(), None, "{policy:?}");
        assert_eq!(cache.metrics_snapshot().avg_insertion_time(), None, "{policy:?}");
    }
}

#[test]
fn overwrite_replaces_value_without_growing() {
    for policy in policies() {
        let cache = service(policy, 4);
        cache.put(7, "old".to_string());
        cache.put(7, "new".to_string());

        assert_eq!(cache.get(&7).as_deref().map(String::as_str), Some("new"), "{policy:?}");
        assert_eq!(cache.snapshot_store().len(), 1, "{policy:?}");
        assert_eq!(cache.evictions(), 0, "{policy:?}");
    }
}

#[test]
fn metrics_snapshot_agrees_with_accessors() {
    for policy in policies() {
        let cache = service(policy, 4);
        cache.put(1, "a".to_string());
        cache.get(&1);
        cache.get(&2);

        let snapshot = cache.metrics_snapshot();
        assert_eq!(snapshot.hits, cache.hits(), "{policy:?}");
        assert_eq!(snapshot.misses, cache.misses(), "{policy:?}");
        assert_eq!(snapshot.insertions, cache.insertions(), "{policy:?}");
        assert_eq!(snapshot.capacity, cache.capacity(), "{policy:?}");
        assert_eq!(snapshot.hit_rate(), Some(0.5), "{policy:?}");
    }
}

#[test]
fn zero_capacity_is_rejected_for_every_policy() {
    for policy in policies() {
        assert!(
            CacheBuilder::new()
                .capacity(0)
                .try_build::<u64, String>(policy)
                .is_err(),
            "{policy:?}"
        );
    }
}
