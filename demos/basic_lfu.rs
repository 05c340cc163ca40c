use lfukit::builder::CacheBuilder;

fn main() {
    let cache = CacheBuilder::new().capacity(2).build_lfu::<&str, String>();

    cache.put("a", "alpha".to_string());
    cache.put("b", "beta".to_string());

    cache.get(&"a");
    let evicted = cache.put("c", "gamma".to_string());

    println!("evicted: {evicted:?}");
    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));
    println!("frequencies: {:?}", cache.snapshot_buckets());
    println!(
        "hits={} misses={} evictions={} insertions={}",
        cache.hits(),
        cache.misses(),
        cache.evictions(),
        cache.insertions()
    );
}

// Expected output:
// evicted: Some("b")
// contains a? true
// contains b? false
// frequencies: {1: ["c"], 2: ["a"]}
// hits=1 misses=0 evictions=1 insertions=3
//
// Explanation: capacity=2; "a" is read before "c" arrives, so "b" is the
// only key left at frequency 1 and is evicted.
