#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::policy::lfu::LfuCache;

// Arbitrary get/put/remove traffic against a small cache. The first byte
// picks the capacity so the zero and one cases are reached.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 9);
    let mut cache: LfuCache<u8, u8> = LfuCache::new(capacity);
    let mut gets = 0u64;
    let mut puts = 0u64;

    for chunk in ops.chunks_exact(2) {
        let key = chunk[1] % 32;
        match chunk[0] % 4 {
            0 | 1 => {
                let full = cache.len() == capacity;
                let present = cache.contains(&key);
                let expected = if full && !present {
                    cache.peek_lfu().map(|(k, _, _)| *k)
                } else {
                    None
                };
                assert_eq!(cache.put(key, chunk[0]), expected);
                puts += 1;
            }
            2 => {
                let before = cache.frequency(&key);
                let hit = cache.get(&key).is_some();
                assert_eq!(hit, before.is_some());
                gets += 1;
            }
            3 => {
                cache.remove(&key);
                assert!(!cache.contains(&key));
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert_eq!(cache.hits() + cache.misses(), gets);
        assert_eq!(cache.insertions(), puts);
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated: {err}");
        }
    }
});
