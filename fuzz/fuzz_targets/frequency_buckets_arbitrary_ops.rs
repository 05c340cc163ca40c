#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::ds::FrequencyBuckets;

// Arbitrary sequences of insert, promote, remove, pop_min and clear,
// audited after every step.
fuzz_target!(|data: &[u8]| {
    let mut buckets: FrequencyBuckets<u32> = FrequencyBuckets::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 8;
        let key = u32::from(chunk[1] % 64);

        match op {
            0 | 1 => {
                let was_present = buckets.contains(&key);
                assert_eq!(buckets.insert(key), !was_present);
            }
            2 | 3 => {
                let before = buckets.frequency(&key);
                let after = buckets.promote(&key);
                assert_eq!(after, before.map(|f| f.saturating_add(1)));
            }
            4 => {
                let before = buckets.frequency(&key);
                assert_eq!(buckets.remove(&key), before);
                assert!(!buckets.contains(&key));
            }
            5 => {
                let expected = buckets.peek_min().map(|(k, f)| (*k, f));
                assert_eq!(buckets.pop_min(), expected);
            }
            6 => {
                if let Some((_, freq)) = buckets.peek_min() {
                    assert_eq!(Some(freq), buckets.min_freq());
                }
            }
            7 => buckets.clear(),
            _ => unreachable!(),
        }

        if let Err(err) = buckets.check_invariants() {
            panic!("invariant violated: {err}");
        }
        if buckets.is_empty() {
            assert_eq!(buckets.min_freq(), None);
            assert_eq!(buckets.peek_min(), None);
        } else {
            assert!(buckets.min_freq().is_some());
        }
    }
});
