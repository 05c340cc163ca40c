//! Frequency buckets for O(1) LFU tracking.
//!
//! Combines the *frequency tracker* (key → access count) and the *frequency
//! index* (access count → FIFO list of keys) into one structure, so the two can
//! never disagree. Insert, promote, remove and eviction are all O(1).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        FrequencyBuckets<K> Layout                           │
//! │                                                                             │
//! │   ┌─────────────────────────────┐   ┌─────────────────────────────────┐     │
//! │   │  index: FxHashMap<K, SlotId>│   │  nodes: SlotArena<Node<K>>      │     │
//! │   │                             │   │                                 │     │
//! │   │  "a"  ──► id_0 ─────────────┼───┼──► id_0 │ freq:2, prev/next     │     │
//! │   │  "b"  ──► id_1 ─────────────┼───┼──► id_1 │ freq:1, prev/next     │     │
//! │   │  "c"  ──► id_2 ─────────────┼───┼──► id_2 │ freq:1, prev/next     │     │
//! │   └─────────────────────────────┘   └─────────────────────────────────┘     │
//! │                                                                             │
//! │   buckets: FxHashMap<u64, Bucket>     min_freq = 1                          │
//! │                                                                             │
//! │     freq=1: head ──► [id_1] ◄──► [id_2] ◄── tail                            │
//! │                      oldest       newest                                    │
//! │                      (evict first)                                          │
//! │     freq=2: head ──► [id_0] ◄── tail                                        │
//! │                                                                             │
//! │     bucket links: 1 ──next──► 2,  2 ──prev──► 1   (ascending)               │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Promote Flow
//! ────────────
//!
//!   promote("b"):
//!     1. Look up id_1 in index
//!     2. Unlink id_1 from the freq=1 list
//!     3. freq=1 empty? → unlink bucket, advance min_freq
//!     4. Create freq=2 bucket between its neighbours if missing
//!     5. Append id_1 to the tail of freq=2
//!
//! Eviction Flow (pop_min)
//! ───────────────────────
//!
//!   pop_min():
//!     1. min_freq selects the lowest bucket
//!     2. Unlink its head (the key that joined that bucket first)
//!     3. Drop the bucket if now empty, advance min_freq
//!     4. Free the node, drop the key from index
//! ```
//!
//! ## Operations
//!
//! | Operation         | Time   | Notes                                   |
//! |-------------------|--------|-----------------------------------------|
//! | `insert`          | O(1)   | New key starts at freq=1, tail of list  |
//! | `promote`         | O(1)   | freq+1, moved to tail of the next list  |
//! | `remove`          | O(1)   | Explicit delete                         |
//! | `pop_min`         | O(1)   | Evicts head of the min-frequency bucket |
//! | `frequency`       | O(1)   |                                         |
//! | `iter_buckets`    | O(B)   | Ascending frequency, B = live buckets   |
//! | `check_invariants`| O(n)   | Full structural audit                   |
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//! freq.insert("a");
//! freq.insert("b");
//! freq.insert("c");
//!
//! freq.promote(&"a"); // "a" now at 2
//!
//! // Lowest frequency first, oldest first among ties
//! assert_eq!(freq.pop_min(), Some(("b", 1)));
//! assert_eq!(freq.pop_min(), Some(("c", 1)));
//! assert_eq!(freq.pop_min(), Some(("a", 2)));
//! assert_eq!(freq.pop_min(), None);
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe. [`ConcurrentLfuCache`](crate::policy::concurrent_lfu::ConcurrentLfuCache)
//! guards it together with the value store behind one mutex.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// List node. Link pointers come first since every promote and eviction
/// touches them.
#[derive(Debug)]
struct Node<K> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    key: K,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
    prev: Option<u64>,
    next: Option<u64>,
}

/// O(1) LFU metadata tracker with FIFO tie-breaking within a frequency.
///
/// Keys are grouped into one bucket per distinct frequency. Inside a bucket,
/// keys are kept in the order they joined it: the head is the oldest member
/// and the next eviction victim, the tail the newest.
///
/// # Example
///
/// ```
/// use lfukit::ds::FrequencyBuckets;
///
/// let mut freq = FrequencyBuckets::new();
/// freq.insert("a");
/// freq.insert("b");
/// assert_eq!(freq.promote(&"a"), Some(2));
///
/// assert_eq!(freq.frequency(&"a"), Some(2));
/// assert_eq!(freq.frequency(&"b"), Some(1));
/// assert_eq!(freq.min_freq(), Some(1));
/// assert_eq!(freq.peek_min(), Some((&"b", 1)));
/// ```
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    nodes: SlotArena<Node<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    // 0 while empty
    min_freq: u64,
}

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            nodes: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Creates an empty tracker with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no key is tracked.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the number of non-empty frequency buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current frequency for `key`, if tracked.
    ///
    /// ```
    /// use lfukit::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("key");
    /// freq.promote(&"key");
    ///
    /// assert_eq!(freq.frequency(&"key"), Some(2));
    /// assert_eq!(freq.frequency(&"missing"), None);
    /// ```
    #[inline]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.nodes.get(id).map(|node| node.freq)
    }

    /// Returns the lowest frequency currently in use.
    pub fn min_freq(&self) -> Option<u64> {
        (self.min_freq != 0).then_some(self.min_freq)
    }

    /// Peeks the eviction candidate `(key, freq)` without removing it.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let bucket = self.buckets.get(&self.min_freq()?)?;
        let node = self.nodes.get(bucket.head?)?;
        Some((&node.key, node.freq))
    }

    /// Starts tracking `key` at frequency 1, appended after every key already
    /// at frequency 1.
    ///
    /// Returns `false` and leaves the structure untouched if `key` is already
    /// tracked.
    ///
    /// ```
    /// use lfukit::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// assert!(freq.insert("a"));
    /// assert!(!freq.insert("a"));
    /// assert_eq!(freq.frequency(&"a"), Some(1));
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = self.nodes.insert(Node {
            prev: None,
            next: None,
            freq: 1,
            key: key.clone(),
        });
        self.index.insert(key, id);

        if !self.buckets.contains_key(&1) {
            let next = self.min_freq();
            self.link_bucket(1, None, next);
        }
        self.list_push_back(1, id);
        true
    }

    /// Moves `key` from its bucket to the tail of the next-higher bucket and
    /// returns the new frequency.
    ///
    /// Returns `None` if `key` is not tracked. A key already at `u64::MAX`
    /// keeps its frequency and is moved to the tail of its bucket.
    ///
    /// ```
    /// use lfukit::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("key");
    ///
    /// assert_eq!(freq.promote(&"key"), Some(2));
    /// assert_eq!(freq.promote(&"key"), Some(3));
    /// assert_eq!(freq.promote(&"missing"), None);
    /// ```
    pub fn promote(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let current = self.nodes.get(id)?.freq;

        if current == u64::MAX {
            self.list_unlink(current, id)?;
            self.list_push_back(current, id);
            return Some(current);
        }
        let next_freq = current + 1;

        let (prev, next) = {
            let bucket = self.buckets.get(&current)?;
            (bucket.prev, bucket.next)
        };

        self.list_unlink(current, id)?;
        let emptied = self.bucket_is_empty(current);
        if emptied {
            self.unlink_bucket(current);
        }

        if !self.buckets.contains_key(&next_freq) {
            let before = if emptied { prev } else { Some(current) };
            self.link_bucket(next_freq, before, next);
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.freq = next_freq;
        }
        self.list_push_back(next_freq, id);
        Some(next_freq)
    }

    /// Stops tracking `key`, returning the frequency it had.
    pub fn remove(&mut self, key: &K) -> Option<u64> {
        let id = self.index.remove(key)?;
        let freq = self.nodes.get(id)?.freq;
        self.detach(freq, id)?;
        self.nodes.remove(id).map(|node| node.freq)
    }

    /// Removes and returns the eviction candidate `(key, freq)`: the oldest
    /// member of the lowest-frequency bucket.
    ///
    /// ```
    /// use lfukit::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("a");
    /// freq.insert("b");
    /// freq.promote(&"a");
    /// freq.promote(&"b");
    ///
    /// // both at 2; "a" reached it first
    /// assert_eq!(freq.pop_min(), Some(("a", 2)));
    /// ```
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        let freq = self.min_freq()?;
        let id = self.buckets.get(&freq)?.head?;
        self.detach(freq, id)?;

        let node = self.nodes.remove(id)?;
        self.index.remove(&node.key);
        Some((node.key, node.freq))
    }

    /// Drops every key and bucket.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    /// Iterates the keys of one bucket, oldest first.
    pub fn iter_bucket(&self, freq: u64) -> BucketIter<'_, K> {
        BucketIter {
            buckets: self,
            current: self.buckets.get(&freq).and_then(|bucket| bucket.head),
        }
    }

    /// Iterates the frequencies in use, ascending.
    pub fn iter_frequencies(&self) -> FrequencyIter<'_, K> {
        FrequencyIter {
            buckets: self,
            current: self.min_freq(),
        }
    }

    /// Iterates `(freq, keys)` pairs in ascending frequency, keys oldest first.
    ///
    /// ```
    /// use lfukit::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("a");
    /// freq.insert("b");
    /// freq.promote(&"a");
    ///
    /// let layout: Vec<(u64, Vec<&str>)> = freq
    ///     .iter_buckets()
    ///     .map(|(f, keys)| (f, keys.copied().collect()))
    ///     .collect();
    /// assert_eq!(layout, vec![(1, vec!["b"]), (2, vec!["a"])]);
    /// ```
    pub fn iter_buckets(&self) -> impl Iterator<Item = (u64, BucketIter<'_, K>)> {
        self.iter_frequencies()
            .map(move |freq| (freq, self.iter_bucket(freq)))
    }

    /// Iterates every tracked `(key, freq)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.nodes.iter().map(|(_, node)| (&node.key, node.freq))
    }

    /// Audits the whole structure.
    ///
    /// Checks that the index and the lists agree, that every bucket is
    /// non-empty and holds only keys of its frequency, that bucket links are
    /// symmetric and ascending, and that `min_freq` names the lowest bucket.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.nodes.len() != self.index.len() {
            return Err(InvariantError::LinkedCountMismatch {
                linked: self.nodes.len(),
                tracked: self.index.len(),
            });
        }

        let lowest = self.buckets.keys().copied().min();
        if self.min_freq() != lowest {
            return Err(InvariantError::StaleMinFrequency {
                recorded: self.min_freq(),
                actual: lowest,
            });
        }

        let mut linked = 0usize;
        let mut visited = 0usize;
        let mut expected_prev = None;
        let mut cursor = self.min_freq();

        while let Some(freq) = cursor {
            let bucket = self
                .buckets
                .get(&freq)
                .ok_or(InvariantError::BrokenBucketLinks { freq })?;
            if bucket.len == 0 || bucket.head.is_none() {
                return Err(InvariantError::EmptyBucket { freq });
            }
            if bucket.prev != expected_prev || bucket.next.is_some_and(|next| next <= freq) {
                return Err(InvariantError::BrokenBucketLinks { freq });
            }

            let mut current = bucket.head;
            let mut last = None;
            let mut count = 0usize;
            while let Some(id) = current {
                let node = self
                    .nodes
                    .get(id)
                    .ok_or(InvariantError::BrokenListLinks { freq })?;
                if node.freq != freq {
                    return Err(InvariantError::MisplacedKey {
                        tracked: node.freq,
                        bucket: freq,
                    });
                }
                if node.prev != last || self.index.get(&node.key) != Some(&id) {
                    return Err(InvariantError::BrokenListLinks { freq });
                }
                count += 1;
                if count > self.nodes.len() {
                    return Err(InvariantError::BrokenListLinks { freq });
                }
                last = Some(id);
                current = node.next;
            }
            if bucket.tail != last || bucket.len != count {
                return Err(InvariantError::BrokenListLinks { freq });
            }

            linked += count;
            visited += 1;
            expected_prev = Some(freq);
            cursor = bucket.next;
        }

        if visited != self.buckets.len() {
            return Err(InvariantError::BrokenBucketLinks {
                freq: self.min_freq,
            });
        }
        if linked != self.index.len() {
            return Err(InvariantError::LinkedCountMismatch {
                linked,
                tracked: self.index.len(),
            });
        }
        Ok(())
    }

    fn bucket_is_empty(&self, freq: u64) -> bool {
        self.buckets
            .get(&freq)
            .is_none_or(|bucket| bucket.head.is_none())
    }

    /// Unlinks `id` from its list and drops the bucket if that emptied it.
    fn detach(&mut self, freq: u64, id: SlotId) -> Option<()> {
        self.list_unlink(freq, id)?;
        if self.bucket_is_empty(freq) {
            self.unlink_bucket(freq);
        }
        Some(())
    }

    fn link_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                prev,
                next,
                ..Bucket::default()
            },
        );

        if let Some(prev) = prev
            && let Some(bucket) = self.buckets.get_mut(&prev)
        {
            bucket.next = Some(freq);
        }
        if let Some(next) = next
            && let Some(bucket) = self.buckets.get_mut(&next)
        {
            bucket.prev = Some(freq);
        }
        if prev.is_none() {
            self.min_freq = freq;
        }
    }

    fn unlink_bucket(&mut self, freq: u64) {
        let Some(bucket) = self.buckets.remove(&freq) else {
            return;
        };

        if let Some(prev) = bucket.prev
            && let Some(prev_bucket) = self.buckets.get_mut(&prev)
        {
            prev_bucket.next = bucket.next;
        }
        if let Some(next) = bucket.next
            && let Some(next_bucket) = self.buckets.get_mut(&next)
        {
            next_bucket.prev = bucket.prev;
        }
        if self.min_freq == freq {
            self.min_freq = bucket.next.unwrap_or(0);
        }
    }

    fn list_push_back(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let bucket = self.buckets.get_mut(&freq)?;
        let old_tail = bucket.tail;

        let node = self.nodes.get_mut(id)?;
        node.prev = old_tail;
        node.next = None;

        match old_tail {
            Some(tail) => {
                if let Some(tail_node) = self.nodes.get_mut(tail) {
                    tail_node.next = Some(id);
                }
            },
            None => bucket.head = Some(id),
        }
        bucket.tail = Some(id);
        bucket.len += 1;
        Some(())
    }

    fn list_unlink(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.nodes.get(id)?;
            (node.prev, node.next)
        };

        let bucket = self.buckets.get_mut(&freq)?;
        match prev {
            Some(prev) => {
                if let Some(node) = self.nodes.get_mut(prev) {
                    node.next = next;
                }
            },
            None => bucket.head = next,
        }
        match next {
            Some(next) => {
                if let Some(node) = self.nodes.get_mut(next) {
                    node.prev = prev;
                }
            },
            None => bucket.tail = prev,
        }
        bucket.len = bucket.len.saturating_sub(1);

        if let Some(node) = self.nodes.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the keys of one frequency bucket, oldest first.
///
/// Created by [`FrequencyBuckets::iter_bucket`].
pub struct BucketIter<'a, K> {
    buckets: &'a FrequencyBuckets<K>,
    current: Option<SlotId>,
}

impl<'a, K> Iterator for BucketIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.buckets.nodes.get(self.current?)?;
        self.current = node.next;
        Some(&node.key)
    }
}

/// Iterator over the frequencies in use, ascending.
///
/// Created by [`FrequencyBuckets::iter_frequencies`].
pub struct FrequencyIter<'a, K> {
    buckets: &'a FrequencyBuckets<K>,
    current: Option<u64>,
}

impl<K> Iterator for FrequencyIter<'_, K> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let freq = self.current?;
        self.current = self.buckets.buckets.get(&freq).and_then(|b| b.next);
        Some(freq)
    }
}
