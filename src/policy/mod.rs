pub mod concurrent_lfu;
pub mod lfu;
#[cfg(feature = "lru")]
pub mod lru;
