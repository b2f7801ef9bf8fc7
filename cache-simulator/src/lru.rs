//! LRU baseline for comparison runs
//!
//! [`LruSimulator`] replays the same traces as the LFU engine through a
//! bounded recency list from the `lru` crate. A hit moves the key to the
//! most recently used end; a miss at capacity evicts the least recently
//! used key before admitting the new one.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;

use lfu_sim::{Access, CacheMetrics, CoreCacheMetrics};
use lru::LruCache;
use tracing::trace;

/// Trace-driven LRU simulator
pub struct LruSimulator<K: Hash + Eq> {
    cache: LruCache<K, ()>,
    total_accesses: u64,
    hits: u64,
    metrics: CoreCacheMetrics,
}

impl<K: Hash + Eq> LruSimulator<K> {
    /// Creates an empty simulator holding at most `capacity` keys.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            cache: LruCache::new(capacity),
            total_accesses: 0,
            hits: 0,
            metrics: CoreCacheMetrics::new(),
        }
    }

    /// Records one access to `key` and classifies it.
    pub fn record_access<Q>(&mut self, key: &Q) -> Access
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        self.total_accesses += 1;

        if self.cache.get(key).is_some() {
            self.hits += 1;
            self.metrics.record_hit();
            return Access::Hit;
        }

        // push only hands back an entry here when it displaced the LRU key
        if self.cache.push(key.to_owned(), ()).is_some() {
            trace!("evicted least recently used key");
            self.metrics.record_eviction();
        }
        self.metrics.record_miss();

        Access::Miss
    }

    /// Returns `true` if `key` is resident, without touching its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.cache.contains(key)
    }

    /// Total accesses recorded.
    pub fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    /// Accesses that found their key resident.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Hit ratio, `0.0` before any access.
    pub fn hit_ratio(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_accesses as f64
        }
    }

    /// Maximum number of resident keys.
    pub fn cap(&self) -> NonZeroUsize {
        self.cache.cap()
    }

    /// Number of resident keys.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing is resident.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Counters collected so far.
    pub fn metrics(&self) -> &CoreCacheMetrics {
        &self.metrics
    }
}

impl<K: Hash + Eq> CacheMetrics for LruSimulator<K> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

impl<K: Hash + Eq> fmt::Debug for LruSimulator<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSimulator")
            .field("capacity", &self.cache.cap())
            .field("len", &self.cache.len())
            .field("total_accesses", &self.total_accesses)
            .field("hits", &self.hits)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_lru(cap: usize) -> LruSimulator<String> {
        LruSimulator::new(NonZeroUsize::new(cap).unwrap())
    }

    #[test]
    fn test_lru_evicts_least_recent() {
        let mut sim = make_lru(2);
        sim.record_access("a");
        sim.record_access("b");
        // refresh a, so b is now the least recent
        assert_eq!(sim.record_access("a"), Access::Hit);
        assert_eq!(sim.record_access("c"), Access::Miss);

        assert!(sim.contains("a"));
        assert!(!sim.contains("b"));
        assert!(sim.contains("c"));
        assert_eq!(sim.metrics().evictions, 1);
    }

    #[test]
    fn test_lru_counts_every_access() {
        let mut sim = make_lru(1);
        for key in ["a", "a", "a"] {
            sim.record_access(key);
        }

        assert_eq!(sim.total_accesses(), 3);
        assert_eq!(sim.hits(), 2);
        assert!((sim.hit_ratio() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lru_empty_ratio() {
        let sim = make_lru(10);
        assert_eq!(sim.hit_ratio(), 0.0);
        assert!(sim.is_empty());
        assert_eq!(sim.algorithm_name(), "LRU");
    }

    #[test]
    fn test_lru_frequency_blind() {
        // LFU would keep "hot"; LRU drops it once two newer keys arrive
        let mut sim = make_lru(2);
        for key in ["hot", "hot", "hot", "x", "y", "hot"] {
            sim.record_access(key);
        }
        assert_eq!(sim.hits(), 2);
        assert_eq!(sim.len(), 2);
        assert!(!sim.contains("x"));
    }
}
