//! Simulation Metrics
//!
//! Counters collected while a trace is replayed through a simulator, reported
//! through the [`CacheMetrics`] trait as a `BTreeMap` so every policy can be
//! printed and exported the same way.
//!
//! `BTreeMap` keeps the keys sorted, so two runs over the same trace produce
//! byte-identical reports.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lfu;

pub use lfu::LfuSimMetrics;

/// Counters shared by every simulated policy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of recorded accesses
    pub requests: u64,

    /// Accesses whose key was already resident
    pub cache_hits: u64,

    /// Keys admitted into the cache (one per miss)
    pub insertions: u64,

    /// Keys removed to make room for a new one
    pub evictions: u64,
}

impl CoreCacheMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an access that found its key resident.
    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records an access that had to admit its key.
    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
        self.insertions += 1;
    }

    /// Records a capacity eviction.
    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Returns the number of misses.
    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of accesses that hit, or 0.0 if nothing was recorded.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of accesses that missed, or 0.0 if nothing was recorded.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Evictions per access, or 0.0 if nothing was recorded.
    pub fn eviction_rate(&self) -> f64 {
        if self.requests > 0 {
            self.evictions as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a sorted map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());
        metrics.insert("eviction_rate".to_string(), self.eviction_rate());

        metrics
    }
}

/// Uniform metrics view over every simulated policy.
///
/// The simulation driver uses this to print and compare policies without
/// knowing their concrete types.
pub trait CacheMetrics {
    /// Returns all metrics as name/value pairs in sorted order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short policy name, e.g. `"LFU"`.
    fn algorithm_name(&self) -> &'static str;
}
