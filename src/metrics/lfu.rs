//! LFU Simulator Metrics
//!
//! Frequency-oriented counters on top of [`CoreCacheMetrics`].

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LFU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LfuSimMetrics {
    /// Core metrics common to all policies
    pub core: CoreCacheMetrics,

    /// Highest frequency any key has reached
    pub max_frequency: u64,

    /// Number of frequency increments applied to resident keys (one per hit)
    pub total_frequency_increments: u64,

    /// Misses on keys that had been evicted before and came back with their
    /// historical frequency
    pub readmissions: u64,
}

impl LfuSimMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit that raised a resident key to `frequency`.
    pub fn record_frequency_hit(&mut self, frequency: u64) {
        self.core.record_hit();
        self.total_frequency_increments += 1;
        self.max_frequency = self.max_frequency.max(frequency);
    }

    /// Records a miss that admitted a key at `frequency`.
    ///
    /// Any admission above one means the key is returning from eviction.
    pub fn record_admission(&mut self, frequency: u64) {
        self.core.record_miss();
        if frequency > 1 {
            self.readmissions += 1;
        }
        self.max_frequency = self.max_frequency.max(frequency);
    }

    /// Records a capacity eviction.
    #[inline]
    pub fn record_eviction(&mut self) {
        self.core.record_eviction();
    }

    /// Converts LFU metrics to a sorted map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();

        metrics.insert("max_frequency".to_string(), self.max_frequency as f64);
        metrics.insert(
            "total_frequency_increments".to_string(),
            self.total_frequency_increments as f64,
        );
        metrics.insert("readmissions".to_string(), self.readmissions as f64);

        if self.core.insertions > 0 {
            metrics.insert(
                "readmission_rate".to_string(),
                self.readmissions as f64 / self.core.insertions as f64,
            );
        }

        metrics
    }
}

impl CacheMetrics for LfuSimMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LFU"
    }
}
