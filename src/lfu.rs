//! Least Frequently Used Simulator.
//!
//! Replays accesses against an LFU cache that holds only keys. Resident keys
//! live in a [`FrequencyHeap`] ordered by access frequency; on a miss at
//! capacity the root (least frequently used key) is evicted.
//!
//! Unlike textbook LFU, a key's frequency is remembered after eviction in a
//! [`FrequencyHistory`]. A key that comes back resumes at its old frequency
//! plus one, so keys that were popular in the past re-enter with a head start
//! over keys seen for the first time. Set
//! [`LfuSimConfig::retain_history`] to `false` for the textbook behaviour.
//!
//! ```text
//!   record_access(k)
//!        │
//!        ├── k resident ──▶ frequency += 1, history[k] = frequency ──▶ Hit
//!        │
//!        └── k absent ───▶ len == capacity ? evict heap root
//!                          frequency = history[k] + 1 (or 1)
//!                          push CacheItem(k, frequency, total_accesses) ──▶ Miss
//! ```

extern crate alloc;

use crate::config::{LfuSimConfig, TieBreak};
use crate::error::ConfigError;
use crate::heap::FrequencyHeap;
use crate::history::FrequencyHistory;
use crate::item::CacheItem;
use crate::metrics::{CacheMetrics, LfuSimMetrics};
use crate::DefaultHashBuilder;
use alloc::borrow::ToOwned;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use tracing::{debug, trace};

/// Outcome of a single recorded access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// The key was resident.
    Hit,
    /// The key had to be admitted, possibly evicting another.
    Miss,
}

impl Access {
    /// Returns `true` for [`Access::Hit`].
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, Access::Hit)
    }
}

/// A trace-driven LFU cache simulator.
///
/// # Examples
///
/// ```
/// use lfu_sim::{Access, LfuSimulator};
///
/// let mut sim: LfuSimulator<String> = LfuSimulator::new(1).unwrap();
///
/// assert_eq!(sim.record_access("a"), Access::Miss);
/// assert_eq!(sim.record_access("a"), Access::Hit);
/// assert_eq!(sim.record_access("a"), Access::Hit);
///
/// assert_eq!(sim.hits(), 2);
/// assert_eq!(sim.total_accesses(), 3);
/// assert_eq!(sim.frequency("a"), Some(3));
/// ```
///
/// A zero capacity is rejected:
///
/// ```
/// use lfu_sim::{ConfigError, LfuSimulator};
///
/// let sim: Result<LfuSimulator<u64>, _> = LfuSimulator::new(0);
/// assert_eq!(sim.unwrap_err(), ConfigError::ZeroCapacity);
/// ```
pub struct LfuSimulator<K, S = DefaultHashBuilder> {
    config: LfuSimConfig,
    heap: FrequencyHeap<K, S>,
    history: FrequencyHistory<K, S>,
    total_accesses: u64,
    hits: u64,
    metrics: LfuSimMetrics,
}

impl<K: Hash + Eq + Clone> LfuSimulator<K> {
    /// Creates a simulator with the default policy, rejecting a zero capacity.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let config = LfuSimConfig::new(capacity)?;
        Ok(Self::with_hasher(config, DefaultHashBuilder::default()))
    }
}

impl<K: Hash + Eq + Clone, S: BuildHasher + Clone + Default> LfuSimulator<K, S> {
    /// Creates a simulator from `config`, using `hash_builder` or the default hasher.
    pub fn init(config: LfuSimConfig, hash_builder: Option<S>) -> Self {
        Self::with_hasher(config, hash_builder.unwrap_or_default())
    }
}

impl<K: Hash + Eq + Clone, S: BuildHasher + Clone> LfuSimulator<K, S> {
    /// Creates a simulator from `config`, hashing keys with `hash_builder`.
    pub fn with_hasher(config: LfuSimConfig, hash_builder: S) -> Self {
        debug!(
            capacity = config.capacity.get(),
            tie_break = config.tie_break.as_str(),
            retain_history = config.retain_history,
            "created LFU simulator"
        );

        Self {
            heap: FrequencyHeap::with_hasher(
                config.capacity.get(),
                config.tie_break,
                hash_builder.clone(),
            ),
            history: FrequencyHistory::with_hasher(hash_builder),
            config,
            total_accesses: 0,
            hits: 0,
            metrics: LfuSimMetrics::new(),
        }
    }

    /// Records one access to `key` and classifies it.
    ///
    /// A resident key has its frequency bumped. An absent key is admitted,
    /// evicting the least frequently used resident key first if the cache is
    /// full; it enters at its historical frequency plus one, or at one if it
    /// has never been seen.
    pub fn record_access<Q>(&mut self, key: &Q) -> Access
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        self.total_accesses += 1;

        if let Some(index) = self.heap.find_index_by_key(key) {
            if let Some(frequency) = self.heap.increment(index) {
                self.history.set(key, frequency);
                self.hits += 1;
                self.metrics.record_frequency_hit(frequency);
                return Access::Hit;
            }
        }

        if self.heap.len() >= self.config.capacity.get() {
            if let Some(evicted) = self.heap.extract_min() {
                trace!(
                    frequency = evicted.frequency(),
                    created_at = evicted.created_at(),
                    "evicted least frequently used key"
                );
                if !self.config.retain_history {
                    self.history.forget::<K>(evicted.key());
                }
                self.metrics.record_eviction();
            }
        }

        let frequency = self.history.bump(key);
        self.heap
            .insert(CacheItem::new(key.to_owned(), frequency, self.total_accesses));
        self.metrics.record_admission(frequency);

        Access::Miss
    }

    /// Returns `true` if `key` is resident.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.heap.find_index_by_key(key).is_some()
    }

    /// Returns the frequency of a resident key.
    #[inline]
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.heap.find_by_key(key).map(CacheItem::frequency)
    }

    /// Returns the last frequency recorded for `key`, resident or not.
    #[inline]
    pub fn historical_frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.history.get(key)
    }

    /// Clears all state so the simulator can replay a new trial.
    pub fn reset(&mut self) {
        self.heap.clear();
        self.history.clear();
        self.total_accesses = 0;
        self.hits = 0;
        self.metrics = LfuSimMetrics::new();
        debug!(capacity = self.config.capacity.get(), "reset LFU simulator");
    }
}

impl<K, S> LfuSimulator<K, S> {
    /// Returns the number of recorded accesses.
    #[inline]
    pub fn total_accesses(&self) -> u64 {
        self.total_accesses
    }

    /// Returns the number of accesses that hit.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Returns the number of accesses that missed.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.total_accesses - self.hits
    }

    /// Returns `hits / total_accesses`, or 0.0 before any access.
    pub fn hit_ratio(&self) -> f64 {
        if self.total_accesses > 0 {
            self.hits as f64 / self.total_accesses as f64
        } else {
            0.0
        }
    }

    /// Returns the maximum number of resident keys.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the configured tie-break policy.
    #[inline]
    pub fn tie_break(&self) -> TieBreak {
        self.config.tie_break
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &LfuSimConfig {
        &self.config
    }

    /// Returns the number of resident keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if no key is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Read-only view of the resident heap.
    #[inline]
    pub fn heap(&self) -> &FrequencyHeap<K, S> {
        &self.heap
    }

    /// Returns the number of keys in the frequency history.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns the collected metrics.
    #[inline]
    pub fn metrics(&self) -> &LfuSimMetrics {
        &self.metrics
    }
}

impl<K, S> CacheMetrics for LfuSimulator<K, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, S> core::fmt::Debug for LfuSimulator<K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LfuSimulator")
            .field("config", &self.config)
            .field("len", &self.heap.len())
            .field("history_len", &self.history.len())
            .field("total_accesses", &self.total_accesses)
            .field("hits", &self.hits)
            .finish()
    }
}
