#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         LfuSimulator<K>                              │
//! │                                                                      │
//! │   record_access(k) ──▶ Hit / Miss      total_accesses, hits          │
//! │                                                                      │
//! │   ┌──────────────────────────────┐   ┌────────────────────────────┐  │
//! │   │ FrequencyHeap<K>             │   │ FrequencyHistory<K>        │  │
//! │   │  Vec<CacheItem<K>> (min-heap)│   │  k ──▶ last frequency      │  │
//! │   │  k ──▶ slot index            │   │  (survives eviction)       │  │
//! │   └──────────────────────────────┘   └────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use lfu_sim::{Access, LfuSimulator};
//!
//! let mut sim: LfuSimulator<String> = LfuSimulator::new(2).unwrap();
//! for key in ["a", "b", "a", "c", "a"] {
//!     sim.record_access(key);
//! }
//! assert_eq!(sim.hits(), 2);
//! assert_eq!(sim.total_accesses(), 5);
//! assert!(sim.contains("a"));
//! ```
//!
//! ## Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | lookup | O(1) expected (key → slot map) |
//! | hit | O(log n) |
//! | miss with eviction | O(log n) |
//!
//! ## Modules
//!
//! - [`item`]: The resident record
//! - [`heap`]: Indexed binary min-heap ordered by frequency
//! - [`history`]: Frequency history index
//! - [`lfu`]: The LFU simulator
//! - [`config`]: Simulator configuration
//! - [`metrics`]: Metrics collection and reporting
//! - [`error`]: Configuration errors

#![no_std]

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

#[cfg(feature = "hashbrown")]
pub(crate) use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
pub(crate) use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
pub(crate) use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
pub(crate) use std::collections::HashMap;

/// Resident cache record.
pub mod item;

/// Array-backed binary min-heap over cache items with key → slot indexing.
pub mod heap;

/// Persistent key → frequency record that outlives eviction.
pub mod history;

/// Simulator configuration.
pub mod config;

/// Configuration errors.
pub mod error;

/// Least Frequently Used (LFU) simulator.
///
/// Replays an access trace against a fixed-capacity LFU cache and counts hits.
pub mod lfu;

/// Simulation metrics.
///
/// Counters collected during replay, reported through a common trait.
pub mod metrics;

pub use config::{LfuSimConfig, TieBreak};
pub use error::ConfigError;
pub use heap::FrequencyHeap;
pub use history::FrequencyHistory;
pub use item::CacheItem;
pub use lfu::{Access, LfuSimulator};
pub use metrics::{CacheMetrics, CoreCacheMetrics, LfuSimMetrics};
