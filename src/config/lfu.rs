//! Configuration for the LFU simulator.
//!
//! # Examples
//!
//! ```
//! use lfu_sim::config::{LfuSimConfig, TieBreak};
//! use lfu_sim::LfuSimulator;
//! use core::num::NonZeroUsize;
//!
//! // Default policy: history survives eviction, oldest item loses ties
//! let config = LfuSimConfig {
//!     capacity: NonZeroUsize::new(100).unwrap(),
//!     tie_break: TieBreak::Oldest,
//!     retain_history: true,
//! };
//! let sim: LfuSimulator<String> = LfuSimulator::init(config, None);
//!
//! // Validating constructor for untrusted input
//! assert!(LfuSimConfig::new(0).is_err());
//! ```

use crate::error::ConfigError;
use core::fmt;
use core::num::NonZeroUsize;

/// How the heap orders items that share the minimum frequency.
///
/// Frequency alone does not give a total order, so eviction among equally
/// frequent items has to be decided by something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TieBreak {
    /// Order by `(frequency, created_at)`: among equally frequent items the
    /// one admitted earliest is evicted first. Fully deterministic.
    #[default]
    Oldest,
    /// Order by frequency only and repair the heap after a hit with the
    /// last-slot-up / found-slot-down sequence. The evicted item among ties
    /// is whatever the array layout produces, matching the classic
    /// simulator output bit for bit.
    HeapOrder,
}

impl TieBreak {
    /// Short name used in reports and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::Oldest => "oldest",
            TieBreak::HeapOrder => "heap-order",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for an [`LfuSimulator`](crate::LfuSimulator).
///
/// # Fields
///
/// - `capacity`: Maximum number of keys resident at once
/// - `tie_break`: Ordering among items with equal frequency
/// - `retain_history`: Keep a key's frequency after it is evicted, so a
///   returning key resumes at `f + 1` instead of `1`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LfuSimConfig {
    /// Maximum number of keys the cache can hold
    pub capacity: NonZeroUsize,
    /// Ordering among items that share a frequency
    pub tie_break: TieBreak,
    /// Whether evicted keys remember their frequency
    pub retain_history: bool,
}

impl LfuSimConfig {
    /// Builds a config with the default policy, rejecting a zero capacity.
    ///
    /// ```
    /// use lfu_sim::config::LfuSimConfig;
    /// use lfu_sim::ConfigError;
    ///
    /// assert_eq!(LfuSimConfig::new(0), Err(ConfigError::ZeroCapacity));
    /// assert_eq!(LfuSimConfig::new(8).unwrap().capacity.get(), 8);
    /// ```
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(ConfigError::ZeroCapacity)?;
        Ok(Self::with_capacity(capacity))
    }

    /// Builds a config with the default policy for an already validated capacity.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            tie_break: TieBreak::default(),
            retain_history: true,
        }
    }
}

impl fmt::Debug for LfuSimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuSimConfig")
            .field("capacity", &self.capacity)
            .field("tie_break", &self.tie_break)
            .field("retain_history", &self.retain_history)
            .finish()
    }
}
