// Data models for cache simulation

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use lfu_sim::TieBreak;
use serde::Serialize;
use thiserror::Error;

use crate::input::Trace;

/// Cache policies supported for simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Policy {
    /// Least Frequently Used, with persistent frequency history
    Lfu,
    /// Least Recently Used baseline
    Lru,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Lfu => "LFU",
            Policy::Lru => "LRU",
        }
    }

    /// Get all available policies
    pub fn all() -> Vec<Policy> {
        vec![Policy::Lfu, Policy::Lru]
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lfu" => Ok(Policy::Lfu),
            "lru" => Ok(Policy::Lru),
            other => Err(format!("unknown policy '{other}' (expected lfu or lru)")),
        }
    }
}

/// Invalid capacity sweep ranges
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    #[error("sweep step must be positive")]
    ZeroStep,
    #[error("sweep start must be a positive capacity")]
    ZeroStart,
    #[error("sweep range {start}..{end} contains no capacities")]
    EmptyRange { start: usize, end: usize },
}

/// Capacities to simulate: `start, start + step, ...` while below `end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: 100,
            end: 1000,
            step: 100,
        }
    }
}

impl SweepConfig {
    /// Expands the range into validated capacities.
    pub fn capacities(&self) -> Result<Vec<NonZeroUsize>, SweepError> {
        if self.step == 0 {
            return Err(SweepError::ZeroStep);
        }
        let first = NonZeroUsize::new(self.start).ok_or(SweepError::ZeroStart)?;
        if self.start >= self.end {
            return Err(SweepError::EmptyRange {
                start: self.start,
                end: self.end,
            });
        }

        let rest = (self.start..self.end)
            .step_by(self.step)
            .skip(1)
            .filter_map(NonZeroUsize::new);
        Ok(std::iter::once(first).chain(rest).collect())
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Trace to replay
    pub trace: Trace,
    /// Policies to simulate
    pub policies: Vec<Policy>,
    /// Capacities to simulate
    pub sweep: SweepConfig,
    /// Tie-break among equally frequent LFU keys
    pub tie_break: TieBreak,
    /// Whether LFU remembers frequencies of evicted keys
    pub retain_history: bool,
    /// Worker threads; 1 runs every trial on the calling thread
    pub threads: usize,
}

impl SimulationConfig {
    /// Defaults for everything but the trace.
    pub fn new(trace: Trace) -> Self {
        Self {
            trace,
            policies: Policy::all(),
            sweep: SweepConfig::default(),
            tie_break: TieBreak::default(),
            retain_history: true,
            threads: 1,
        }
    }
}

/// Outcome of replaying the trace through one policy at one capacity
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    pub policy: Policy,
    pub capacity: usize,
    pub hits: u64,
    pub total_accesses: u64,
    pub evictions: u64,
    pub hit_ratio: f64,
    /// Wall time spent replaying
    pub duration: Duration,
}

/// Results of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// One entry per policy and capacity, sorted by (policy, capacity)
    pub trials: Vec<TrialResult>,
    /// Total number of requests in the trace
    pub total_requests: usize,
    /// Number of distinct keys in the trace
    pub unique_keys: usize,
    /// Duration of the whole sweep
    pub duration: Duration,
}

impl SimulationResult {
    /// Trials for a single policy, in capacity order.
    pub fn trials_for(&self, policy: Policy) -> impl Iterator<Item = &TrialResult> {
        self.trials.iter().filter(move |t| t.policy == policy)
    }
}

/// CSV export row for simulation results
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    pub policy: String,
    pub capacity: usize,
    pub hits: u64,
    pub total_accesses: u64,
    pub evictions: u64,
    pub hit_ratio: f64,
    pub duration_ms: f64,
}

impl From<&TrialResult> for CsvResultRow {
    fn from(trial: &TrialResult) -> Self {
        Self {
            policy: trial.policy.as_str().to_string(),
            capacity: trial.capacity,
            hits: trial.hits,
            total_accesses: trial.total_accesses,
            evictions: trial.evictions,
            hit_ratio: trial.hit_ratio,
            duration_ms: trial.duration.as_secs_f64() * 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(sweep: SweepConfig) -> Vec<usize> {
        sweep
            .capacities()
            .unwrap()
            .into_iter()
            .map(NonZeroUsize::get)
            .collect()
    }

    #[test]
    fn test_default_sweep_excludes_end() {
        assert_eq!(
            caps(SweepConfig::default()),
            [100, 200, 300, 400, 500, 600, 700, 800, 900]
        );
    }

    #[test]
    fn test_sweep_uneven_step() {
        let sweep = SweepConfig {
            start: 10,
            end: 35,
            step: 10,
        };
        assert_eq!(caps(sweep), [10, 20, 30]);
    }

    #[test]
    fn test_sweep_single_capacity() {
        let sweep = SweepConfig {
            start: 5,
            end: 6,
            step: 100,
        };
        assert_eq!(caps(sweep), [5]);
    }

    #[test]
    fn test_sweep_rejects_bad_ranges() {
        let zero_step = SweepConfig {
            start: 1,
            end: 10,
            step: 0,
        };
        assert_eq!(zero_step.capacities(), Err(SweepError::ZeroStep));

        let zero_start = SweepConfig {
            start: 0,
            end: 10,
            step: 1,
        };
        assert_eq!(zero_start.capacities(), Err(SweepError::ZeroStart));

        let empty = SweepConfig {
            start: 10,
            end: 10,
            step: 1,
        };
        assert_eq!(
            empty.capacities(),
            Err(SweepError::EmptyRange { start: 10, end: 10 })
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("lfu".parse::<Policy>(), Ok(Policy::Lfu));
        assert_eq!(" LRU ".parse::<Policy>(), Ok(Policy::Lru));
        assert!("arc".parse::<Policy>().is_err());
    }
}
