//! Simulation runner for cache policies
//!
//! Every (policy, capacity) pair is an independent trial: a fresh simulator
//! is built, the whole trace is replayed through it in request order, and the
//! counters are collected into a [`TrialResult`]. No state is shared between
//! trials, so they can run on a worker pool and still produce exactly the
//! same numbers as a sequential run.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Instant;

use lfu_sim::{LfuSimConfig, LfuSimulator};
use scoped_threadpool::Pool;
use thiserror::Error;
use tracing::{debug, info};

use crate::input::Trace;
use crate::lru::LruSimulator;
use crate::models::{Policy, SimulationConfig, SimulationResult, SweepError, TrialResult};

/// Failures that stop a simulation before any trial runs
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid capacity sweep")]
    Sweep(#[from] SweepError),
    #[error("no policies selected")]
    NoPolicies,
    #[error("worker thread count must be positive")]
    ZeroThreads,
}

/// Runs capacity sweeps over a loaded trace
#[derive(Debug)]
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Replays the trace for every policy and capacity.
    pub fn run(&self) -> Result<SimulationResult, SimulationError> {
        let capacities = self.config.sweep.capacities()?;
        if self.config.policies.is_empty() {
            return Err(SimulationError::NoPolicies);
        }
        if self.config.threads == 0 {
            return Err(SimulationError::ZeroThreads);
        }

        let mut policies = self.config.policies.clone();
        policies.sort();
        policies.dedup();

        let jobs: Vec<(Policy, NonZeroUsize)> = policies
            .iter()
            .flat_map(|&policy| capacities.iter().map(move |&cap| (policy, cap)))
            .collect();

        info!(
            trials = jobs.len(),
            requests = self.config.trace.len(),
            threads = self.config.threads,
            "starting capacity sweep"
        );

        let start = Instant::now();
        let mut trials = if self.config.threads > 1 && jobs.len() > 1 {
            self.run_parallel(&jobs)
        } else {
            jobs.iter()
                .map(|&(policy, capacity)| self.run_trial(policy, capacity))
                .collect()
        };
        trials.sort_by_key(|t| (t.policy, t.capacity));

        Ok(SimulationResult {
            trials,
            total_requests: self.config.trace.len(),
            unique_keys: self.config.trace.unique_keys(),
            duration: start.elapsed(),
        })
    }

    fn run_parallel(&self, jobs: &[(Policy, NonZeroUsize)]) -> Vec<TrialResult> {
        let threads = u32::try_from(self.config.threads.min(jobs.len())).unwrap_or(u32::MAX);
        let results = Mutex::new(Vec::with_capacity(jobs.len()));
        let mut pool = Pool::new(threads);

        pool.scoped(|scope| {
            for &(policy, capacity) in jobs {
                let results = &results;
                scope.execute(move || {
                    let trial = self.run_trial(policy, capacity);
                    // a poisoned lock still holds every trial pushed before the panic
                    let mut guard = results.lock().unwrap_or_else(|e| e.into_inner());
                    guard.push(trial);
                });
            }
        });

        results.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    /// Replays the trace through a fresh simulator.
    pub fn run_trial(&self, policy: Policy, capacity: NonZeroUsize) -> TrialResult {
        let start = Instant::now();
        let (hits, total_accesses, evictions) = match policy {
            Policy::Lfu => {
                let config = LfuSimConfig {
                    capacity,
                    tie_break: self.config.tie_break,
                    retain_history: self.config.retain_history,
                };
                let mut sim: LfuSimulator<String> = LfuSimulator::init(config, None);
                replay(&self.config.trace, |key| {
                    sim.record_access(key);
                });
                (sim.hits(), sim.total_accesses(), sim.metrics().core.evictions)
            }
            Policy::Lru => {
                let mut sim: LruSimulator<String> = LruSimulator::new(capacity);
                replay(&self.config.trace, |key| {
                    sim.record_access(key);
                });
                (sim.hits(), sim.total_accesses(), sim.metrics().evictions)
            }
        };
        let duration = start.elapsed();

        let hit_ratio = if total_accesses == 0 {
            0.0
        } else {
            hits as f64 / total_accesses as f64
        };

        debug!(
            policy = policy.as_str(),
            capacity = capacity.get(),
            hits,
            hit_ratio,
            "trial complete"
        );

        TrialResult {
            policy,
            capacity: capacity.get(),
            hits,
            total_accesses,
            evictions,
            hit_ratio,
            duration,
        }
    }
}

#[inline]
fn replay(trace: &Trace, mut access: impl FnMut(&str)) {
    for key in trace {
        access(key.as_str());
    }
}
