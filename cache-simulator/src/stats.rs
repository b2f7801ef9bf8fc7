// Statistics reporting for cache simulation

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use crate::models::{CsvResultRow, Policy, SimulationResult, TrialResult};

/// Formats simulation results for the terminal and for CSV export
#[derive(Debug)]
pub struct SimulationStats<'a> {
    result: &'a SimulationResult,
}

impl<'a> SimulationStats<'a> {
    pub fn from_result(result: &'a SimulationResult) -> Self {
        Self { result }
    }

    /// One line per trial in sweep order.
    pub fn format_trial(trial: &TrialResult) -> String {
        format!(
            "policy = {:<3} cache_slot = {:>6} cache_hit = {:>9} tot_cnt = {:>9} hit ratio = {:.5}",
            trial.policy.as_str(),
            trial.capacity,
            trial.hits,
            trial.total_accesses,
            trial.hit_ratio
        )
    }

    /// Writes the per-trial summary.
    pub fn write_summary<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "Simulation Results")?;
        writeln!(out, "==================")?;
        writeln!(
            out,
            "Requests: {}  Unique keys: {}",
            self.result.total_requests, self.result.unique_keys
        )?;
        writeln!(out)?;
        for trial in &self.result.trials {
            writeln!(out, "{}", Self::format_trial(trial))?;
        }
        Ok(())
    }

    /// Writes LFU against LRU per capacity, for capacities both policies ran.
    pub fn write_comparison<W: Write>(&self, mut out: W) -> io::Result<()> {
        let mut by_capacity: BTreeMap<usize, (Option<f64>, Option<f64>)> = BTreeMap::new();
        for trial in &self.result.trials {
            let slot = by_capacity.entry(trial.capacity).or_default();
            match trial.policy {
                Policy::Lfu => slot.0 = Some(trial.hit_ratio),
                Policy::Lru => slot.1 = Some(trial.hit_ratio),
            }
        }

        let rows: Vec<(usize, f64, f64)> = by_capacity
            .into_iter()
            .filter_map(|(cap, ratios)| match ratios {
                (Some(lfu), Some(lru)) => Some((cap, lfu, lru)),
                _ => None,
            })
            .collect();
        if rows.is_empty() {
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "LFU vs LRU")?;
        writeln!(out, "----------")?;
        writeln!(
            out,
            "{:>10} {:>10} {:>10} {:>10}",
            "capacity", "LFU", "LRU", "delta"
        )?;
        for (cap, lfu, lru) in rows {
            writeln!(
                out,
                "{:>10} {:>10.5} {:>10.5} {:>+10.5}",
                cap,
                lfu,
                lru,
                lfu - lru
            )?;
        }
        Ok(())
    }

    /// Print a summary report of the simulation results
    pub fn print_summary(&self) {
        if let Err(e) = self.write_summary(io::stdout().lock()) {
            tracing::warn!(error = %e, "failed to write summary");
        }
    }

    /// Print the LFU/LRU comparison table
    pub fn print_comparison(&self) {
        if let Err(e) = self.write_comparison(io::stdout().lock()) {
            tracing::warn!(error = %e, "failed to write comparison");
        }
    }

    /// Export results to a CSV file
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        for trial in &self.result.trials {
            writer.serialize(CsvResultRow::from(trial))?;
        }
        writer.flush()?;
        Ok(())
    }
}
