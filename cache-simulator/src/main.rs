use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use cache_simulator::generator::{TraceConfig, TraceGenerator};
use cache_simulator::input::TraceReader;
use cache_simulator::logging;
use cache_simulator::models::{Policy, SimulationConfig, SweepConfig};
use cache_simulator::runner::SimulationRunner;
use cache_simulator::stats::SimulationStats;
use lfu_sim::TieBreak;

/// Trace-driven cache simulator CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

/// Tie-break among equally frequent LFU keys
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    /// Evict the key admitted earliest
    Oldest,
    /// Evict whichever key the heap layout puts first
    HeapOrder,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Oldest => TieBreak::Oldest,
            TieBreakArg::HeapOrder => TieBreak::HeapOrder,
        }
    }
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace across a sweep of cache capacities
    Simulate {
        /// Trace file; the first token of each line is the key
        #[arg(short, long, value_name = "PATH")]
        trace: PathBuf,

        /// Policies to simulate (lfu, lru)
        #[arg(short, long, value_name = "POLICIES", value_delimiter = ',', default_value = "lfu,lru")]
        policies: Vec<Policy>,

        /// First capacity of the sweep
        #[arg(long, default_value = "100")]
        start: usize,

        /// End of the sweep (exclusive)
        #[arg(long, default_value = "1000")]
        end: usize,

        /// Capacity increment
        #[arg(long, default_value = "100")]
        step: usize,

        /// Tie-break among equally frequent LFU keys
        #[arg(long, value_enum, default_value = "oldest")]
        tie_break: TieBreakArg,

        /// Forget a key's frequency when it is evicted (textbook LFU)
        #[arg(long)]
        reset_history: bool,

        /// Number of worker threads for independent trials
        #[arg(long, default_value = "1")]
        threads: usize,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },

    /// Generate a synthetic trace with a hot key set
    Generate {
        /// Output file
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,

        /// Number of requests
        #[arg(long, default_value = "100000")]
        count: u64,

        /// Number of distinct keys
        #[arg(long, default_value = "10000")]
        keys: u64,

        /// Number of keys in the hot set
        #[arg(long, default_value = "200")]
        hot_keys: u64,

        /// Percentage of requests sent to the hot set
        #[arg(long, default_value = "80")]
        hot_percent: u8,

        /// RNG seed for a reproducible trace
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    match args.command {
        Commands::Simulate {
            trace,
            policies,
            start,
            end,
            step,
            tie_break,
            reset_history,
            threads,
            output_csv,
        } => {
            let loaded = TraceReader::open(&trace)
                .and_then(TraceReader::load)
                .with_context(|| format!("failed to load trace {}", trace.display()))?;

            let config = SimulationConfig {
                trace: loaded,
                policies,
                sweep: SweepConfig { start, end, step },
                tie_break: tie_break.into(),
                retain_history: !reset_history,
                threads,
            };
            run_simulation(config, output_csv)
        }

        Commands::Generate {
            output,
            count,
            keys,
            hot_keys,
            hot_percent,
            seed,
        } => {
            let generator = TraceGenerator::new(TraceConfig {
                count,
                keys,
                hot_keys,
                hot_percent,
                seed,
            })?;
            generator.generate_to_file(&output)?;
            println!("Wrote {count} requests to {}", output.display());
            Ok(())
        }
    }
}

/// Run the simulation with the given configuration
fn run_simulation(config: SimulationConfig, output_csv: Option<PathBuf>) -> Result<()> {
    println!("Cache Simulation");
    println!("================");
    println!(
        "Policies: {:?}",
        config.policies.iter().map(|p| p.as_str()).collect::<Vec<_>>()
    );
    println!(
        "Capacities: {}..{} step {}",
        config.sweep.start, config.sweep.end, config.sweep.step
    );
    println!("LFU tie-break: {}", config.tie_break);
    if !config.retain_history {
        println!("LFU history: reset on eviction");
    }
    println!();

    let result = SimulationRunner::new(config)
        .run()
        .context("simulation failed")?;
    info!(elapsed = ?result.duration, "simulation completed");

    let stats = SimulationStats::from_result(&result);
    stats.print_summary();
    stats.print_comparison();
    println!("\nSimulation completed in {:.2?}", result.duration);

    if let Some(csv_path) = output_csv {
        stats
            .export_csv(&csv_path)
            .with_context(|| format!("failed to export CSV to {}", csv_path.display()))?;
        println!("Results exported to: {}", csv_path.display());
    }

    Ok(())
}
