//! Synthetic trace generation
//!
//! Produces traces in the same line format the simulator reads
//! (`<key> <sequence>`), with a configurable hot set that receives most of
//! the traffic. A fixed seed reproduces the same trace byte for byte.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::info;

/// Invalid generator parameters or output failures
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("key space must contain at least one key")]
    NoKeys,
    #[error("hot set of {hot} keys exceeds key space of {keys}")]
    HotSetTooLarge { hot: u64, keys: u64 },
    #[error("hot traffic share {0}% is above 100%")]
    HotPercent(u8),
    #[error("failed to write trace {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parameters for generating a synthetic trace
#[derive(Debug, Clone)]
pub struct TraceConfig {
    /// Number of requests to emit
    pub count: u64,
    /// Size of the key space
    pub keys: u64,
    /// Keys `0..hot_keys` form the hot set
    pub hot_keys: u64,
    /// Percentage of requests sent to the hot set
    pub hot_percent: u8,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            count: 100_000,
            keys: 10_000,
            hot_keys: 200,
            hot_percent: 80,
            seed: None,
        }
    }
}

/// Generator for synthetic access traces
#[derive(Debug)]
pub struct TraceGenerator {
    config: TraceConfig,
}

impl TraceGenerator {
    /// Validates `config` and builds a generator.
    pub fn new(config: TraceConfig) -> Result<Self, GeneratorError> {
        if config.keys == 0 {
            return Err(GeneratorError::NoKeys);
        }
        if config.hot_keys > config.keys {
            return Err(GeneratorError::HotSetTooLarge {
                hot: config.hot_keys,
                keys: config.keys,
            });
        }
        if config.hot_percent > 100 {
            return Err(GeneratorError::HotPercent(config.hot_percent));
        }
        Ok(Self { config })
    }

    /// Writes the trace to `path`.
    pub fn generate_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GeneratorError> {
        let path = path.as_ref();
        let write_err = |source| GeneratorError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::with_capacity(1024 * 1024, file);
        self.generate(&mut writer).map_err(write_err)?;
        writer.flush().map_err(write_err)?;

        info!(
            path = %path.display(),
            requests = self.config.count,
            "trace generation complete"
        );
        Ok(())
    }

    /// Writes the trace to any writer.
    pub fn generate<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let cold_keys = self.config.keys - self.config.hot_keys;
        for seq in 0..self.config.count {
            let key = self.next_key(&mut rng, cold_keys);
            writeln!(out, "{key} {seq}")?;
        }
        Ok(())
    }

    fn next_key<R: Rng>(&self, rng: &mut R, cold_keys: u64) -> u64 {
        let hot = self.config.hot_keys > 0
            && (cold_keys == 0 || rng.gen_range(0..100u8) < self.config.hot_percent);
        if hot {
            rng.gen_range(0..self.config.hot_keys)
        } else {
            self.config.hot_keys + rng.gen_range(0..cold_keys)
        }
    }
}
