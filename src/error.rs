//! Errors raised while configuring a simulator.
//!
//! Recording accesses never fails; the only error the library reports is a
//! configuration that cannot describe a usable cache.

use core::fmt;

/// Invalid simulator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested capacity was zero.
    ZeroCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => f.write_str("cache capacity must be positive"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
