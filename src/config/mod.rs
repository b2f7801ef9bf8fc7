//! Simulator Configuration Module
//!
//! Configuration structs have public fields for simple instantiation, plus a
//! validating constructor for values that come from outside the program
//! (command lines, sweep ranges).
//!
//! | Config | Simulator | Description |
//! |--------|-----------|-------------|
//! | `LfuSimConfig` | [`LfuSimulator`](crate::LfuSimulator) | Least Frequently Used |
//!
//! # Examples
//!
//! ```
//! use lfu_sim::config::LfuSimConfig;
//! use lfu_sim::LfuSimulator;
//!
//! let config = LfuSimConfig::new(1000).unwrap();
//! let sim: LfuSimulator<String> = LfuSimulator::init(config, None);
//! assert_eq!(sim.cap().get(), 1000);
//! ```

pub mod lfu;

pub use lfu::{LfuSimConfig, TieBreak};
