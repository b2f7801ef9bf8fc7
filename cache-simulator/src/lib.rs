// Cache Simulator Library

pub mod generator;
pub mod input;
pub mod logging;
pub mod lru;
pub mod models;
pub mod runner;
pub mod stats;
