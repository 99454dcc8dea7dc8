//! Balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of runs through the real [`GameEngine`](crate::GameEngine)
//! with random hands to analyze:
//! - How far each class gets before dying
//! - Token income per run
//! - How talent purchases between runs shift those numbers

mod config;
mod report;
mod runner;

pub use config::{SimConfig, UpgradePolicy};
pub use report::{ClassSummary, RunStats, SimReport};
pub use runner::{run_simulation, spend_tokens};
