//! Run lifecycle: class selection, rounds, upgrades and settlement.

pub mod engine;
pub mod state;

pub use engine::GameEngine;
pub use state::*;
