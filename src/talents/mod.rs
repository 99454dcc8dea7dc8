//! Persistent talents bought with tokens earned at settlement.
//!
//! The ledger survives across runs; everything else in a run is discarded
//! once its settlement is claimed.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
