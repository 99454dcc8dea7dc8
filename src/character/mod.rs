//! Player stat derivation from base values and talents.

pub mod derived_stats;

pub use derived_stats::*;
