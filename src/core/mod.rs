//! Balance constants and the randomness seam.

pub mod constants;
pub mod rng;

pub use constants::*;
pub use rng::{RandSource, RngSource, ScriptedRng};
