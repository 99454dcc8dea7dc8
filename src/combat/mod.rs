//! Round resolution: hands, combatants and class rules.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
