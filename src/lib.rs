//! rps-rogue - rock-paper-scissors roguelike rules engine
//!
//! Pure combat resolution and progression. Presentation layers drive a
//! [`GameEngine`] and render the [`RunSnapshot`] it returns after every call.

pub mod character;
pub mod combat;
pub mod core;
pub mod error;
pub mod run;
pub mod simulator;
pub mod talents;

pub use character::DerivedStats;
pub use combat::{ClassKind, RoundChoice, RoundReport, RoundResult};
pub use crate::core::{RandSource, RngSource, ScriptedRng};
pub use error::{PurchaseError, StoreError, TransitionError};
pub use run::{GameEngine, RunPhase, RunSnapshot, SettlementReason, UpgradeKind};
pub use talents::{KeyValueStore, MemoryStore, TalentId, TalentLedger};
