//! Error types surfaced by the engine.

use thiserror::Error;

use crate::run::RunPhase;
use crate::talents::TalentId;

/// An action was invoked in a phase that does not accept it.
///
/// The engine state is untouched when this is returned, so callers can
/// safely retry or ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: RunPhase,
    },
}

/// Reasons a talent purchase was refused. The ledger is untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PurchaseError {
    #[error("{talent} costs {cost:.2} but only {balance:.2} is available")]
    InsufficientFunds {
        talent: TalentId,
        cost: f64,
        balance: f64,
    },

    #[error("{talent} is already at max level {max_level}")]
    MaxLevelReached { talent: TalentId, max_level: u32 },
}

/// Persisted ledger values that could not be read back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("key '{key}' holds a value of the wrong type")]
    WrongType { key: String },

    #[error("store document is not valid JSON: {0}")]
    Malformed(String),
}
