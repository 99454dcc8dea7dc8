//! Talent purchasing and the persistence contract.

use serde_json::Value;
use std::collections::BTreeMap;

use super::types::{TalentId, TalentLedger};
use crate::core::constants::CURRENCY_EPSILON;
use crate::error::{PurchaseError, StoreError};

/// Key holding the token balance.
pub const CURRENCY_BALANCE_KEY: &str = "currency_balance";

impl TalentLedger {
    /// Buys the next level of `talent`. Returns the price paid.
    ///
    /// On error nothing changes.
    pub fn purchase(&mut self, talent: TalentId) -> Result<f64, PurchaseError> {
        let level = self.level(talent);
        let cost = talent
            .cost_at(level)
            .ok_or(PurchaseError::MaxLevelReached {
                talent,
                max_level: talent.max_level(),
            })?;

        if self.currency_balance + CURRENCY_EPSILON < cost {
            return Err(PurchaseError::InsufficientFunds {
                talent,
                cost,
                balance: self.currency_balance,
            });
        }

        self.currency_balance = (self.currency_balance - cost).max(0.0);
        *self.level_mut(talent) = level + 1;
        tracing::info!(
            talent = %talent,
            level = level + 1,
            cost,
            balance = self.currency_balance,
            "talent purchased"
        );
        Ok(cost)
    }

    /// Reads a ledger back from `store`. Missing keys default to zero;
    /// out-of-range values are clamped.
    pub fn load_from(store: &impl KeyValueStore) -> Result<Self, StoreError> {
        let mut ledger = TalentLedger::new();

        if let Some(value) = store.get(CURRENCY_BALANCE_KEY) {
            let balance = value.as_f64().ok_or_else(|| StoreError::WrongType {
                key: CURRENCY_BALANCE_KEY.to_string(),
            })?;
            if balance < 0.0 || !balance.is_finite() {
                tracing::warn!(balance, "stored balance out of range, resetting to 0");
            }
            ledger.currency_balance = if balance.is_finite() {
                balance.max(0.0)
            } else {
                0.0
            };
        }

        for talent in TalentId::ALL {
            let key = talent.storage_key();
            let Some(value) = store.get(key) else {
                continue;
            };
            let level = value.as_u64().ok_or_else(|| StoreError::WrongType {
                key: key.to_string(),
            })?;
            let max = talent.max_level() as u64;
            if level > max {
                tracing::warn!(talent = %talent, level, max, "stored level above cap, clamping");
            }
            *ledger.level_mut(talent) = level.min(max) as u32;
        }

        Ok(ledger)
    }

    /// Writes the balance and all six levels to `store`.
    pub fn save_to(&self, store: &mut impl KeyValueStore) {
        store.set(CURRENCY_BALANCE_KEY, Value::from(self.currency_balance));
        for talent in TalentId::ALL {
            store.set(talent.storage_key(), Value::from(self.level(talent)));
        }
    }
}

/// Logical key/value storage the ledger persists through.
///
/// The platform layer supplies the real backing store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
}

/// In-memory store that can round-trip through a JSON document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.values).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let values = serde_json::from_str(json).map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(Self { values })
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }
}
