//! Talent identifiers, pricing and the persistent ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::*;

/// The six permanent talents bought with tokens between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TalentId {
    Attack,
    Defense,
    MaxHp,
    PassiveMultiplier,
    DefensePenetration,
    ShieldCapacity,
}

impl TalentId {
    /// All talents in talent-screen order
    pub const ALL: [TalentId; 6] = [
        TalentId::Attack,
        TalentId::Defense,
        TalentId::MaxHp,
        TalentId::PassiveMultiplier,
        TalentId::DefensePenetration,
        TalentId::ShieldCapacity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TalentId::Attack => "Attack",
            TalentId::Defense => "Defense",
            TalentId::MaxHp => "Max HP",
            TalentId::PassiveMultiplier => "Passive Multiplier",
            TalentId::DefensePenetration => "Defense Penetration",
            TalentId::ShieldCapacity => "Shield",
        }
    }

    pub fn max_level(&self) -> u32 {
        match self {
            TalentId::ShieldCapacity => SHIELD_TALENT_MAX_LEVEL,
            _ => TALENT_MAX_LEVEL,
        }
    }

    /// Key under which this talent's level is persisted.
    pub fn storage_key(&self) -> &'static str {
        match self {
            TalentId::Attack => "talent.attack",
            TalentId::Defense => "talent.defense",
            TalentId::MaxHp => "talent.max_hp",
            TalentId::PassiveMultiplier => "talent.passive_multiplier",
            TalentId::DefensePenetration => "talent.defense_penetration",
            TalentId::ShieldCapacity => "talent.shield_capacity",
        }
    }

    /// Price to go from `level` to `level + 1`, or `None` at the cap.
    pub fn cost_at(&self, level: u32) -> Option<f64> {
        if level >= self.max_level() {
            return None;
        }
        match self {
            TalentId::ShieldCapacity => {
                Some(SHIELD_TALENT_BASE_COST + SHIELD_TALENT_COST_STEP * level as f64)
            }
            _ => TALENT_COSTS.get(level as usize).copied(),
        }
    }

    /// Short description of the bonus at `level`, as shown on the talent screen.
    pub fn effect_label(&self, level: u32) -> String {
        use crate::character::derived_stats as calc;
        match self {
            TalentId::Attack => format!("+{} ATK", calc::attack_bonus(level)),
            TalentId::Defense => format!("+{} DEF", calc::defense_bonus(level)),
            TalentId::MaxHp => format!("+{} MAX HP", calc::max_hp_bonus(level)),
            TalentId::PassiveMultiplier => {
                format!("x{:.2} passive", calc::passive_multiplier(level))
            }
            TalentId::DefensePenetration => format!(
                "Ignore {}% DEF",
                (calc::penetration_fraction(level) * 100.0).round() as u32
            ),
            TalentId::ShieldCapacity => format!("+{} SHD", calc::shield_capacity(level)),
        }
    }
}

impl fmt::Display for TalentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Persistent currency balance and talent levels.
///
/// Levels only ever go up, and only through [`TalentLedger::purchase`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TalentLedger {
    pub currency_balance: f64,
    pub attack: u32,
    pub defense: u32,
    pub max_hp: u32,
    pub passive_multiplier: u32,
    pub defense_penetration: u32,
    pub shield_capacity: u32,
}

impl TalentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(currency_balance: f64) -> Self {
        Self {
            currency_balance: currency_balance.max(0.0),
            ..Self::default()
        }
    }

    pub fn level(&self, talent: TalentId) -> u32 {
        match talent {
            TalentId::Attack => self.attack,
            TalentId::Defense => self.defense,
            TalentId::MaxHp => self.max_hp,
            TalentId::PassiveMultiplier => self.passive_multiplier,
            TalentId::DefensePenetration => self.defense_penetration,
            TalentId::ShieldCapacity => self.shield_capacity,
        }
    }

    pub(crate) fn level_mut(&mut self, talent: TalentId) -> &mut u32 {
        match talent {
            TalentId::Attack => &mut self.attack,
            TalentId::Defense => &mut self.defense,
            TalentId::MaxHp => &mut self.max_hp,
            TalentId::PassiveMultiplier => &mut self.passive_multiplier,
            TalentId::DefensePenetration => &mut self.defense_penetration,
            TalentId::ShieldCapacity => &mut self.shield_capacity,
        }
    }

    /// Price of the next level, `None` once maxed.
    pub fn next_cost(&self, talent: TalentId) -> Option<f64> {
        talent.cost_at(self.level(talent))
    }

    /// Whether the next level is both available and affordable.
    pub fn can_afford(&self, talent: TalentId) -> bool {
        self.next_cost(talent)
            .is_some_and(|cost| self.currency_balance + CURRENCY_EPSILON >= cost)
    }

    pub fn deposit(&mut self, amount: f64) {
        self.currency_balance = (self.currency_balance + amount.max(0.0)).max(0.0);
    }
}
