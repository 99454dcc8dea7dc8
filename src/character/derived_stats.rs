use serde::{Deserialize, Serialize};

use crate::combat::Player;
use crate::core::constants::*;
use crate::talents::TalentLedger;

/// Linear bonus with an extra flat amount once the talent is maxed.
fn capped_linear(level: u32, per_level: u32, capstone: u32) -> u32 {
    let lv = level.min(TALENT_MAX_LEVEL);
    let base = lv * per_level;
    if lv >= TALENT_MAX_LEVEL {
        base + capstone
    } else {
        base
    }
}

pub fn attack_bonus(level: u32) -> u32 {
    capped_linear(level, TALENT_ATTACK_PER_LEVEL, TALENT_ATTACK_CAPSTONE)
}

pub fn defense_bonus(level: u32) -> u32 {
    capped_linear(level, TALENT_DEFENSE_PER_LEVEL, TALENT_DEFENSE_CAPSTONE)
}

pub fn max_hp_bonus(level: u32) -> u32 {
    capped_linear(level, TALENT_MAX_HP_PER_LEVEL, TALENT_MAX_HP_CAPSTONE)
}

/// `1.0 + 0.1 * level`, plus 0.25 at level 5 (x1.75 max).
pub fn passive_multiplier(level: u32) -> f64 {
    let lv = level.min(TALENT_MAX_LEVEL);
    let mut mult = 1.0 + TALENT_PASSIVE_PER_LEVEL * lv as f64;
    if lv >= TALENT_MAX_LEVEL {
        mult += TALENT_PASSIVE_CAPSTONE;
    }
    mult
}

/// Fraction of enemy defense ignored: 5% per level, 25% max.
pub fn penetration_fraction(level: u32) -> f64 {
    TALENT_PENETRATION_PER_LEVEL * level.min(TALENT_MAX_LEVEL) as f64
}

/// Shield cap: 5 per level, no capstone, 100 levels.
pub fn shield_capacity(level: u32) -> u32 {
    level.min(SHIELD_TALENT_MAX_LEVEL) * TALENT_SHIELD_PER_LEVEL
}

/// Player stats for a new run, derived from base values plus talents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub attack: u32,
    pub defense: u32,
    pub max_hp: u32,
    pub shield_max: u32,
    pub passive_multiplier: f64,
    pub penetration: f64,
}

impl DerivedStats {
    pub fn from_talents(ledger: &TalentLedger) -> Self {
        Self {
            attack: BASE_PLAYER_ATTACK + attack_bonus(ledger.attack),
            defense: BASE_PLAYER_DEFENSE + defense_bonus(ledger.defense),
            max_hp: BASE_PLAYER_MAX_HP + max_hp_bonus(ledger.max_hp),
            shield_max: shield_capacity(ledger.shield_capacity),
            passive_multiplier: passive_multiplier(ledger.passive_multiplier),
            penetration: penetration_fraction(ledger.defense_penetration),
        }
    }

    /// A full-health player with a full shield.
    pub fn fresh_player(&self) -> Player {
        Player {
            hp: self.max_hp,
            max_hp: self.max_hp,
            attack: self.attack,
            defense: self.defense,
            shield: self.shield_max,
            shield_max: self.shield_max,
        }
    }
}
