//! Simulation configuration.

use crate::combat::ClassKind;
use crate::run::{RunSnapshot, UpgradeKind};

/// How the simulated player picks post-victory upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradePolicy {
    /// Attack, Defense, Max HP in rotation.
    Balanced,
    AttackFirst,
    DefenseFirst,
    /// Max HP when below half health, Attack otherwise.
    Survival,
}

impl UpgradePolicy {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "balanced" => Some(UpgradePolicy::Balanced),
            "attack" => Some(UpgradePolicy::AttackFirst),
            "defense" => Some(UpgradePolicy::DefenseFirst),
            "survival" => Some(UpgradePolicy::Survival),
            _ => None,
        }
    }

    /// Pick an upgrade given the run as it stands.
    pub fn choose(&self, snapshot: &RunSnapshot) -> UpgradeKind {
        match self {
            UpgradePolicy::Balanced => {
                let picks = snapshot.progress.defeat_count + snapshot.progress.boss_wins_count;
                UpgradeKind::ALL[picks as usize % UpgradeKind::ALL.len()]
            }
            UpgradePolicy::AttackFirst => UpgradeKind::Attack,
            UpgradePolicy::DefenseFirst => UpgradeKind::Defense,
            UpgradePolicy::Survival => {
                if snapshot.player.hp * 2 < snapshot.player.max_hp {
                    UpgradeKind::MaxHp
                } else {
                    UpgradeKind::Attack
                }
            }
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated runs
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Class to play (None = rotate through all classes)
    pub class: Option<ClassKind>,

    pub upgrade_policy: UpgradePolicy,

    /// Rounds per run before the simulated player forfeits
    pub max_rounds_per_run: u64,

    /// Carry tokens across runs and buy talents between them
    pub meta_progression: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            class: None,
            upgrade_policy: UpgradePolicy::Balanced,
            max_rounds_per_run: 100_000,
            meta_progression: false,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for comparing classes from a blank ledger
    pub fn class_comparison(num_runs: u32) -> Self {
        Self {
            num_runs,
            class: None,
            meta_progression: false,
            ..Default::default()
        }
    }

    /// Quick config for pacing talent purchases across many runs
    pub fn meta_progression_test() -> Self {
        Self {
            num_runs: 200,
            meta_progression: true,
            ..Default::default()
        }
    }
}
