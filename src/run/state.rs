//! Run-scoped state and the snapshot handed to the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::character::DerivedStats;
use crate::combat::{ClassKind, Enemy, Player, RoundChoice, RoundContext, RoundReport};
use crate::core::constants::*;
use crate::talents::TalentLedger;

/// Where the run state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    SelectingClass,
    InRound,
    AwaitingUpgrade,
    Settled,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunPhase::SelectingClass => "selecting a class",
            RunPhase::InRound => "in a round",
            RunPhase::AwaitingUpgrade => "awaiting an upgrade",
            RunPhase::Settled => "settled",
        })
    }
}

/// Why a run reached settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementReason {
    Defeated,
    Forfeit,
    ChallengeComplete,
}

/// Post-victory upgrade options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    Attack,
    Defense,
    MaxHp,
}

/// Amounts granted by one upgrade pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpgradeGains {
    pub attack: u32,
    pub defense: u32,
    pub max_hp: u32,
    pub heal: u32,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [UpgradeKind::Attack, UpgradeKind::Defense, UpgradeKind::MaxHp];

    /// Gains for this pick; boss victories double every amount.
    pub fn gains(&self, after_boss: bool) -> UpgradeGains {
        let pick = |(normal, boss): (u32, u32)| if after_boss { boss } else { normal };
        match self {
            UpgradeKind::Attack => UpgradeGains {
                attack: pick(UPGRADE_ATTACK_GAIN),
                ..Default::default()
            },
            UpgradeKind::Defense => UpgradeGains {
                defense: pick(UPGRADE_DEFENSE_GAIN),
                ..Default::default()
            },
            UpgradeKind::MaxHp => UpgradeGains {
                max_hp: pick(UPGRADE_MAX_HP_GAIN),
                heal: pick(UPGRADE_HEAL_GAIN),
                ..Default::default()
            },
        }
    }
}

/// Counters that drive enemy scaling, boss cadence and the reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunProgress {
    pub defeat_count: u32,
    pub boss_wins_count: u32,
    pub is_boss_round: bool,
    pub last_win_was_boss: bool,
    pub charge_streak: u32,
    pub token_standard: f64,
}

impl Default for RunProgress {
    fn default() -> Self {
        Self {
            defeat_count: 0,
            boss_wins_count: 0,
            is_boss_round: false,
            last_win_was_boss: false,
            charge_streak: 0,
            token_standard: BASE_TOKEN_STANDARD,
        }
    }
}

impl RunProgress {
    /// `token_standard * (defeats + boss wins)`
    pub fn token_reward(&self) -> f64 {
        self.token_standard * (self.defeat_count + self.boss_wins_count) as f64
    }
}

/// Everything owned by one run. Only the engine mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub phase: RunPhase,
    pub class: Option<ClassKind>,
    pub stats: DerivedStats,
    pub player: Player,
    pub enemy: Enemy,
    pub progress: RunProgress,
    pub player_choice: Option<RoundChoice>,
    pub enemy_choice: Option<RoundChoice>,
    pub last_round: Option<RoundReport>,
    pub message: String,
    pub pending_reward: f64,
    pub settlement: Option<SettlementReason>,
}

impl RunState {
    /// Neutral state shown on the class select screen.
    pub fn pre_run(ledger: &TalentLedger) -> Self {
        let stats = DerivedStats::from_talents(ledger);
        Self {
            phase: RunPhase::SelectingClass,
            class: None,
            stats,
            player: stats.fresh_player(),
            enemy: Enemy::baseline(),
            progress: RunProgress::default(),
            player_choice: None,
            enemy_choice: None,
            last_round: None,
            message: "Choose your class!".to_string(),
            pending_reward: 0.0,
            settlement: None,
        }
    }

    /// Fresh run for `class` with stats from `ledger`.
    pub fn start(class: ClassKind, ledger: &TalentLedger) -> Self {
        Self {
            phase: RunPhase::InRound,
            class: Some(class),
            message: "Choose your hand!".to_string(),
            ..Self::pre_run(ledger)
        }
    }

    pub fn enemy_attack(&self) -> u32 {
        self.enemy.effective_attack(self.progress.is_boss_round)
    }

    pub fn enemy_defense(&self) -> u32 {
        self.enemy
            .effective_defense(self.progress.is_boss_round, self.stats.penetration)
    }

    pub fn enemy_max_hp(&self) -> u32 {
        self.enemy.effective_max_hp(self.progress.is_boss_round)
    }

    pub(crate) fn round_context(&self, class: ClassKind) -> RoundContext {
        RoundContext {
            class,
            passive_multiplier: self.stats.passive_multiplier,
            enemy_attack: self.enemy_attack(),
            enemy_defense: self.enemy_defense(),
        }
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            phase: self.phase,
            class: self.class,
            player: self.player.clone(),
            enemy: EnemyView {
                hp: self.enemy.hp,
                max_hp: self.enemy_max_hp(),
                attack: self.enemy_attack(),
                defense: self.enemy_defense(),
                is_boss: self.progress.is_boss_round,
            },
            progress: self.progress.clone(),
            passive_multiplier: self.stats.passive_multiplier,
            player_choice: self.player_choice,
            enemy_choice: self.enemy_choice,
            last_round: self.last_round.clone(),
            message: self.message.clone(),
            pending_reward: self.pending_reward,
            settlement: self.settlement,
        }
    }
}

/// Enemy as it is fought right now (boss doubling and penetration applied).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyView {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub is_boss: bool,
}

/// Read-only copy of the run, returned after every engine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub phase: RunPhase,
    pub class: Option<ClassKind>,
    pub player: Player,
    pub enemy: EnemyView,
    pub progress: RunProgress,
    pub passive_multiplier: f64,
    pub player_choice: Option<RoundChoice>,
    pub enemy_choice: Option<RoundChoice>,
    pub last_round: Option<RoundReport>,
    pub message: String,
    pub pending_reward: f64,
    pub settlement: Option<SettlementReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_gains_double_after_boss() {
        assert_eq!(UpgradeKind::Attack.gains(false).attack, 5);
        assert_eq!(UpgradeKind::Attack.gains(true).attack, 10);
        assert_eq!(UpgradeKind::Defense.gains(false).defense, 3);
        assert_eq!(UpgradeKind::Defense.gains(true).defense, 6);
        let hp = UpgradeKind::MaxHp.gains(true);
        assert_eq!((hp.max_hp, hp.heal), (40, 60));
        let hp = UpgradeKind::MaxHp.gains(false);
        assert_eq!((hp.max_hp, hp.heal), (20, 30));
    }

    #[test]
    fn test_token_reward() {
        let mut progress = RunProgress::default();
        assert_eq!(progress.token_reward(), 0.0);
        progress.defeat_count = 20;
        progress.boss_wins_count = 2;
        progress.token_standard = 4.0;
        assert_eq!(progress.token_reward(), 88.0);
    }

    #[test]
    fn test_start_resets_everything() {
        let state = RunState::start(ClassKind::HealerPriest, &TalentLedger::new());
        assert_eq!(state.phase, RunPhase::InRound);
        assert_eq!(state.class, Some(ClassKind::HealerPriest));
        assert_eq!(state.progress, RunProgress::default());
        assert_eq!(state.enemy, Enemy::baseline());
        assert_eq!(state.player.hp, 100);
        assert_eq!(state.pending_reward, 0.0);
    }

    #[test]
    fn test_snapshot_reports_effective_enemy() {
        let mut state = RunState::start(ClassKind::LuckyWarrior, &TalentLedger::new());
        state.enemy.base_defense = 10;
        state.progress.is_boss_round = true;
        let snap = state.snapshot();
        assert_eq!(snap.enemy.max_hp, 100);
        assert_eq!(snap.enemy.attack, 10);
        assert_eq!(snap.enemy.defense, 20);
        assert!(snap.enemy.is_boss);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(RunPhase::AwaitingUpgrade.to_string(), "awaiting an upgrade");
    }
}
