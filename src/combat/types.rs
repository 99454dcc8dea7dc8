use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::*;
use crate::core::rng::RngSource;

/// One hand of rock-paper-scissors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundChoice {
    Rock,
    Paper,
    Scissors,
}

impl RoundChoice {
    pub const ALL: [RoundChoice; 3] = [RoundChoice::Rock, RoundChoice::Paper, RoundChoice::Scissors];

    /// The hand this one beats.
    pub fn beats(self) -> RoundChoice {
        match self {
            RoundChoice::Rock => RoundChoice::Scissors,
            RoundChoice::Paper => RoundChoice::Rock,
            RoundChoice::Scissors => RoundChoice::Paper,
        }
    }

    /// Result from this hand's point of view.
    pub fn result_against(self, other: RoundChoice) -> RoundResult {
        if self == other {
            RoundResult::Draw
        } else if self.beats() == other {
            RoundResult::Win
        } else {
            RoundResult::Lose
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RoundChoice::Rock => "Rock",
            RoundChoice::Paper => "Paper",
            RoundChoice::Scissors => "Scissors",
        }
    }
}

impl fmt::Display for RoundChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Round result from the player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Win,
    Lose,
    Draw,
}

/// Playable classes. Each carries a base multiplier and its own on-win rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    /// 50% chance per win to deal boosted damage.
    LuckyWarrior,
    /// Every 4th win (counted across the run) bursts.
    ChargeFighter,
    /// Heals for half the damage dealt on each win.
    HealerPriest,
}

/// Outcome of a class's on-win rule, before defense is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnWinTrigger {
    pub damage: f64,
    pub special: Option<SpecialTrigger>,
    /// ChargeFighter only: wins still needed before the next burst.
    pub charge_remaining: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpecialTrigger {
    LuckyStrike { multiplier: f64 },
    ChargeBurst { multiplier: f64 },
}

impl SpecialTrigger {
    pub fn multiplier(&self) -> f64 {
        match self {
            SpecialTrigger::LuckyStrike { multiplier } | SpecialTrigger::ChargeBurst { multiplier } => {
                *multiplier
            }
        }
    }
}

impl ClassKind {
    pub const ALL: [ClassKind; 3] = [
        ClassKind::LuckyWarrior,
        ClassKind::ChargeFighter,
        ClassKind::HealerPriest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ClassKind::LuckyWarrior => "Lucky Warrior",
            ClassKind::ChargeFighter => "Charge Fighter",
            ClassKind::HealerPriest => "Healer Priest",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ClassKind::LuckyWarrior => "50% chance on a win to deal 1.50x damage",
            ClassKind::ChargeFighter => "After 3 wins, the 4th win deals 2.50x damage",
            ClassKind::HealerPriest => "Heals 50% of the damage dealt on a win",
        }
    }

    pub fn base_multiplier(&self) -> f64 {
        match self {
            ClassKind::LuckyWarrior => LUCKY_CRIT_MULTIPLIER,
            ClassKind::ChargeFighter => CHARGE_BURST_MULTIPLIER,
            ClassKind::HealerPriest => HEALER_BASE_MULTIPLIER,
        }
    }

    /// Base multiplier scaled by the passive talent, as shown on the class card.
    pub fn total_multiplier(&self, passive_multiplier: f64) -> f64 {
        self.base_multiplier() * passive_multiplier
    }

    /// Applies this class's on-win rule to `attack`.
    ///
    /// Only `LuckyWarrior` consumes a draw from `rng`; only `ChargeFighter`
    /// touches `charge_streak`.
    pub fn resolve_on_win(
        &self,
        attack: u32,
        passive_multiplier: f64,
        charge_streak: &mut u32,
        rng: &mut impl RngSource,
    ) -> OnWinTrigger {
        let base = attack as f64;
        match self {
            ClassKind::LuckyWarrior => {
                if rng.roll_unit() < LUCKY_CRIT_CHANCE {
                    let multiplier = self.total_multiplier(passive_multiplier);
                    OnWinTrigger {
                        damage: base * multiplier,
                        special: Some(SpecialTrigger::LuckyStrike { multiplier }),
                        charge_remaining: None,
                    }
                } else {
                    OnWinTrigger {
                        damage: base,
                        special: None,
                        charge_remaining: None,
                    }
                }
            }
            ClassKind::ChargeFighter => {
                *charge_streak += 1;
                let progress = *charge_streak % CHARGE_BURST_INTERVAL;
                if progress == 0 {
                    let multiplier = self.total_multiplier(passive_multiplier);
                    OnWinTrigger {
                        damage: base * multiplier,
                        special: Some(SpecialTrigger::ChargeBurst { multiplier }),
                        charge_remaining: None,
                    }
                } else {
                    OnWinTrigger {
                        damage: base,
                        special: None,
                        charge_remaining: Some(CHARGE_BURST_INTERVAL - progress),
                    }
                }
            }
            ClassKind::HealerPriest => OnWinTrigger {
                damage: base,
                special: None,
                charge_remaining: None,
            },
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub shield: u32,
    pub shield_max: u32,
}

impl Player {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Heals up to max HP and returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    pub fn refill_shield(&mut self) {
        self.shield = self.shield_max;
    }

    /// Shield soaks damage 1:1, the rest hits HP.
    /// Returns (absorbed by shield, HP lost).
    pub fn take_damage(&mut self, amount: u32) -> (u32, u32) {
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        let remaining = amount - absorbed;
        let before = self.hp;
        self.hp = self.hp.saturating_sub(remaining);
        (absorbed, before - self.hp)
    }
}

/// The opponent. Stored stats are the non-boss baseline; boss rounds
/// double them through the `effective_*` accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub hp: u32,
    pub base_max_hp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
}

impl Enemy {
    pub fn baseline() -> Self {
        Self {
            hp: BASE_ENEMY_MAX_HP,
            base_max_hp: BASE_ENEMY_MAX_HP,
            base_attack: BASE_ENEMY_ATTACK,
            base_defense: BASE_ENEMY_DEFENSE,
        }
    }

    pub fn effective_max_hp(&self, is_boss: bool) -> u32 {
        boss_scaled(self.base_max_hp, is_boss)
    }

    pub fn effective_attack(&self, is_boss: bool) -> u32 {
        boss_scaled(self.base_attack, is_boss)
    }

    /// Defense after boss doubling and the penetration talent.
    /// Rounded half away from zero.
    pub fn effective_defense(&self, is_boss: bool, penetration: f64) -> u32 {
        let raw = boss_scaled(self.base_defense, is_boss) as f64;
        (raw * (1.0 - penetration).max(0.0)).round() as u32
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn reset_hp(&mut self, is_boss: bool) {
        self.hp = self.effective_max_hp(is_boss);
    }
}

fn boss_scaled(value: u32, is_boss: bool) -> u32 {
    if is_boss {
        value.saturating_mul(BOSS_STAT_MULTIPLIER)
    } else {
        value
    }
}

/// Everything the resolver needs that is derived rather than stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundContext {
    pub class: ClassKind,
    pub passive_multiplier: f64,
    pub enemy_attack: u32,
    pub enemy_defense: u32,
}

/// What happened in one resolved round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub player_choice: RoundChoice,
    pub enemy_choice: RoundChoice,
    pub result: RoundResult,
    pub damage_dealt: u32,
    pub special: Option<SpecialTrigger>,
    pub charge_remaining: Option<u32>,
    pub healed: u32,
    pub shield_absorbed: u32,
    pub damage_taken: u32,
    pub enemy_defeated: bool,
    pub player_defeated: bool,
}

impl RoundReport {
    pub(crate) fn draw(player_choice: RoundChoice, enemy_choice: RoundChoice) -> Self {
        Self {
            player_choice,
            enemy_choice,
            result: RoundResult::Draw,
            damage_dealt: 0,
            special: None,
            charge_remaining: None,
            healed: 0,
            shield_absorbed: 0,
            damage_taken: 0,
            enemy_defeated: false,
            player_defeated: false,
        }
    }

    /// Player-facing summary line.
    pub fn message(&self) -> String {
        match self.result {
            RoundResult::Draw => "Draw! No damage dealt.".to_string(),
            RoundResult::Lose => format!("You lost! You took {} damage.", self.damage_taken),
            RoundResult::Win => {
                let mut msg = format!("You won! The enemy took {} damage.", self.damage_dealt);
                let mut extras = Vec::new();
                match self.special {
                    Some(SpecialTrigger::LuckyStrike { multiplier }) => {
                        extras.push(format!("Lucky strike! {:.2}x damage", multiplier))
                    }
                    Some(SpecialTrigger::ChargeBurst { multiplier }) => {
                        extras.push(format!("Charge burst! {:.2}x damage", multiplier))
                    }
                    None => {}
                }
                if let Some(remaining) = self.charge_remaining {
                    extras.push(format!("Charging: {} more wins to burst", remaining));
                }
                if self.healed > 0 {
                    extras.push(format!("Healed {} HP", self.healed));
                }
                if !extras.is_empty() {
                    msg.push(' ');
                    msg.push_str(&extras.join(", "));
                }
                msg
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;

    #[test]
    fn test_beats_relation() {
        assert_eq!(
            RoundChoice::Scissors.result_against(RoundChoice::Paper),
            RoundResult::Win
        );
        assert_eq!(
            RoundChoice::Paper.result_against(RoundChoice::Rock),
            RoundResult::Win
        );
        assert_eq!(
            RoundChoice::Rock.result_against(RoundChoice::Scissors),
            RoundResult::Win
        );
        assert_eq!(
            RoundChoice::Rock.result_against(RoundChoice::Paper),
            RoundResult::Lose
        );
        for c in RoundChoice::ALL {
            assert_eq!(c.result_against(c), RoundResult::Draw);
        }
    }

    #[test]
    fn test_lucky_warrior_crit_below_half() {
        let mut rng = ScriptedRng::new();
        rng.push_unit(0.49);
        let mut streak = 0;
        let t = ClassKind::LuckyWarrior.resolve_on_win(20, 1.0, &mut streak, &mut rng);
        assert_eq!(t.damage, 30.0);
        assert!(matches!(t.special, Some(SpecialTrigger::LuckyStrike { .. })));
        assert_eq!(streak, 0);
    }

    #[test]
    fn test_lucky_warrior_no_crit_at_half() {
        let mut rng = ScriptedRng::new();
        rng.push_unit(0.5);
        let mut streak = 0;
        let t = ClassKind::LuckyWarrior.resolve_on_win(20, 1.0, &mut streak, &mut rng);
        assert_eq!(t.damage, 20.0);
        assert!(t.special.is_none());
    }

    #[test]
    fn test_charge_fighter_bursts_every_fourth_win() {
        let mut rng = ScriptedRng::new();
        let mut streak = 0;
        let remaining: Vec<Option<u32>> = (0..3)
            .map(|_| {
                ClassKind::ChargeFighter
                    .resolve_on_win(20, 1.0, &mut streak, &mut rng)
                    .charge_remaining
            })
            .collect();
        assert_eq!(remaining, vec![Some(3), Some(2), Some(1)]);

        let burst = ClassKind::ChargeFighter.resolve_on_win(20, 1.0, &mut streak, &mut rng);
        assert_eq!(burst.damage, 50.0);
        assert!(matches!(burst.special, Some(SpecialTrigger::ChargeBurst { .. })));
        assert_eq!(streak, 4);
        // Never touches the rng
        assert_eq!(rng.remaining(), (0, 0));
    }

    #[test]
    fn test_healer_has_no_multiplier() {
        let mut rng = ScriptedRng::new();
        rng.push_unit(0.0);
        let mut streak = 0;
        let t = ClassKind::HealerPriest.resolve_on_win(20, 1.75, &mut streak, &mut rng);
        assert_eq!(t.damage, 20.0);
        assert!(t.special.is_none());
        // Healer must not consume the lucky draw
        assert_eq!(rng.remaining(), (0, 1));
    }

    #[test]
    fn test_special_multiplier_matches_trigger() {
        let mut rng = ScriptedRng::new();
        rng.push_unit(0.0);
        let mut streak = 0;
        let t = ClassKind::LuckyWarrior.resolve_on_win(20, 1.2, &mut streak, &mut rng);
        let special = t.special.unwrap();
        assert!((special.multiplier() - 1.8).abs() < 1e-9);
        assert!((t.damage - 20.0 * special.multiplier()).abs() < 1e-9);
        assert_eq!(SpecialTrigger::ChargeBurst { multiplier: 2.5 }.multiplier(), 2.5);
    }

    #[test]
    fn test_class_descriptions() {
        assert_eq!(
            ClassKind::ChargeFighter.description(),
            "After 3 wins, the 4th win deals 2.50x damage"
        );
        for class in ClassKind::ALL {
            assert!(!class.description().is_empty());
        }
    }

    #[test]
    fn test_passive_multiplier_scales_special() {
        let mut rng = ScriptedRng::new();
        rng.push_unit(0.0);
        let mut streak = 0;
        let t = ClassKind::LuckyWarrior.resolve_on_win(20, 1.75, &mut streak, &mut rng);
        assert!((t.damage - 52.5).abs() < 1e-9);
    }

    #[test]
    fn test_player_take_damage_shield_first() {
        let mut player = Player {
            hp: 100,
            max_hp: 100,
            attack: 20,
            defense: 10,
            shield: 10,
            shield_max: 20,
        };
        let (absorbed, lost) = player.take_damage(15);
        assert_eq!(absorbed, 10);
        assert_eq!(lost, 5);
        assert_eq!(player.shield, 0);
        assert_eq!(player.hp, 95);
    }

    #[test]
    fn test_player_take_damage_floors_at_zero() {
        let mut player = Player {
            hp: 3,
            max_hp: 100,
            attack: 20,
            defense: 10,
            shield: 0,
            shield_max: 0,
        };
        let (_, lost) = player.take_damage(50);
        assert_eq!(lost, 3);
        assert_eq!(player.hp, 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_player_heal_caps_at_max() {
        let mut player = Player {
            hp: 95,
            max_hp: 100,
            attack: 20,
            defense: 10,
            shield: 0,
            shield_max: 10,
        };
        assert_eq!(player.heal(20), 5);
        assert_eq!(player.hp, 100);
        assert_eq!(player.shield, 0);
    }

    #[test]
    fn test_enemy_boss_doubling() {
        let enemy = Enemy {
            hp: 100,
            base_max_hp: 100,
            base_attack: 13,
            base_defense: 10,
        };
        assert_eq!(enemy.effective_max_hp(true), 200);
        assert_eq!(enemy.effective_attack(true), 26);
        assert_eq!(enemy.effective_defense(true, 0.0), 20);
        assert_eq!(enemy.effective_defense(false, 0.0), 10);
    }

    #[test]
    fn test_enemy_penetration_rounds_half_away_from_zero() {
        let enemy = Enemy {
            hp: 50,
            base_max_hp: 50,
            base_attack: 5,
            base_defense: 5,
        };
        // 5 * 0.9 = 4.5 -> 5
        assert_eq!(enemy.effective_defense(false, 0.10), 5);
        // 10 * 0.75 = 7.5 -> 8
        assert_eq!(enemy.effective_defense(true, 0.25), 8);
    }

    #[test]
    fn test_report_messages() {
        let mut report = RoundReport::draw(RoundChoice::Rock, RoundChoice::Rock);
        assert_eq!(report.message(), "Draw! No damage dealt.");

        report.result = RoundResult::Win;
        report.damage_dealt = 20;
        report.charge_remaining = Some(3);
        assert_eq!(
            report.message(),
            "You won! The enemy took 20 damage. Charging: 3 more wins to burst"
        );
    }
}
