use super::types::*;
use crate::core::constants::*;
use crate::core::rng::RngSource;

/// Outgoing damage after defense. Any landed hit deals at least 1.
pub fn outgoing_damage(raw_damage: f64, enemy_defense: u32) -> u32 {
    let rounded = raw_damage.round().max(0.0) as u32;
    rounded.saturating_sub(enemy_defense).max(MIN_DAMAGE)
}

/// Incoming damage before the shield. Any landed hit deals at least 1.
pub fn incoming_damage(enemy_attack: u32, player_defense: u32) -> u32 {
    enemy_attack.saturating_sub(player_defense).max(MIN_DAMAGE)
}

/// Resolves one round and applies its effects to both combatants.
///
/// Consumes no draws itself: the enemy hand is already picked, and only the
/// Lucky Warrior rule may pull one unit draw from `rng`. On an enemy kill
/// the player's shield is refilled; encounter progression is left to the
/// caller.
pub fn resolve_round(
    player_choice: RoundChoice,
    enemy_choice: RoundChoice,
    ctx: &RoundContext,
    player: &mut Player,
    enemy: &mut Enemy,
    charge_streak: &mut u32,
    rng: &mut impl RngSource,
) -> RoundReport {
    let mut report = RoundReport::draw(player_choice, enemy_choice);
    report.result = player_choice.result_against(enemy_choice);

    match report.result {
        RoundResult::Draw => {}
        RoundResult::Win => {
            let trigger =
                ctx.class
                    .resolve_on_win(player.attack, ctx.passive_multiplier, charge_streak, rng);
            let outgoing = outgoing_damage(trigger.damage, ctx.enemy_defense);
            enemy.take_damage(outgoing);

            report.damage_dealt = outgoing;
            report.special = trigger.special;
            report.charge_remaining = trigger.charge_remaining;

            if ctx.class == ClassKind::HealerPriest {
                report.healed = player.heal(outgoing / HEALER_HEAL_DIVISOR);
            }

            if !enemy.is_alive() {
                player.refill_shield();
                report.enemy_defeated = true;
            }
        }
        RoundResult::Lose => {
            let raw = incoming_damage(ctx.enemy_attack, player.defense);
            let (absorbed, hp_lost) = player.take_damage(raw);
            report.shield_absorbed = absorbed;
            report.damage_taken = hp_lost;
            report.player_defeated = !player.is_alive();
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;

    // =========================================================================
    // Test Helpers
    // =========================================================================

    fn fresh_player() -> Player {
        Player {
            hp: 100,
            max_hp: 100,
            attack: 20,
            defense: 10,
            shield: 0,
            shield_max: 0,
        }
    }

    fn ctx(class: ClassKind, enemy: &Enemy) -> RoundContext {
        RoundContext {
            class,
            passive_multiplier: 1.0,
            enemy_attack: enemy.effective_attack(false),
            enemy_defense: enemy.effective_defense(false, 0.0),
        }
    }

    // =========================================================================
    // Damage formulas
    // =========================================================================

    #[test]
    fn test_outgoing_damage_floor_of_one() {
        assert_eq!(outgoing_damage(20.0, 0), 20);
        assert_eq!(outgoing_damage(20.0, 19), 1);
        assert_eq!(outgoing_damage(20.0, 500), 1);
        assert_eq!(outgoing_damage(52.5, 0), 53);
    }

    #[test]
    fn test_incoming_damage_floor_of_one() {
        assert_eq!(incoming_damage(5, 10), 1);
        assert_eq!(incoming_damage(25, 10), 15);
    }

    // =========================================================================
    // Round resolution
    // =========================================================================

    #[test]
    fn test_lucky_warrior_plain_win() {
        let mut player = fresh_player();
        let mut enemy = Enemy::baseline();
        let mut streak = 0;
        let mut rng = ScriptedRng::new();
        rng.push_unit(0.9);
        let c = ctx(ClassKind::LuckyWarrior, &enemy);

        let report = resolve_round(
            RoundChoice::Rock,
            RoundChoice::Scissors,
            &c,
            &mut player,
            &mut enemy,
            &mut streak,
            &mut rng,
        );

        assert_eq!(report.result, RoundResult::Win);
        assert_eq!(report.damage_dealt, 20);
        assert_eq!(enemy.hp, 30);
        assert!(report.special.is_none());
        assert!(!report.enemy_defeated);
    }

    #[test]
    fn test_draw_changes_nothing() {
        let mut player = fresh_player();
        player.shield = 5;
        player.shield_max = 10;
        let mut enemy = Enemy::baseline();
        let mut streak = 2;
        let mut rng = ScriptedRng::new();
        let (p0, e0) = (player.clone(), enemy.clone());
        let c = ctx(ClassKind::ChargeFighter, &enemy);

        let report = resolve_round(
            RoundChoice::Paper,
            RoundChoice::Paper,
            &c,
            &mut player,
            &mut enemy,
            &mut streak,
            &mut rng,
        );

        assert_eq!(report.result, RoundResult::Draw);
        assert_eq!(player, p0);
        assert_eq!(enemy, e0);
        assert_eq!(streak, 2);
    }

    #[test]
    fn test_loss_hits_shield_then_hp() {
        let mut player = fresh_player();
        player.shield = 10;
        player.shield_max = 20;
        let mut enemy = Enemy::baseline();
        enemy.base_attack = 25;
        let mut streak = 0;
        let mut rng = ScriptedRng::new();
        let c = ctx(ClassKind::LuckyWarrior, &enemy);

        let report = resolve_round(
            RoundChoice::Rock,
            RoundChoice::Paper,
            &c,
            &mut player,
            &mut enemy,
            &mut streak,
            &mut rng,
        );

        assert_eq!(report.result, RoundResult::Lose);
        assert_eq!(report.shield_absorbed, 10);
        assert_eq!(report.damage_taken, 5);
        assert_eq!(player.shield, 0);
        assert_eq!(player.hp, 95);
    }

    #[test]
    fn test_healer_heals_half_of_outgoing() {
        let mut player = fresh_player();
        player.hp = 50;
        player.shield_max = 10;
        let mut enemy = Enemy::baseline();
        let mut streak = 0;
        let mut rng = ScriptedRng::new();
        let c = ctx(ClassKind::HealerPriest, &enemy);

        let report = resolve_round(
            RoundChoice::Scissors,
            RoundChoice::Paper,
            &c,
            &mut player,
            &mut enemy,
            &mut streak,
            &mut rng,
        );

        assert_eq!(report.damage_dealt, 20);
        assert_eq!(report.healed, 10);
        assert_eq!(player.hp, 60);
        assert_eq!(player.shield, 0, "healing never touches the shield");
    }

    #[test]
    fn test_healer_heal_rounds_down() {
        let mut player = fresh_player();
        player.hp = 10;
        player.attack = 21;
        let mut enemy = Enemy::baseline();
        let mut streak = 0;
        let mut rng = ScriptedRng::new();
        let c = ctx(ClassKind::HealerPriest, &enemy);

        let report = resolve_round(
            RoundChoice::Paper,
            RoundChoice::Rock,
            &c,
            &mut player,
            &mut enemy,
            &mut streak,
            &mut rng,
        );
        assert_eq!(report.healed, 10);
    }

    #[test]
    fn test_kill_refills_shield() {
        let mut player = fresh_player();
        player.shield = 0;
        player.shield_max = 15;
        let mut enemy = Enemy::baseline();
        enemy.hp = 5;
        let mut streak = 0;
        let mut rng = ScriptedRng::new();
        let c = ctx(ClassKind::LuckyWarrior, &enemy);

        let report = resolve_round(
            RoundChoice::Rock,
            RoundChoice::Scissors,
            &c,
            &mut player,
            &mut enemy,
            &mut streak,
            &mut rng,
        );

        assert!(report.enemy_defeated);
        assert_eq!(enemy.hp, 0);
        assert_eq!(player.shield, 15);
    }

    #[test]
    fn test_lethal_loss_flags_player_defeated() {
        let mut player = fresh_player();
        player.hp = 1;
        let mut enemy = Enemy::baseline();
        let mut streak = 0;
        let mut rng = ScriptedRng::new();
        let c = ctx(ClassKind::LuckyWarrior, &enemy);

        let report = resolve_round(
            RoundChoice::Scissors,
            RoundChoice::Rock,
            &c,
            &mut player,
            &mut enemy,
            &mut streak,
            &mut rng,
        );

        assert!(report.player_defeated);
        assert_eq!(player.hp, 0);
    }

    #[test]
    fn test_loss_does_not_reset_charge_streak() {
        let mut player = fresh_player();
        let mut enemy = Enemy::baseline();
        let mut streak = 3;
        let mut rng = ScriptedRng::new();
        let c = ctx(ClassKind::ChargeFighter, &enemy);

        resolve_round(
            RoundChoice::Rock,
            RoundChoice::Paper,
            &c,
            &mut player,
            &mut enemy,
            &mut streak,
            &mut rng,
        );
        assert_eq!(streak, 3);
    }
}
