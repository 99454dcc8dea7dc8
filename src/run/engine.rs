//! The run state machine.
//!
//! ```text
//! SelectingClass -> InRound -> AwaitingUpgrade -> InRound -> ... -> Settled
//!                       \______________________________________/
//! Settled -> (claim) -> SelectingClass
//! ```
//!
//! Every action either completes or returns [`TransitionError`] with the
//! state left exactly as it was.

use super::state::{RunPhase, RunSnapshot, RunState, SettlementReason, UpgradeKind};
use crate::combat::{resolve_round, ClassKind, RoundChoice};
use crate::core::constants::*;
use crate::core::rng::RngSource;
use crate::error::{PurchaseError, TransitionError};
use crate::talents::{TalentId, TalentLedger};

pub struct GameEngine<R: RngSource> {
    ledger: TalentLedger,
    run: RunState,
    rng: R,
}

impl<R: RngSource> GameEngine<R> {
    pub fn new(ledger: TalentLedger, rng: R) -> Self {
        let run = RunState::pre_run(&ledger);
        Self { ledger, run, rng }
    }

    pub fn ledger(&self) -> &TalentLedger {
        &self.ledger
    }

    pub fn state(&self) -> &RunState {
        &self.run
    }

    pub fn phase(&self) -> RunPhase {
        self.run.phase
    }

    pub fn snapshot(&self) -> RunSnapshot {
        self.run.snapshot()
    }

    /// Access to the injected RNG, e.g. to queue scripted draws.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_ledger(self) -> TalentLedger {
        self.ledger
    }

    fn require(&self, action: &'static str, allowed: &[RunPhase]) -> Result<(), TransitionError> {
        if allowed.contains(&self.run.phase) {
            Ok(())
        } else {
            tracing::debug!(action, phase = %self.run.phase, "rejected action");
            Err(TransitionError::InvalidTransition {
                action,
                phase: self.run.phase,
            })
        }
    }

    /// Starts a run with `class`, deriving player stats from current talents.
    pub fn choose_class(&mut self, class: ClassKind) -> Result<RunSnapshot, TransitionError> {
        self.require("choose a class", &[RunPhase::SelectingClass])?;
        self.run = RunState::start(class, &self.ledger);
        tracing::info!(
            class = %class,
            attack = self.run.player.attack,
            defense = self.run.player.defense,
            max_hp = self.run.player.max_hp,
            shield = self.run.player.shield_max,
            "run started"
        );
        Ok(self.snapshot())
    }

    /// Plays one hand against a random enemy hand.
    pub fn submit_choice(&mut self, choice: RoundChoice) -> Result<RunSnapshot, TransitionError> {
        self.require("submit a choice", &[RunPhase::InRound])?;
        let Some(class) = self.run.class else {
            return Err(TransitionError::InvalidTransition {
                action: "submit a choice",
                phase: self.run.phase,
            });
        };

        let enemy_choice = self.rng.pick_choice();
        let ctx = self.run.round_context(class);
        let run = &mut self.run;
        let report = resolve_round(
            choice,
            enemy_choice,
            &ctx,
            &mut run.player,
            &mut run.enemy,
            &mut run.progress.charge_streak,
            &mut self.rng,
        );
        tracing::debug!(
            player = %choice,
            enemy = %enemy_choice,
            result = ?report.result,
            dealt = report.damage_dealt,
            taken = report.damage_taken,
            absorbed = report.shield_absorbed,
            healed = report.healed,
            "round resolved"
        );

        run.player_choice = Some(choice);
        run.enemy_choice = Some(enemy_choice);
        run.message = report.message();
        let enemy_defeated = report.enemy_defeated;
        let player_defeated = report.player_defeated;
        run.last_round = Some(report);

        if enemy_defeated {
            self.on_encounter_cleared();
        }
        if player_defeated {
            self.settle(SettlementReason::Defeated);
        }
        Ok(self.snapshot())
    }

    /// Post-victory bookkeeping, run synchronously once the enemy drops.
    fn on_encounter_cleared(&mut self) {
        let run = &mut self.run;
        let progress = &mut run.progress;

        if progress.is_boss_round {
            progress.boss_wins_count += 1;
            progress.token_standard *= TOKEN_STANDARD_BOSS_FACTOR;
            tracing::debug!(
                boss_wins = progress.boss_wins_count,
                token_standard = progress.token_standard,
                "boss defeated"
            );

            if progress.boss_wins_count >= BOSS_WINS_TO_COMPLETE {
                progress.is_boss_round = false;
                progress.last_win_was_boss = false;
                self.settle(SettlementReason::ChallengeComplete);
                return;
            }

            progress.last_win_was_boss = true;
            progress.is_boss_round = false;
            run.message = "Boss defeated! Choose a double upgrade to continue.".to_string();
        } else {
            progress.last_win_was_boss = false;
            progress.defeat_count += 1;

            let enemy = &mut run.enemy;
            enemy.base_max_hp += ENEMY_HP_GROWTH_PER_DEFEAT;
            if progress.defeat_count % ENEMY_STAT_STEP_INTERVAL == 0 {
                enemy.base_attack += ENEMY_ATTACK_STEP;
                enemy.base_defense += ENEMY_DEFENSE_STEP;
            }
            if progress.defeat_count % DEFEATS_PER_BOSS == 0 {
                progress.is_boss_round = true;
            }
            tracing::debug!(
                defeats = progress.defeat_count,
                enemy_max_hp = enemy.base_max_hp,
                enemy_attack = enemy.base_attack,
                enemy_defense = enemy.base_defense,
                boss_next = progress.is_boss_round,
                "enemy defeated"
            );
            run.message = "Enemy defeated! Choose an upgrade to continue.".to_string();
        }

        run.phase = RunPhase::AwaitingUpgrade;
    }

    /// Applies a post-victory upgrade and starts the next encounter.
    pub fn select_upgrade(&mut self, kind: UpgradeKind) -> Result<RunSnapshot, TransitionError> {
        self.require("select an upgrade", &[RunPhase::AwaitingUpgrade])?;
        let run = &mut self.run;
        let gains = kind.gains(run.progress.last_win_was_boss);

        let player = &mut run.player;
        player.attack += gains.attack;
        player.defense += gains.defense;
        player.max_hp += gains.max_hp;
        let healed = player.heal(gains.heal);

        run.message = match kind {
            UpgradeKind::Attack => format!("Upgraded! Attack +{}", gains.attack),
            UpgradeKind::Defense => format!("Upgraded! Defense +{}", gains.defense),
            UpgradeKind::MaxHp => format!(
                "Upgraded! Max HP +{}, restored {} HP (shield unaffected)",
                gains.max_hp, healed
            ),
        };
        run.message.push_str(". A new fight begins!");

        run.progress.last_win_was_boss = false;
        run.enemy.reset_hp(run.progress.is_boss_round);
        run.player_choice = None;
        run.enemy_choice = None;
        run.phase = RunPhase::InRound;
        Ok(self.snapshot())
    }

    /// Ends the run voluntarily and settles what was earned so far.
    pub fn force_settle(&mut self) -> Result<RunSnapshot, TransitionError> {
        self.require(
            "forfeit the run",
            &[RunPhase::InRound, RunPhase::AwaitingUpgrade],
        )?;
        self.settle(SettlementReason::Forfeit);
        Ok(self.snapshot())
    }

    fn settle(&mut self, reason: SettlementReason) {
        let run = &mut self.run;
        run.pending_reward = run.progress.token_reward();
        run.settlement = Some(reason);
        run.phase = RunPhase::Settled;
        run.message = match reason {
            SettlementReason::Defeated => "You were defeated. Settlement:",
            SettlementReason::Forfeit => "You ended the run. Settlement:",
            SettlementReason::ChallengeComplete => "Challenge complete!",
        }
        .to_string();
        tracing::info!(
            reason = ?reason,
            defeats = run.progress.defeat_count,
            boss_wins = run.progress.boss_wins_count,
            token_standard = run.progress.token_standard,
            reward = run.pending_reward,
            "run settled"
        );
    }

    /// Banks the pending reward and returns to class selection.
    pub fn claim_settlement(&mut self) -> Result<RunSnapshot, TransitionError> {
        self.require("claim a settlement", &[RunPhase::Settled])?;
        let reward = self.run.pending_reward;
        self.ledger.deposit(reward);
        tracing::info!(
            reward,
            balance = self.ledger.currency_balance,
            "settlement claimed"
        );
        self.run = RunState::pre_run(&self.ledger);
        Ok(self.snapshot())
    }

    /// Buys the next level of `talent`. Takes effect from the next run.
    pub fn purchase_talent(&mut self, talent: TalentId) -> Result<TalentLedger, PurchaseError> {
        self.ledger.purchase(talent)?;
        if self.run.phase == RunPhase::SelectingClass {
            self.run = RunState::pre_run(&self.ledger);
        }
        Ok(self.ledger.clone())
    }
}
