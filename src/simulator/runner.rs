//! Main simulation runner.
//!
//! Drives the real [`GameEngine`] with random hands, so simulated numbers
//! match what a player would see. Statistics are collected from the
//! snapshots the engine returns.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::combat::ClassKind;
use crate::core::rng::{RandSource, RngSource};
use crate::error::TransitionError;
use crate::run::{GameEngine, RunPhase};
use crate::talents::{TalentId, TalentLedger};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);
    let mut ledger = TalentLedger::new();

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };
        let class = config
            .class
            .unwrap_or(ClassKind::ALL[run_idx as usize % ClassKind::ALL.len()]);
        let starting = if config.meta_progression {
            ledger.clone()
        } else {
            TalentLedger::new()
        };

        let (mut stats, after) = match simulate_single_run(config, class, starting, rng) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(run = run_idx, error = %err, "simulated run aborted");
                continue;
            }
        };

        if config.meta_progression {
            ledger = after;
            stats.talents_bought = spend_tokens(&mut ledger);
        }

        if config.verbosity >= 2 {
            tracing::info!(
                run = run_idx + 1,
                of = config.num_runs,
                class = %stats.class,
                defeats = stats.defeat_count,
                boss_wins = stats.boss_wins_count,
                rounds = stats.rounds_played,
                reward = stats.reward,
                talents_bought = stats.talents_bought,
                "run finished"
            );
        }
        all_runs.push(stats);
    }

    let final_ledger = config.meta_progression.then_some(ledger);
    SimReport::from_runs(all_runs, final_ledger)
}

/// Plays one run from class selection through the claimed settlement.
fn simulate_single_run(
    config: &SimConfig,
    class: ClassKind,
    ledger: TalentLedger,
    rng: ChaCha8Rng,
) -> Result<(RunStats, TalentLedger), TransitionError> {
    let mut engine = GameEngine::new(ledger, RandSource(rng));
    let mut stats = RunStats::new(class);
    engine.choose_class(class)?;

    while stats.rounds_played < config.max_rounds_per_run {
        match engine.phase() {
            RunPhase::InRound => {
                let hand = engine.rng_mut().pick_choice();
                let snapshot = engine.submit_choice(hand)?;
                if let Some(round) = &snapshot.last_round {
                    stats.record_round(round);
                }
            }
            RunPhase::AwaitingUpgrade => {
                let upgrade = config.upgrade_policy.choose(&engine.snapshot());
                engine.select_upgrade(upgrade)?;
                stats.upgrades_taken += 1;
            }
            RunPhase::SelectingClass | RunPhase::Settled => break,
        }
    }

    if engine.phase() != RunPhase::Settled {
        stats.timed_out = true;
        engine.force_settle()?;
    }
    stats.finish(&engine.snapshot());
    engine.claim_settlement()?;
    Ok((stats, engine.into_ledger()))
}

/// Buys the cheapest affordable talent until nothing is affordable.
/// Returns how many levels were bought.
pub fn spend_tokens(ledger: &mut TalentLedger) -> u32 {
    let mut bought = 0;
    loop {
        let cheapest = TalentId::ALL
            .into_iter()
            .filter(|&talent| ledger.can_afford(talent))
            .filter_map(|talent| ledger.next_cost(talent).map(|cost| (talent, cost)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let Some((talent, _)) = cheapest else {
            return bought;
        };
        if ledger.purchase(talent).is_err() {
            return bought;
        }
        bought += 1;
    }
}
