//! Simulation report generation.

use serde::Serialize;

use crate::combat::{ClassKind, RoundReport, RoundResult, SpecialTrigger};
use crate::run::{RunSnapshot, SettlementReason};
use crate::talents::TalentLedger;

/// Outcome of one simulated run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub class: ClassKind,
    pub settlement: Option<SettlementReason>,
    /// Forfeited after hitting the round limit
    pub timed_out: bool,
    pub rounds_played: u64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    pub lucky_strikes: u64,
    pub charge_bursts: u64,
    pub upgrades_taken: u32,
    pub defeat_count: u32,
    pub boss_wins_count: u32,
    pub token_standard: f64,
    pub reward: f64,
    pub final_attack: u32,
    pub final_defense: u32,
    pub final_max_hp: u32,
    /// Talent levels bought after this run's settlement (meta-progression only)
    pub talents_bought: u32,
}

impl RunStats {
    pub fn new(class: ClassKind) -> Self {
        Self {
            class,
            settlement: None,
            timed_out: false,
            rounds_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            lucky_strikes: 0,
            charge_bursts: 0,
            upgrades_taken: 0,
            defeat_count: 0,
            boss_wins_count: 0,
            token_standard: 0.0,
            reward: 0.0,
            final_attack: 0,
            final_defense: 0,
            final_max_hp: 0,
            talents_bought: 0,
        }
    }

    pub fn record_round(&mut self, round: &RoundReport) {
        self.rounds_played += 1;
        match round.result {
            RoundResult::Win => self.wins += 1,
            RoundResult::Lose => self.losses += 1,
            RoundResult::Draw => self.draws += 1,
        }
        match round.special {
            Some(SpecialTrigger::LuckyStrike { .. }) => self.lucky_strikes += 1,
            Some(SpecialTrigger::ChargeBurst { .. }) => self.charge_bursts += 1,
            None => {}
        }
    }

    /// Copy the final numbers out of a settled run.
    pub fn finish(&mut self, settled: &RunSnapshot) {
        self.settlement = settled.settlement;
        self.defeat_count = settled.progress.defeat_count;
        self.boss_wins_count = settled.progress.boss_wins_count;
        self.token_standard = settled.progress.token_standard;
        self.reward = settled.pending_reward;
        self.final_attack = settled.player.attack;
        self.final_defense = settled.player.defense;
        self.final_max_hp = settled.player.max_hp;
    }

    pub fn completed(&self) -> bool {
        self.settlement == Some(SettlementReason::ChallengeComplete)
    }
}

/// Averages for the runs played with one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    pub class: ClassKind,
    pub runs: u32,
    pub avg_defeats: f64,
    pub avg_boss_wins: f64,
    pub avg_reward: f64,
    pub completion_rate: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_defeated: u32,
    pub runs_timed_out: u32,

    pub avg_rounds: f64,
    pub avg_defeats: f64,
    pub avg_boss_wins: f64,
    pub avg_reward: f64,
    pub max_reward: f64,
    pub total_reward: f64,

    // Hand outcomes across all rounds
    pub win_rate: f64,
    pub draw_rate: f64,
    pub lucky_strikes: u64,
    pub charge_bursts: u64,

    pub per_class: Vec<ClassSummary>,

    /// Ledger after the last run (meta-progression only)
    pub final_ledger: Option<TalentLedger>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, final_ledger: Option<TalentLedger>) -> Self {
        let n = runs.len();
        let count_reason = |reason: SettlementReason| {
            runs.iter()
                .filter(|r| !r.timed_out && r.settlement == Some(reason))
                .count() as u32
        };
        let runs_completed = count_reason(SettlementReason::ChallengeComplete);
        let runs_defeated = count_reason(SettlementReason::Defeated);
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;

        let total_rounds: u64 = runs.iter().map(|r| r.rounds_played).sum();
        let total_wins: u64 = runs.iter().map(|r| r.wins).sum();
        let total_draws: u64 = runs.iter().map(|r| r.draws).sum();
        let rate = |part: u64| {
            if total_rounds == 0 {
                0.0
            } else {
                part as f64 / total_rounds as f64
            }
        };

        let per_class = ClassKind::ALL
            .iter()
            .filter_map(|&class| {
                let picked: Vec<&RunStats> = runs.iter().filter(|r| r.class == class).collect();
                let count = picked.len();
                if count == 0 {
                    return None;
                }
                Some(ClassSummary {
                    class,
                    runs: count as u32,
                    avg_defeats: mean(picked.iter().map(|r| r.defeat_count as f64), count),
                    avg_boss_wins: mean(picked.iter().map(|r| r.boss_wins_count as f64), count),
                    avg_reward: mean(picked.iter().map(|r| r.reward), count),
                    completion_rate: picked.iter().filter(|r| r.completed()).count() as f64
                        / count as f64,
                })
            })
            .collect();

        Self {
            num_runs: n as u32,
            runs_completed,
            runs_defeated,
            runs_timed_out,
            avg_rounds: mean(runs.iter().map(|r| r.rounds_played as f64), n),
            avg_defeats: mean(runs.iter().map(|r| r.defeat_count as f64), n),
            avg_boss_wins: mean(runs.iter().map(|r| r.boss_wins_count as f64), n),
            avg_reward: mean(runs.iter().map(|r| r.reward), n),
            max_reward: runs.iter().map(|r| r.reward).fold(0.0, f64::max),
            total_reward: runs.iter().map(|r| r.reward).sum(),
            win_rate: rate(total_wins),
            draw_rate: rate(total_draws),
            lucky_strikes: runs.iter().map(|r| r.lucky_strikes).sum(),
            charge_bursts: runs.iter().map(|r| r.charge_bursts).sum(),
            per_class,
            final_ledger,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} completed, {} defeated, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_defeated, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Rounds:        {:.1}\n", self.avg_rounds));
        report.push_str(&format!("  Avg Defeats:       {:.1}\n", self.avg_defeats));
        report.push_str(&format!("  Avg Boss Wins:     {:.2}\n", self.avg_boss_wins));
        report.push_str(&format!("  Win Rate:          {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Draw Rate:         {:.1}%\n", self.draw_rate * 100.0));
        report.push_str(&format!("  Lucky Strikes:     {}\n", self.lucky_strikes));
        report.push_str(&format!("  Charge Bursts:     {}\n\n", self.charge_bursts));

        report.push_str("── TOKENS ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Reward:        {:.1}\n", self.avg_reward));
        report.push_str(&format!("  Max Reward:        {:.1}\n", self.max_reward));
        report.push_str(&format!("  Total Earned:      {:.1}\n\n", self.total_reward));

        report.push_str("── CLASSES ──────────────────────────────────────────────────────\n");
        report.push_str("  Class            Runs   Defeats   Bosses   Reward   Clear%\n");
        for summary in &self.per_class {
            report.push_str(&format!(
                "  {:<15} {:5}   {:7.1}   {:6.2}   {:6.1}   {:5.1}\n",
                summary.class.name(),
                summary.runs,
                summary.avg_defeats,
                summary.avg_boss_wins,
                summary.avg_reward,
                summary.completion_rate * 100.0
            ));
        }
        report.push('\n');

        if let Some(ledger) = &self.final_ledger {
            report.push_str("── TALENTS AFTER LAST RUN ───────────────────────────────────────\n");
            report.push_str(&format!("  Balance: {:.1}\n", ledger.currency_balance));
            for talent in crate::talents::TalentId::ALL {
                let level = ledger.level(talent);
                report.push_str(&format!(
                    "  {:<20} Lv {:>3}  {}\n",
                    talent.name(),
                    level,
                    talent.effect_label(level)
                ));
            }
            report.push('\n');
        }

        if self.num_runs > 0 && self.avg_defeats < 3.0 {
            report.push_str("  ⚠️  Most runs die in the first few fights - early enemies too strong?\n");
        }
        if self.num_runs > 0 && self.runs_timed_out * 2 > self.num_runs {
            report.push_str("  ⚠️  Most runs hit the round limit - raise --rounds?\n");
        }

        report.push_str("═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(class: ClassKind, reason: SettlementReason, defeats: u32, reward: f64) -> RunStats {
        RunStats {
            settlement: Some(reason),
            rounds_played: 10,
            wins: 4,
            draws: 3,
            losses: 3,
            defeat_count: defeats,
            reward,
            ..RunStats::new(class)
        }
    }

    #[test]
    fn test_report_generation() {
        let runs = vec![
            run(ClassKind::LuckyWarrior, SettlementReason::Defeated, 6, 6.0),
            run(ClassKind::LuckyWarrior, SettlementReason::Defeated, 4, 4.0),
            run(ClassKind::HealerPriest, SettlementReason::ChallengeComplete, 100, 1200.0),
        ];

        let report = SimReport::from_runs(runs, None);
        assert_eq!(report.num_runs, 3);
        assert_eq!(report.runs_completed, 1);
        assert_eq!(report.runs_defeated, 2);
        assert!((report.win_rate - 0.4).abs() < 1e-9);
        assert_eq!(report.max_reward, 1200.0);
        assert_eq!(report.per_class.len(), 2);
        assert_eq!(report.per_class[0].class, ClassKind::LuckyWarrior);
        assert!((report.per_class[0].avg_defeats - 5.0).abs() < 1e-9);
        assert_eq!(report.per_class[1].completion_rate, 1.0);
    }

    #[test]
    fn test_timed_out_runs_counted_separately() {
        let mut timed_out = run(ClassKind::ChargeFighter, SettlementReason::Forfeit, 50, 80.0);
        timed_out.timed_out = true;
        let report = SimReport::from_runs(vec![timed_out], None);
        assert_eq!(report.runs_timed_out, 1);
        assert_eq!(report.runs_defeated, 0);
    }

    #[test]
    fn test_empty_report_has_no_nans() {
        let report = SimReport::from_runs(Vec::new(), None);
        assert_eq!(report.avg_reward, 0.0);
        assert_eq!(report.win_rate, 0.0);
        assert!(report.to_text().contains("SIMULATION REPORT"));
    }

    #[test]
    fn test_json_skips_run_stats() {
        let report = SimReport::from_runs(
            vec![run(ClassKind::LuckyWarrior, SettlementReason::Defeated, 1, 1.0)],
            Some(TalentLedger::with_balance(3.0)),
        );
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["num_runs"], 1);
        assert!(json.get("run_stats").is_none());
        assert_eq!(json["final_ledger"]["currency_balance"], 3.0);
    }
}
