//! Injectable randomness for round resolution.
//!
//! Each round consumes draws in a fixed order: one [`RngSource::pick_choice`]
//! for the enemy hand, then at most one [`RngSource::roll_unit`] for the
//! Lucky Warrior check. Replaying the same draws replays the same run.

use std::collections::VecDeque;

use rand::Rng;

use crate::combat::RoundChoice;

/// Source of the two kinds of draws the engine needs.
pub trait RngSource {
    /// Uniformly pick one of the three hands.
    fn pick_choice(&mut self) -> RoundChoice;

    /// Uniform draw in `[0, 1)`.
    fn roll_unit(&mut self) -> f64;
}

/// Adapts any `rand` generator (thread RNG, ChaCha, ...) into an [`RngSource`].
#[derive(Debug, Clone)]
pub struct RandSource<R>(pub R);

impl<R: Rng> RngSource for RandSource<R> {
    fn pick_choice(&mut self) -> RoundChoice {
        RoundChoice::ALL[self.0.gen_range(0..RoundChoice::ALL.len())]
    }

    fn roll_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays queued draws in order, for tests and recorded sessions.
///
/// When a queue runs dry it falls back to `Rock` and `0.99` (no lucky crit),
/// so a test only has to script the draws it cares about.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    choices: VecDeque<RoundChoice>,
    units: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_choices(choices: impl IntoIterator<Item = RoundChoice>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            units: VecDeque::new(),
        }
    }

    pub fn push_choice(&mut self, choice: RoundChoice) {
        self.choices.push_back(choice);
    }

    pub fn push_unit(&mut self, value: f64) {
        self.units.push_back(value);
    }

    /// Draws still queued: (choices, units).
    pub fn remaining(&self) -> (usize, usize) {
        (self.choices.len(), self.units.len())
    }
}

impl RngSource for ScriptedRng {
    fn pick_choice(&mut self) -> RoundChoice {
        self.choices.pop_front().unwrap_or(RoundChoice::Rock)
    }

    fn roll_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.99)
    }
}
