use std::collections::VecDeque;

use tracing::debug;

use super::digits::{DigitDraw, DigitPair};
use crate::env::{DrawContext, RngOracle, compute_seed};

/// Percentile roller.
///
/// Each roll draws two independent digits from the [`RngOracle`]. Forced
/// results queued with [`DiceRoller::force_result`] are handed out first, in
/// the order they were queued, without touching the random source.
#[derive(Clone, Debug, Default)]
pub struct DiceRoller {
    forced: VecDeque<DigitPair>,
}

impl DiceRoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the draws that produce `target` for the next roll.
    ///
    /// Targets outside `1..=100` are clamped, so forcing `0` yields `1`.
    pub fn force_result(&mut self, target: u8) {
        let draws = DigitPair::predetermined(target);
        if draws.value() != target {
            debug!(target, forced = draws.value(), "forced result clamped");
        }
        self.forced.push_back(draws);
    }

    /// Queues exact draws for the next roll.
    pub fn force_draws(&mut self, draws: DigitPair) {
        self.forced.push_back(draws);
    }

    /// Number of forced rolls not yet consumed.
    pub fn pending_forced(&self) -> usize {
        self.forced.len()
    }

    pub fn clear_forced(&mut self) {
        self.forced.clear();
    }

    /// Rolls both digits.
    ///
    /// # Arguments
    ///
    /// * `rng` - Deterministic random source
    /// * `seed` - Seed for this roll; the two digits use independent sub-seeds
    pub fn roll(&mut self, rng: &dyn RngOracle, seed: u64) -> DigitPair {
        if let Some(forced) = self.forced.pop_front() {
            debug!(draws = %forced, "forced roll");
            return forced;
        }

        let tens = rng.digit(compute_seed(seed, 0, 0, DrawContext::TensDigit as u32));
        let ones = rng.digit(compute_seed(seed, 0, 0, DrawContext::OnesDigit as u32));
        let draws = DigitPair {
            tens: DigitDraw::new(tens),
            ones: DigitDraw::new(ones),
        };
        debug!(draws = %draws, "rolled");
        draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn forced_results_come_first_in_order() {
        let mut roller = DiceRoller::new();
        roller.force_result(100);
        roller.force_result(42);
        assert_eq!(roller.pending_forced(), 2);

        assert_eq!(roller.roll(&PcgRng, 1).value(), 100);
        assert_eq!(roller.roll(&PcgRng, 1).value(), 42);
        assert_eq!(roller.pending_forced(), 0);
    }

    #[test]
    fn out_of_range_forced_results_are_clamped() {
        let mut roller = DiceRoller::new();
        roller.force_result(0);
        roller.force_result(250);
        assert_eq!(roller.roll(&PcgRng, 1).value(), 1);
        assert_eq!(roller.roll(&PcgRng, 1).value(), 100);
    }

    #[test]
    fn random_rolls_are_seed_deterministic_and_in_range() {
        let mut roller = DiceRoller::new();
        for seed in 0..300u64 {
            let first = roller.roll(&PcgRng, seed);
            let again = roller.roll(&PcgRng, seed);
            assert_eq!(first, again);
            assert!((1..=100).contains(&first.value()));
        }
    }
}
