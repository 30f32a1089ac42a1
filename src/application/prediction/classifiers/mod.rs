//! Heuristic classifiers over a chronological outcome history.
//!
//! Every classifier is a pure function of the history (oldest first, most
//! recent last). Randomness belongs to the aggregator, never here.

mod balance;
mod streaks;
mod weighting;
mod windows;

pub use balance::{EntropyBalance, FrequencyRatio};
pub use streaks::{Alternation, LongChainReversal, Momentum};
pub use weighting::{ExponentialDecay, WeightedRecent};
pub use windows::{Mirror, PatternRepeat, WindowMajority};

use crate::domain::game::Outcome;
use std::sync::Arc;

pub trait OutcomeClassifier: Send + Sync {
    /// Vote for the next round given past outcomes, oldest first.
    fn vote(&self, history: &[Outcome]) -> Outcome;

    fn name(&self) -> &str;
}

/// The ten classifiers in their fixed voting order.
pub fn default_classifiers() -> Vec<Arc<dyn OutcomeClassifier>> {
    vec![
        Arc::new(WeightedRecent),
        Arc::new(ExponentialDecay::default()),
        Arc::new(LongChainReversal::default()),
        Arc::new(WindowMajority::default()),
        Arc::new(Alternation),
        Arc::new(PatternRepeat),
        Arc::new(Mirror),
        Arc::new(EntropyBalance),
        Arc::new(Momentum),
        Arc::new(FrequencyRatio::default()),
    ]
}

/// Last outcome, or High when nothing has been seen yet.
pub(crate) fn last_or_high(history: &[Outcome]) -> Outcome {
    history.last().copied().unwrap_or(Outcome::High)
}

/// High when High fills at least half of `window` (exact half, no rounding).
pub(crate) fn majority_of(window: &[Outcome]) -> Outcome {
    let highs = window.iter().filter(|o| o.is_high()).count();
    if 2 * highs >= window.len() {
        Outcome::High
    } else {
        Outcome::Low
    }
}
