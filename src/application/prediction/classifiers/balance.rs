use super::{OutcomeClassifier, last_or_high};
use crate::domain::game::Outcome;

/// When the history is nearly balanced, expect a swing; otherwise side with
/// the majority.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyBalance;

impl OutcomeClassifier for EntropyBalance {
    fn vote(&self, history: &[Outcome]) -> Outcome {
        let Some(&last) = history.last() else {
            return Outcome::High;
        };

        let highs = history.iter().filter(|o| o.is_high()).count();
        let lows = history.len() - highs;
        let diff = highs.abs_diff(lows);

        // diff is an integer, so comparing against n / 5 truncated is exact
        if diff <= history.len() / 5 {
            last.opposite()
        } else if highs > lows {
            Outcome::High
        } else {
            Outcome::Low
        }
    }

    fn name(&self) -> &str {
        "EntropyBalance"
    }
}

/// Leans against a lopsided High ratio.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyRatio {
    pub upper: f64,
    pub lower: f64,
}

impl Default for FrequencyRatio {
    fn default() -> Self {
        Self {
            upper: 0.62,
            lower: 0.38,
        }
    }
}

impl OutcomeClassifier for FrequencyRatio {
    fn vote(&self, history: &[Outcome]) -> Outcome {
        if history.is_empty() {
            return Outcome::High;
        }

        let highs = history.iter().filter(|o| o.is_high()).count();
        let ratio = highs as f64 / history.len() as f64;

        if ratio > self.upper {
            Outcome::Low
        } else if ratio < self.lower {
            Outcome::High
        } else {
            last_or_high(history)
        }
    }

    fn name(&self) -> &str {
        "FrequencyRatio"
    }
}
