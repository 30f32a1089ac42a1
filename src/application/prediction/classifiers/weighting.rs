use super::OutcomeClassifier;
use crate::domain::game::Outcome;

/// Linear recency weighting: position `i` counts `(i + 1) / N`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRecent;

impl OutcomeClassifier for WeightedRecent {
    fn vote(&self, history: &[Outcome]) -> Outcome {
        if history.is_empty() {
            return Outcome::High;
        }

        let n = history.len() as f64;
        let (high, low) = history
            .iter()
            .enumerate()
            .fold((0.0_f64, 0.0_f64), |(high, low), (i, outcome)| {
                let weight = (i + 1) as f64 / n;
                if outcome.is_high() {
                    (high + weight, low)
                } else {
                    (high, low + weight)
                }
            });

        if high >= low { Outcome::High } else { Outcome::Low }
    }

    fn name(&self) -> &str {
        "WeightedRecent"
    }
}

/// Exponentially decaying weights walking back from the most recent round.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialDecay {
    pub decay: f64,
}

impl Default for ExponentialDecay {
    fn default() -> Self {
        Self { decay: 0.6 }
    }
}

impl OutcomeClassifier for ExponentialDecay {
    fn vote(&self, history: &[Outcome]) -> Outcome {
        if history.is_empty() {
            return Outcome::High;
        }

        let mut weight = 1.0_f64;
        let mut high = 0.0_f64;
        let mut low = 0.0_f64;
        for outcome in history.iter().rev() {
            if outcome.is_high() {
                high += weight;
            } else {
                low += weight;
            }
            weight *= self.decay;
        }

        // Ties go Low
        if high > low { Outcome::High } else { Outcome::Low }
    }

    fn name(&self) -> &str {
        "ExponentialDecay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prediction::classifiers::test_support::seq;
    use crate::domain::game::Outcome::{High, Low};

    #[test]
    fn test_weighted_recent_favours_late_entries() {
        // weights 1/4..4/4: L gets 1+2=3, H gets 3+4=7 (scaled)
        assert_eq!(WeightedRecent.vote(&seq("LLHH")), High);
        assert_eq!(WeightedRecent.vote(&seq("HHLL")), Low);
    }

    #[test]
    fn test_weighted_recent_tie_is_high() {
        // H: 1/4 + 4/4, L: 2/4 + 3/4
        assert_eq!(WeightedRecent.vote(&seq("HLLH")), High);
    }

    #[test]
    fn test_exponential_decay_most_recent_dominates() {
        let classifier = ExponentialDecay::default();
        // newest L = 1.0 vs older H = 0.6 + 0.36
        assert_eq!(classifier.vote(&seq("HHL")), Low);
        // newest H = 1.0, L = 0.6 + 0.36 + 0.216 = 1.176
        assert_eq!(classifier.vote(&seq("LLLH")), Low);
        assert_eq!(classifier.vote(&seq("LLH")), High);
    }

    #[test]
    fn test_exponential_decay_empty_is_high() {
        assert_eq!(ExponentialDecay::default().vote(&[]), High);
    }
}
