use super::classifiers::{OutcomeClassifier, default_classifiers};
use crate::domain::game::Outcome;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;

pub const MIN_CONFIDENCE: i32 = 50;
pub const MAX_CONFIDENCE: i32 = 99;

/// Ensemble output for the next round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub outcome: Outcome,
    pub confidence: u8,
    /// Post-noise vote of every classifier, in classifier order.
    pub votes: Vec<Outcome>,
}

impl Prediction {
    fn cold_start() -> Self {
        Self {
            outcome: Outcome::High,
            confidence: MIN_CONFIDENCE as u8,
            votes: Vec::new(),
        }
    }
}

/// Hybrid Ensemble
///
/// Majority vote over the classifiers with two sources of noise:
/// - each vote is flipped with `flip_probability` before counting
/// - the confidence gets a uniform jitter in `[-jitter, +jitter]`
///
/// The random source is passed in, so a seeded generator reproduces a run.
#[derive(Clone)]
pub struct HybridEnsemble {
    classifiers: Vec<Arc<dyn OutcomeClassifier>>,
    flip_probability: f64,
    jitter: i32,
}

impl HybridEnsemble {
    pub fn new(
        classifiers: Vec<Arc<dyn OutcomeClassifier>>,
        flip_probability: f64,
        jitter: i32,
    ) -> Self {
        Self {
            classifiers,
            flip_probability: flip_probability.clamp(0.0, 1.0),
            jitter: jitter.max(0),
        }
    }

    /// Ten default classifiers, 5% vote flips, ±5 confidence jitter.
    pub fn standard() -> Self {
        Self::new(default_classifiers(), 0.05, 5)
    }

    /// Same classifiers without any noise.
    pub fn noiseless() -> Self {
        Self::new(default_classifiers(), 0.0, 0)
    }

    pub fn predict<R: Rng>(&self, history: &[Outcome], rng: &mut R) -> Prediction {
        if history.is_empty() || self.classifiers.is_empty() {
            return Prediction::cold_start();
        }

        let mut votes = Vec::with_capacity(self.classifiers.len());
        let mut high_votes = 0_usize;
        let mut low_votes = 0_usize;

        for classifier in &self.classifiers {
            let mut vote = classifier.vote(history);
            if self.flip_probability > 0.0 && rng.random_bool(self.flip_probability) {
                vote = vote.opposite();
            }
            match vote {
                Outcome::High => high_votes += 1,
                Outcome::Low => low_votes += 1,
            }
            votes.push(vote);
        }

        let outcome = if high_votes >= low_votes {
            Outcome::High
        } else {
            Outcome::Low
        };

        let agreement = high_votes.max(low_votes) as f64 / self.classifiers.len() as f64;
        let mut confidence = (100.0 * agreement).round() as i32;
        if self.jitter > 0 {
            confidence += rng.random_range(-self.jitter..=self.jitter);
        }
        let confidence = confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u8;

        Prediction {
            outcome,
            confidence,
            votes,
        }
    }
}

impl Default for HybridEnsemble {
    fn default() -> Self {
        Self::standard()
    }
}

// Arc<dyn OutcomeClassifier> has no Debug
impl std::fmt::Debug for HybridEnsemble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridEnsemble")
            .field("num_classifiers", &self.classifiers.len())
            .field("flip_probability", &self.flip_probability)
            .field("jitter", &self.jitter)
            .finish()
    }
}
