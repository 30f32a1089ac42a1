use crate::application::prediction::HybridEnsemble;
use crate::domain::game::{FeedRound, RoundResult};
use crate::infrastructure::repositories::InMemoryRoundStore;
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex, PoisonError};

/// What happened to a round handed to the processor.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundDisposition {
    Recorded(RoundResult),
    /// Same id as the last processed round; state untouched.
    Duplicate,
}

/// Turns normalized rounds into stored results for one variant.
///
/// The prediction attached to a round is computed from the history *before*
/// that round, and the whole read-predict-write sequence runs inside one
/// write-lock critical section of the store.
pub struct RoundProcessor {
    store: Arc<InMemoryRoundStore>,
    ensemble: HybridEnsemble,
    rng: Mutex<StdRng>,
}

impl RoundProcessor {
    /// Processor with an OS-seeded random source.
    pub fn new(store: Arc<InMemoryRoundStore>, ensemble: HybridEnsemble) -> Self {
        Self::with_rng(store, ensemble, StdRng::from_os_rng())
    }

    /// Processor whose noise is reproducible from `seed`.
    pub fn with_seed(store: Arc<InMemoryRoundStore>, ensemble: HybridEnsemble, seed: u64) -> Self {
        Self::with_rng(store, ensemble, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(store: Arc<InMemoryRoundStore>, ensemble: HybridEnsemble, rng: StdRng) -> Self {
        Self {
            store,
            ensemble,
            rng: Mutex::new(rng),
        }
    }

    pub fn store(&self) -> &Arc<InMemoryRoundStore> {
        &self.store
    }

    pub async fn process(&self, round: FeedRound) -> RoundDisposition {
        let ensemble = &self.ensemble;
        let rng = &self.rng;

        self.store
            .commit(move |state| {
                if state.is_duplicate(&round.round_id) {
                    return RoundDisposition::Duplicate;
                }

                let prior = state.history().chronological_outcomes();
                let prediction = {
                    let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                    ensemble.predict(&prior, &mut *rng)
                };

                let result = RoundResult {
                    round_id: round.round_id,
                    dice: round.dice,
                    sum: round.dice.sum(),
                    outcome: round.dice.outcome(),
                    predicted_outcome: prediction.outcome,
                    confidence: prediction.confidence,
                    votes: prediction.votes,
                    digest: round.digest,
                    observed_at: Utc::now(),
                };

                state.record(result.clone());
                RoundDisposition::Recorded(result)
            })
            .await
    }
}
