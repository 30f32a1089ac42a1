//! In-memory round store.
//!
//! One store per variant holds the latest snapshot, the bounded history and
//! the last processed round id behind a single `RwLock`, so readers always see
//! the three updated together.
//!
//! Data is lost on restart; the upstream feed is the source of truth.

use crate::domain::game::{RoundResult, Variant, VariantState};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Point-in-time copy of a variant's state.
#[derive(Debug, Clone)]
pub struct VariantSnapshot {
    pub variant: Variant,
    pub latest: Option<RoundResult>,
    pub history: Vec<RoundResult>,
}

/// Both variants' histories, read under both locks.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CombinedHistory {
    pub taixiu: Vec<RoundResult>,
    pub taixiumd5: Vec<RoundResult>,
}

#[derive(Debug)]
pub struct InMemoryRoundStore {
    state: RwLock<VariantState>,
}

impl InMemoryRoundStore {
    pub fn new(variant: Variant) -> Self {
        Self {
            state: RwLock::new(VariantState::new(variant)),
        }
    }

    /// Holds the write lock so tests can queue writers behind it.
    #[cfg(test)]
    pub(crate) async fn hold_write(&self) -> tokio::sync::RwLockWriteGuard<'_, VariantState> {
        self.state.write().await
    }

    pub fn shared(variant: Variant) -> Arc<Self> {
        Arc::new(Self::new(variant))
    }

    /// Run `f` with exclusive access. The whole closure is one critical section.
    pub async fn commit<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut VariantState) -> T,
    {
        let mut state = self.state.write().await;
        f(&mut state)
    }

    pub async fn variant(&self) -> Variant {
        self.state.read().await.variant
    }

    pub async fn latest(&self) -> Option<RoundResult> {
        self.state.read().await.latest().cloned()
    }

    /// Most recent first, at most `limit` entries.
    pub async fn history(&self, limit: usize) -> Vec<RoundResult> {
        self.state.read().await.history().recent(limit)
    }

    pub async fn history_len(&self) -> usize {
        self.state.read().await.history().len()
    }

    pub async fn snapshot(&self) -> VariantSnapshot {
        let state = self.state.read().await;
        VariantSnapshot {
            variant: state.variant,
            latest: state.latest().cloned(),
            history: state.history().to_vec(),
        }
    }
}

/// Reads both histories while holding both read locks.
pub async fn combined_history(
    plain: &InMemoryRoundStore,
    digest: &InMemoryRoundStore,
) -> CombinedHistory {
    let plain_state = plain.state.read().await;
    let digest_state = digest.state.read().await;
    CombinedHistory {
        taixiu: plain_state.history().to_vec(),
        taixiumd5: digest_state.history().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::{Dice, Outcome, RoundId};
    use chrono::Utc;

    fn result(id: u64) -> RoundResult {
        let dice = Dice::new(2, 2, 2).unwrap();
        RoundResult {
            round_id: RoundId::from(id),
            dice,
            sum: dice.sum(),
            outcome: dice.outcome(),
            predicted_outcome: Outcome::High,
            confidence: 50,
            votes: Vec::new(),
            digest: None,
            observed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = InMemoryRoundStore::new(Variant::Plain);
        assert!(store.latest().await.is_none());
        assert!(store.history(50).await.is_empty());
        assert_eq!(store.variant().await, Variant::Plain);
    }

    #[tokio::test]
    async fn test_commit_updates_snapshot_and_history_together() {
        let store = InMemoryRoundStore::new(Variant::Digest);
        store.commit(|state| state.record(result(1))).await;
        store.commit(|state| state.record(result(2))).await;

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.history.len(), 2);
        assert_eq!(snapshot.latest.as_ref(), snapshot.history.first());
        assert_eq!(store.history(1).await[0].round_id, RoundId::from(2));
    }

    #[tokio::test]
    async fn test_combined_history_keeps_variants_apart() {
        let plain = InMemoryRoundStore::new(Variant::Plain);
        let digest = InMemoryRoundStore::new(Variant::Digest);
        plain.commit(|state| state.record(result(10))).await;

        let combined = combined_history(&plain, &digest).await;
        assert_eq!(combined.taixiu.len(), 1);
        assert!(combined.taixiumd5.is_empty());
    }
}
