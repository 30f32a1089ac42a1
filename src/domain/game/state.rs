use super::history::RoundHistory;
use super::round::{RoundId, RoundResult};
use super::variant::Variant;

/// Everything tracked for one variant. Guarded as a unit by its store.
#[derive(Debug, Clone)]
pub struct VariantState {
    pub variant: Variant,
    latest: Option<RoundResult>,
    history: RoundHistory,
    last_round_id: Option<RoundId>,
}

impl VariantState {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            latest: None,
            history: RoundHistory::new(),
            last_round_id: None,
        }
    }

    pub fn latest(&self) -> Option<&RoundResult> {
        self.latest.as_ref()
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn is_duplicate(&self, round_id: &RoundId) -> bool {
        self.last_round_id.as_ref() == Some(round_id)
    }

    /// Replaces the snapshot, prepends to history and remembers the round id.
    pub fn record(&mut self, result: RoundResult) {
        self.last_round_id = Some(result.round_id.clone());
        self.history.push_latest(result.clone());
        self.latest = Some(result);
    }
}
