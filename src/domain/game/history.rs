use super::outcome::Outcome;
use super::round::RoundResult;
use std::collections::VecDeque;

/// Maximum number of rounds retained per variant.
pub const HISTORY_CAPACITY: usize = 50;

/// Bounded log of processed rounds, most recent first.
#[derive(Debug, Clone)]
pub struct RoundHistory {
    entries: VecDeque<RoundResult>,
    capacity: usize,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepends a round, evicting the oldest entries past capacity.
    pub fn push_latest(&mut self, result: RoundResult) {
        self.entries.push_front(result);
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&RoundResult> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundResult> {
        self.entries.iter()
    }

    /// Outcomes oldest first, the order the classifiers expect.
    pub fn chronological_outcomes(&self) -> Vec<Outcome> {
        self.entries.iter().rev().map(|r| r.outcome).collect()
    }

    /// Up to `limit` rounds, most recent first.
    pub fn recent(&self, limit: usize) -> Vec<RoundResult> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn to_vec(&self) -> Vec<RoundResult> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for RoundHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::round::{Dice, RoundId};
    use chrono::Utc;

    fn round(id: u64, d: (i64, i64, i64)) -> RoundResult {
        let dice = Dice::new(d.0, d.1, d.2).unwrap();
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

    #[test]
    fn test_push_latest_keeps_most_recent_first() {
        let mut history = RoundHistory::new();
        history.push_latest(round(1, (1, 1, 1)));
        history.push_latest(round(2, (6, 6, 6)));

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().round_id, RoundId::from(2));
        assert_eq!(
            history.chronological_outcomes(),
            vec![Outcome::Low, Outcome::High]
        );
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = RoundHistory::new();
        for id in 0..(HISTORY_CAPACITY as u64 + 7) {
            history.push_latest(round(id, (2, 3, 4)));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(
            history.latest().unwrap().round_id,
            RoundId::from(HISTORY_CAPACITY as u64 + 6)
        );
        // Oldest survivor is id 7
        assert_eq!(
            history.iter().last().unwrap().round_id,
            RoundId::from(7)
        );
    }

    #[test]
    fn test_recent_limit() {
        let mut history = RoundHistory::with_capacity(5);
        for id in 0..5 {
            history.push_latest(round(id, (5, 5, 5)));
        }
        let recent = history.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].round_id, RoundId::from(4));
        assert_eq!(history.recent(100).len(), 5);
    }
}
