use super::OutcomeClassifier;
use crate::domain::game::Outcome;

/// Bets against a streak once it reaches `min_chain`.
#[derive(Debug, Clone, Copy)]
pub struct LongChainReversal {
    pub min_chain: usize,
}

impl Default for LongChainReversal {
    fn default() -> Self {
        Self { min_chain: 3 }
    }
}

impl LongChainReversal {
    fn trailing_run(history: &[Outcome]) -> usize {
        match history.last() {
            Some(last) => history.iter().rev().take_while(|o| *o == last).count(),
            None => 0,
        }
    }
}

impl OutcomeClassifier for LongChainReversal {
    fn vote(&self, history: &[Outcome]) -> Outcome {
        let Some(&last) = history.last() else {
            return Outcome::High;
        };

        if Self::trailing_run(history) >= self.min_chain {
            last.opposite()
        } else {
            last
        }
    }

    fn name(&self) -> &str {
        "LongChainReversal"
    }
}

/// Detects a ping-pong pattern over the last four rounds and follows it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Alternation;

impl OutcomeClassifier for Alternation {
    fn vote(&self, history: &[Outcome]) -> Outcome {
        if history.len() < 4 {
            return Outcome::High;
        }

        let tail = &history[history.len() - 4..];
        let flips = tail.windows(2).filter(|pair| pair[0] != pair[1]).count();
        let last = tail[3];

        if flips >= 3 { last.opposite() } else { last }
    }

    fn name(&self) -> &str {
        "Alternation"
    }
}

/// +1 for every repeated neighbour, -1 for every change.
#[derive(Debug, Clone, Copy, Default)]
pub struct Momentum;

impl OutcomeClassifier for Momentum {
    fn vote(&self, history: &[Outcome]) -> Outcome {
        if history.len() < 2 {
            return Outcome::High;
        }

        let score: i64 = history
            .windows(2)
            .map(|pair| if pair[0] == pair[1] { 1 } else { -1 })
            .sum();
        let last = history[history.len() - 1];

        if score > 0 { last } else { last.opposite() }
    }

    fn name(&self) -> &str {
        "Momentum"
    }
}
