use super::{OutcomeClassifier, last_or_high, majority_of};
use crate::domain::game::Outcome;

/// Majority over the most recent `window` rounds.
#[derive(Debug, Clone, Copy)]
pub struct WindowMajority {
    pub window: usize,
}

impl Default for WindowMajority {
    fn default() -> Self {
        Self { window: 5 }
    }
}

impl WindowMajority {
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl OutcomeClassifier for WindowMajority {
    fn vote(&self, history: &[Outcome]) -> Outcome {
        if history.is_empty() {
            return Outcome::High;
        }

        let start = history.len().saturating_sub(self.window);
        majority_of(&history[start..])
    }

    fn name(&self) -> &str {
        "WindowMajority"
    }
}

/// Looks for the trailing block repeating the block right before it.
///
/// Block lengths 2 to 6 are tried shortest first; the first match votes for
/// the first outcome of the trailing block. Without a match it falls back to a
/// four-round majority.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternRepeat;

const PATTERN_MAX_LEN: usize = 6;
const PATTERN_FALLBACK_WINDOW: usize = 4;

impl OutcomeClassifier for PatternRepeat {
    fn vote(&self, history: &[Outcome]) -> Outcome {
        let n = history.len();
        if n < 4 {
            return Outcome::High;
        }

        for len in 2..=PATTERN_MAX_LEN.min(n / 2) {
            let tail = &history[n - len..];
            let previous = &history[n - 2 * len..n - len];
            if tail == previous {
                return history[n - len];
            }
        }

        WindowMajority::new(PATTERN_FALLBACK_WINDOW).vote(history)
    }

    fn name(&self) -> &str {
        "PatternRepeat"
    }
}

/// Breaks a mirrored eight-round block that ends on High.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mirror;

impl OutcomeClassifier for Mirror {
    fn vote(&self, history: &[Outcome]) -> Outcome {
        let n = history.len();
        if n < 8 {
            return last_or_high(history);
        }

        let last = history[n - 1];
        if history[n - 4..] == history[n - 8..n - 4] && last.is_high() {
            Outcome::Low
        } else {
            last
        }
    }

    fn name(&self) -> &str {
        "Mirror"
    }
}
