use thiserror::Error;

/// Errors raised while pulling a batch from the upstream result feed.
///
/// All of them are recoverable: the poller logs, waits the retry delay and
/// polls again while the last good snapshot keeps being served.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed unreachable: {reason}")]
    Transport { reason: String },

    #[error("Feed request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    #[error("Feed returned HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Malformed feed response: {reason}")]
    Malformed { reason: String },
}

impl FeedError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Transport { .. } => "transport",
            FeedError::Timeout { .. } => "timeout",
            FeedError::UnexpectedStatus { .. } => "status",
            FeedError::Malformed { .. } => "malformed",
        }
    }
}

/// Reasons a feed batch did not yield a usable round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("No result event with cmd {cmd} in batch")]
    NoResultEvent { cmd: i64 },

    #[error("No round id available for cmd {cmd}")]
    MissingRoundId { cmd: i64 },

    #[error("Round {round_id} is missing dice values")]
    MissingDice { round_id: String },

    #[error("Die {position} has invalid value {value} (expected 1-6)")]
    InvalidDie { position: usize, value: i64 },
}

impl RoundError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RoundError::NoResultEvent { .. } => "no_result",
            RoundError::MissingRoundId { .. } => "missing_round_id",
            RoundError::MissingDice { .. } => "missing_dice",
            RoundError::InvalidDie { .. } => "invalid_die",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_formatting() {
        let error = FeedError::Timeout { duration_ms: 10000 };
        assert!(error.to_string().contains("10000ms"));
        assert_eq!(error.kind(), "timeout");
    }

    #[test]
    fn test_round_error_formatting() {
        let error = RoundError::InvalidDie {
            position: 2,
            value: 9,
        };
        let msg = error.to_string();
        assert!(msg.contains("Die 2"));
        assert!(msg.contains('9'));
    }
}
