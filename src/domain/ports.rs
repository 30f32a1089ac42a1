use crate::domain::errors::{FeedError, RoundError};
use crate::domain::game::{FeedRound, Variant};
use async_trait::async_trait;

/// Result of one successful poll of the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPoll {
    /// The batch yielded a normalized round.
    Round(FeedRound),
    /// The batch was well formed but held no usable round.
    Skipped(RoundError),
}

/// Source of rounds for a single variant.
#[async_trait]
pub trait RoundFeed: Send + Sync {
    fn variant(&self) -> Variant;

    /// Pull the current batch and correlate it into at most one round.
    async fn poll(&self) -> Result<FeedPoll, FeedError>;
}
