use crate::domain::errors::{FeedError, RoundError};
use crate::domain::game::{Dice, FeedRound, Variant};
use crate::domain::ports::{FeedPoll, RoundFeed};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Scripted feed for tests and offline runs.
///
/// Each poll pops the next scripted response. Once the script runs dry every
/// poll reports an empty batch.
pub struct MockRoundFeed {
    variant: Variant,
    script: Mutex<VecDeque<Result<FeedPoll, FeedError>>>,
    polls: AtomicUsize,
}

impl MockRoundFeed {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            script: Mutex::new(VecDeque::new()),
            polls: AtomicUsize::new(0),
        }
    }

    pub async fn push(&self, response: Result<FeedPoll, FeedError>) {
        self.script.lock().await.push_back(response);
    }

    /// Queue a round built from raw dice values.
    pub async fn push_round(&self, round_id: u64, dice: (i64, i64, i64)) {
        let response = match Dice::new(dice.0, dice.1, dice.2) {
            Ok(dice) => Ok(FeedPoll::Round(FeedRound::new(round_id, dice))),
            Err(e) => Ok(FeedPoll::Skipped(e)),
        };
        self.push(response).await;
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoundFeed for MockRoundFeed {
    fn variant(&self) -> Variant {
        self.variant
    }

    async fn poll(&self) -> Result<FeedPoll, FeedError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().await.pop_front() {
            Some(response) => response,
            None => Ok(FeedPoll::Skipped(RoundError::NoResultEvent { cmd: 0 })),
        }
    }
}
