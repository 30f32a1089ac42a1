use taixiu::application::prediction::HybridEnsemble;
use taixiu::application::round_processor::{RoundDisposition, RoundProcessor};
use taixiu::domain::game::{Dice, FeedRound, HISTORY_CAPACITY, RoundId, Variant};
use taixiu::infrastructure::repositories::InMemoryRoundStore;

use std::collections::HashSet;
use std::sync::Arc;

fn round(id: u64) -> FeedRound {
    let die = (id % 6) as i64 + 1;
    FeedRound::new(id, Dice::new(die, 7 - die, 3).unwrap())
}

/// Test: Concurrent processing of distinct rounds drops nothing and stays bounded
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rounds_are_all_recorded() {
    let store = InMemoryRoundStore::shared(Variant::Plain);
    let processor = Arc::new(RoundProcessor::with_seed(
        store.clone(),
        HybridEnsemble::standard(),
        99,
    ));

    let tasks: Vec<_> = (1..=30u64)
        .map(|id| {
            let processor = processor.clone();
            tokio::spawn(async move { processor.process(round(id)).await })
        })
        .collect();

    let recorded = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .filter(|d| matches!(d, RoundDisposition::Recorded(_)))
        .count();

    assert_eq!(recorded, 30);
    let history = store.history(HISTORY_CAPACITY).await;
    assert_eq!(history.len(), 30);

    let unique: HashSet<_> = history.iter().map(|r| r.round_id.clone()).collect();
    assert_eq!(unique.len(), 30);
    assert_eq!(store.latest().await.unwrap(), history[0]);
}

/// Test: The same round delivered concurrently is recorded exactly once
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicates_collapse() {
    let store = InMemoryRoundStore::shared(Variant::Digest);
    let processor = Arc::new(RoundProcessor::with_seed(
        store.clone(),
        HybridEnsemble::standard(),
        3,
    ));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let processor = processor.clone();
            tokio::spawn(async move { processor.process(round(500)).await })
        })
        .collect();

    let dispositions: Vec<_> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let recorded = dispositions
        .iter()
        .filter(|d| matches!(d, RoundDisposition::Recorded(_)))
        .count();
    assert_eq!(recorded, 1);
    assert_eq!(store.history_len().await, 1);
    assert_eq!(
        store.latest().await.unwrap().round_id,
        RoundId::from(500)
    );
}

/// Test: History is capped and ordered most recent first under sustained load
#[tokio::test]
async fn test_history_is_capped_after_many_rounds() {
    let store = InMemoryRoundStore::shared(Variant::Plain);
    let processor = RoundProcessor::with_seed(store.clone(), HybridEnsemble::standard(), 1);

    for id in 1..=120u64 {
        processor.process(round(id)).await;
        let expected = (id as usize).min(HISTORY_CAPACITY);
        assert_eq!(store.history_len().await, expected);
    }

    let history = store.history(HISTORY_CAPACITY).await;
    assert_eq!(history[0].round_id, RoundId::from(120));
    assert_eq!(history[HISTORY_CAPACITY - 1].round_id, RoundId::from(71));
    for result in &history {
        assert!((50..=99).contains(&result.confidence));
        assert_eq!(result.votes.len(), 10);
    }
}
