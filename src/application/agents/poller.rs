use crate::application::monitoring::{FeedHealthRegistry, SilenceDetector};
use crate::application::round_processor::{RoundDisposition, RoundProcessor};
use crate::domain::ports::{FeedPoll, RoundFeed};
use crate::infrastructure::observability::Metrics;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Pause after a successful poll
    pub poll_interval: Duration,
    /// Pause after a failed poll
    pub retry_delay: Duration,
    /// How long without a new round before the feed counts as silent
    pub silence_threshold: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            retry_delay: Duration::from_secs(5),
            silence_threshold: Duration::from_secs(120),
        }
    }
}

/// Long-running task that owns one variant: poll, process, publish.
pub struct FeedPollerAgent {
    feed: Arc<dyn RoundFeed>,
    processor: Arc<RoundProcessor>,
    health: Arc<FeedHealthRegistry>,
    metrics: Metrics,
    config: PollerConfig,
    silence: SilenceDetector,
}

impl FeedPollerAgent {
    pub fn new(
        feed: Arc<dyn RoundFeed>,
        processor: Arc<RoundProcessor>,
        health: Arc<FeedHealthRegistry>,
        metrics: Metrics,
        config: PollerConfig,
    ) -> Self {
        let silence = SilenceDetector::new(feed.variant(), config.silence_threshold);
        Self {
            feed,
            processor,
            health,
            metrics,
            config,
            silence,
        }
    }

    /// Polls forever. Errors are logged and retried, never propagated.
    pub async fn run(mut self) {
        info!(
            "FeedPoller[{}] started (interval: {:?}, retry: {:?})",
            self.feed.variant(),
            self.config.poll_interval,
            self.config.retry_delay
        );

        loop {
            let pause = self.tick().await;
            tokio::time::sleep(pause).await;
        }
    }

    /// One poll cycle. Returns how long to wait before the next one.
    pub async fn tick(&mut self) -> Duration {
        let variant = self.feed.variant();
        let started = Instant::now();
        let polled = self.feed.poll().await;
        self.metrics.observe_poll_latency(variant, started.elapsed());

        match polled {
            Ok(FeedPoll::Round(round)) => {
                match self.processor.process(round).await {
                    RoundDisposition::Recorded(result) => {
                        self.silence.record_round();
                        let history_len = self.processor.store().history_len().await;
                        self.metrics
                            .record_round(variant, result.confidence, history_len);
                        info!(
                            "FeedPoller[{}]: round {} = {}-{}-{} ({} {}), next: {} ({}%)",
                            variant,
                            result.round_id,
                            result.dice.die1,
                            result.dice.die2,
                            result.dice.die3,
                            result.sum,
                            result.outcome,
                            result.predicted_outcome,
                            result.confidence
                        );
                        self.health.record_success(variant, true, true).await;
                    }
                    RoundDisposition::Duplicate => {
                        self.metrics.inc_duplicates(variant);
                        self.health
                            .record_success(variant, false, !self.silence.is_silent())
                            .await;
                    }
                }
                self.config.poll_interval
            }
            Ok(FeedPoll::Skipped(reason)) => {
                debug!("FeedPoller[{}]: nothing to process: {}", variant, reason);
                self.metrics.inc_skipped(variant, reason.kind());
                self.health
                    .record_success(variant, false, !self.silence.is_silent())
                    .await;
                self.config.poll_interval
            }
            Err(e) => {
                warn!(
                    "FeedPoller[{}]: poll failed: {}. Retrying in {:?}",
                    variant, e, self.config.retry_delay
                );
                self.metrics.inc_feed_errors(variant, e.kind());
                self.health.record_failure(variant, e.to_string()).await;
                self.config.retry_delay
            }
        }
    }
}
