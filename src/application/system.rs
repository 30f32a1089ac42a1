use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

use crate::application::agents::{FeedPollerAgent, PollerConfig};
use crate::application::monitoring::FeedHealthRegistry;
use crate::application::prediction::HybridEnsemble;
use crate::application::round_processor::RoundProcessor;
use crate::config::Config;
use crate::domain::game::Variant;
use crate::domain::ports::RoundFeed;
use crate::infrastructure::HttpRoundFeed;
use crate::infrastructure::observability::Metrics;
use crate::infrastructure::repositories::InMemoryRoundStore;

/// Wired but not yet running service: one feed, store and processor per variant.
pub struct Application {
    pub config: Config,
    pub plain_feed: Arc<dyn RoundFeed>,
    pub digest_feed: Arc<dyn RoundFeed>,
    pub plain_store: Arc<InMemoryRoundStore>,
    pub digest_store: Arc<InMemoryRoundStore>,
    pub health: Arc<FeedHealthRegistry>,
    pub metrics: Metrics,
}

/// Shared services handed to the HTTP layer and reporters once pollers run.
pub struct SystemHandle {
    pub plain_store: Arc<InMemoryRoundStore>,
    pub digest_store: Arc<InMemoryRoundStore>,
    pub health: Arc<FeedHealthRegistry>,
    pub metrics: Metrics,
    pub pollers: Vec<JoinHandle<()>>,
}

impl Application {
    pub async fn build(config: Config) -> Result<Self> {
        info!("Building application (feed: {})...", config.feed.base_url);

        let commands = config.feed.commands();
        let plain_feed: Arc<dyn RoundFeed> = Arc::new(HttpRoundFeed::new(
            Variant::Plain,
            config.feed.endpoint(Variant::Plain),
            commands,
        )?);
        let digest_feed: Arc<dyn RoundFeed> = Arc::new(HttpRoundFeed::new(
            Variant::Digest,
            config.feed.endpoint(Variant::Digest),
            commands,
        )?);

        Self::with_feeds(config, plain_feed, digest_feed)
    }

    /// Wires the service around caller-supplied feeds.
    pub fn with_feeds(
        config: Config,
        plain_feed: Arc<dyn RoundFeed>,
        digest_feed: Arc<dyn RoundFeed>,
    ) -> Result<Self> {
        if plain_feed.variant() != Variant::Plain || digest_feed.variant() != Variant::Digest {
            anyhow::bail!("Feeds must be supplied as (plain, digest)");
        }

        Ok(Self {
            config,
            plain_feed,
            digest_feed,
            plain_store: InMemoryRoundStore::shared(Variant::Plain),
            digest_store: InMemoryRoundStore::shared(Variant::Digest),
            health: Arc::new(FeedHealthRegistry::new()),
            metrics: Metrics::new()?,
        })
    }

    fn processor(&self, store: Arc<InMemoryRoundStore>, offset: u64) -> Arc<RoundProcessor> {
        let ensemble = HybridEnsemble::standard();
        let processor = match self.config.prediction_seed {
            Some(seed) => RoundProcessor::with_seed(store, ensemble, seed.wrapping_add(offset)),
            None => RoundProcessor::new(store, ensemble),
        };
        Arc::new(processor)
    }

    fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            poll_interval: Duration::from_secs(self.config.feed.poll_interval_secs),
            retry_delay: Duration::from_secs(self.config.feed.retry_delay_secs),
            silence_threshold: Duration::from_secs(
                self.config.observability.silence_threshold_secs,
            ),
        }
    }

    /// Spawns one poller per variant.
    pub async fn start(self) -> Result<SystemHandle> {
        if self.config.prediction_seed.is_some() {
            info!("Prediction noise seeded from PREDICTION_SEED");
        }

        let poller_config = self.poller_config();
        let mut pollers = Vec::with_capacity(Variant::ALL.len());

        for (offset, (feed, store)) in [
            (self.plain_feed.clone(), self.plain_store.clone()),
            (self.digest_feed.clone(), self.digest_store.clone()),
        ]
        .into_iter()
        .enumerate()
        {
            let variant = feed.variant();
            let agent = FeedPollerAgent::new(
                feed,
                self.processor(store, offset as u64),
                self.health.clone(),
                self.metrics.clone(),
                poller_config,
            );
            pollers.push(tokio::spawn(async move { agent.run().await }));
            info!("Poller for {} spawned", variant);
        }

        Ok(SystemHandle {
            plain_store: self.plain_store,
            digest_store: self.digest_store,
            health: self.health,
            metrics: self.metrics,
            pollers,
        })
    }
}

impl SystemHandle {
    pub fn store(&self, variant: Variant) -> &Arc<InMemoryRoundStore> {
        match variant {
            Variant::Plain => &self.plain_store,
            Variant::Digest => &self.digest_store,
        }
    }

    pub fn stores(&self) -> Vec<Arc<InMemoryRoundStore>> {
        vec![self.plain_store.clone(), self.digest_store.clone()]
    }

    /// Aborts the pollers. Stored history stays readable.
    pub fn shutdown(&self) {
        for poller in &self.pollers {
            poller.abort();
        }
        info!("Pollers stopped");
    }
}
