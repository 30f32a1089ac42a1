//! Push-based snapshot reporter
//!
//! Periodically writes one structured JSON line summarising every variant, so
//! log pipelines can follow the service without scraping `/metrics`.

use crate::domain::game::{Outcome, Variant};
use crate::infrastructure::observability::metrics::Metrics;
use crate::infrastructure::repositories::InMemoryRoundStore;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Serialize)]
pub struct ServiceSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub variants: Vec<VariantSummary>,
}

#[derive(Serialize)]
pub struct VariantSummary {
    pub variant: Variant,
    pub history_length: usize,
    pub latest_round: Option<String>,
    pub latest_outcome: Option<Outcome>,
    pub next_prediction: Option<Outcome>,
    pub confidence: Option<u8>,
}

pub struct SnapshotReporter {
    stores: Vec<Arc<InMemoryRoundStore>>,
    metrics: Metrics,
    start_time: Instant,
    interval: Duration,
}

impl SnapshotReporter {
    pub fn new(stores: Vec<Arc<InMemoryRoundStore>>, metrics: Metrics, interval_seconds: u64) -> Self {
        Self {
            stores,
            metrics,
            start_time: Instant::now(),
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }

    pub async fn run(self) {
        info!(
            "SnapshotReporter: Starting (interval: {:?})",
            self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            let snapshot = self.collect_snapshot().await;
            match serde_json::to_string(&snapshot) {
                Ok(json) => info!("SNAPSHOT_JSON:{}", json),
                Err(e) => warn!("Failed to serialize snapshot: {}", e),
            }
        }
    }

    async fn collect_snapshot(&self) -> ServiceSnapshot {
        let uptime = self.start_time.elapsed().as_secs();
        self.metrics.uptime_seconds.set(uptime as f64);

        let mut variants = Vec::with_capacity(self.stores.len());
        for store in &self.stores {
            let snapshot = store.snapshot().await;
            let latest = snapshot.latest.as_ref();
            variants.push(VariantSummary {
                variant: snapshot.variant,
                history_length: snapshot.history.len(),
                latest_round: latest.map(|r| r.round_id.to_string()),
                latest_outcome: latest.map(|r| r.outcome),
                next_prediction: latest.map(|r| r.predicted_outcome),
                confidence: latest.map(|r| r.confidence),
            });
        }

        ServiceSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: uptime,
            version: env!("CARGO_PKG_VERSION").to_string(),
            variants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_of_empty_stores() {
        let stores = vec![
            InMemoryRoundStore::shared(Variant::Plain),
            InMemoryRoundStore::shared(Variant::Digest),
        ];
        let metrics = Metrics::new().expect("Failed to create metrics");
        let reporter = SnapshotReporter::new(stores, metrics, 60);

        let snapshot = reporter.collect_snapshot().await;
        assert_eq!(snapshot.variants.len(), 2);
        assert!(snapshot.variants.iter().all(|v| v.history_length == 0));

        let json = serde_json::to_string(&snapshot).expect("Failed to serialize");
        assert!(json.contains("taixiumd5"));
    }
}
