//! Prometheus metrics definitions for taixiu
//!
//! All metrics use the `taixiu_` prefix and are labelled by variant slug.

use crate::domain::game::Variant;
use prometheus::{
    CounterVec, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Rounds recorded into history
    pub rounds_processed_total: CounterVec,
    /// Polls that returned the already processed round
    pub duplicate_rounds_total: CounterVec,
    /// Batches that held no usable round, by reason
    pub skipped_batches_total: CounterVec,
    /// Failed polls by error kind
    pub feed_errors_total: CounterVec,
    /// Feed poll latency in seconds
    pub feed_poll_seconds: HistogramVec,
    /// Confidence of the latest stored prediction
    pub prediction_confidence: GaugeVec,
    /// Rounds currently retained in history
    pub history_length: GaugeVec,
    /// Uptime in seconds
    pub uptime_seconds: GenericGauge<AtomicF64>,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let rounds_processed_total = CounterVec::new(
            Opts::new("taixiu_rounds_processed_total", "Rounds recorded into history"),
            &["variant"],
        )?;
        registry.register(Box::new(rounds_processed_total.clone()))?;

        let duplicate_rounds_total = CounterVec::new(
            Opts::new(
                "taixiu_duplicate_rounds_total",
                "Polls that returned the already processed round",
            ),
            &["variant"],
        )?;
        registry.register(Box::new(duplicate_rounds_total.clone()))?;

        let skipped_batches_total = CounterVec::new(
            Opts::new(
                "taixiu_skipped_batches_total",
                "Feed batches without a usable round",
            ),
            &["variant", "reason"],
        )?;
        registry.register(Box::new(skipped_batches_total.clone()))?;

        let feed_errors_total = CounterVec::new(
            Opts::new("taixiu_feed_errors_total", "Failed feed polls by kind"),
            &["variant", "kind"],
        )?;
        registry.register(Box::new(feed_errors_total.clone()))?;

        let feed_poll_seconds = HistogramVec::new(
            HistogramOpts::new("taixiu_feed_poll_seconds", "Feed poll latency in seconds")
                .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
            &["variant"],
        )?;
        registry.register(Box::new(feed_poll_seconds.clone()))?;

        let prediction_confidence = GaugeVec::new(
            Opts::new(
                "taixiu_prediction_confidence",
                "Confidence of the latest stored prediction",
            ),
            &["variant"],
        )?;
        registry.register(Box::new(prediction_confidence.clone()))?;

        let history_length = GaugeVec::new(
            Opts::new("taixiu_history_length", "Rounds retained in history"),
            &["variant"],
        )?;
        registry.register(Box::new(history_length.clone()))?;

        let uptime_seconds =
            Gauge::with_opts(Opts::new("taixiu_uptime_seconds", "Uptime in seconds"))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            rounds_processed_total,
            duplicate_rounds_total,
            skipped_batches_total,
            feed_errors_total,
            feed_poll_seconds,
            prediction_confidence,
            history_length,
            uptime_seconds,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn record_round(&self, variant: Variant, confidence: u8, history_len: usize) {
        let label = variant.slug();
        self.rounds_processed_total.with_label_values(&[label]).inc();
        self.prediction_confidence
            .with_label_values(&[label])
            .set(confidence as f64);
        self.history_length
            .with_label_values(&[label])
            .set(history_len as f64);
    }

    pub fn inc_duplicates(&self, variant: Variant) {
        self.duplicate_rounds_total
            .with_label_values(&[variant.slug()])
            .inc();
    }

    pub fn inc_skipped(&self, variant: Variant, reason: &str) {
        self.skipped_batches_total
            .with_label_values(&[variant.slug(), reason])
            .inc();
    }

    pub fn inc_feed_errors(&self, variant: Variant, kind: &str) {
        self.feed_errors_total
            .with_label_values(&[variant.slug(), kind])
            .inc();
    }

    pub fn observe_poll_latency(&self, variant: Variant, elapsed: Duration) {
        self.feed_poll_seconds
            .with_label_values(&[variant.slug()])
            .observe(elapsed.as_secs_f64());
    }
}
