//! Observability for taixiu
//!
//! 1. **Prometheus registry**: rendered on `GET /metrics`
//! 2. **Structured JSON snapshots**: periodic one-line summaries in the logs

pub mod metrics;
pub mod reporter;

pub use metrics::Metrics;
pub use reporter::SnapshotReporter;
