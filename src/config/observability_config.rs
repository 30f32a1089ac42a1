//! Observability configuration parsing from environment variables.
//!
//! This module handles loading snapshot reporting and feed health settings.

use super::{EnvSource, parse_or};
use anyhow::Result;

/// Observability environment configuration
#[derive(Debug, Clone)]
pub struct ObservabilityEnvConfig {
    pub enabled: bool,
    /// Seconds between SNAPSHOT_JSON log lines
    pub interval_secs: u64,
    /// Seconds without a new round before a feed is reported silent
    pub silence_threshold_secs: u64,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60,
            silence_threshold_secs: 120,
        }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_source(source: &EnvSource) -> Result<Self> {
        Ok(Self {
            enabled: source("OBSERVABILITY_ENABLED")
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(true),
            interval_secs: parse_or(source, "OBSERVABILITY_INTERVAL", 60)?,
            silence_threshold_secs: parse_or(source, "FEED_SILENCE_THRESHOLD_SECS", 120)?,
        })
    }
}
