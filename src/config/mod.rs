//! Configuration module.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Feed, Server, and Observability.

mod feed_config;
mod observability_config;
mod server_config;

pub use feed_config::FeedEnvConfig;
pub use observability_config::ObservabilityEnvConfig;
pub use server_config::ServerEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Variable lookup used by the sub-config parsers.
pub type EnvSource = dyn Fn(&str) -> Option<String>;

/// Parses `key` from `source`, falling back to `default` when unset.
pub(crate) fn parse_or<T>(source: &EnvSource, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match source(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .context(format!("Failed to parse {}", key)),
        None => Ok(default),
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub feed: FeedEnvConfig,
    pub server: ServerEnvConfig,
    pub observability: ObservabilityEnvConfig,
    /// Fixed seed for the prediction noise; OS entropy when absent
    pub prediction_seed: Option<u64>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_source(&|key: &str| env::var(key).ok())
    }

    pub fn from_source(source: &EnvSource) -> Result<Self> {
        let feed = FeedEnvConfig::from_source(source).context("Failed to load feed config")?;
        let server =
            ServerEnvConfig::from_source(source).context("Failed to load server config")?;
        let observability = ObservabilityEnvConfig::from_source(source)
            .context("Failed to load observability config")?;

        let prediction_seed = match source("PREDICTION_SEED") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .context("Failed to parse PREDICTION_SEED")?,
            ),
            None => None,
        };

        Ok(Self {
            feed,
            server,
            observability,
            prediction_seed,
        })
    }
}

#[cfg(test)]
pub(crate) fn map_source(pairs: &[(&str, &str)]) -> Box<EnvSource> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Box::new(move |key| map.get(key).cloned())
}
