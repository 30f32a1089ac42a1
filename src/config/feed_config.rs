//! Upstream feed configuration parsing from environment variables.
//!
//! Covers the endpoint, the per-variant game ids, polling cadence and the
//! event command codes used to correlate a batch into a round.

use super::{EnvSource, parse_or};
use crate::domain::game::Variant;
use crate::infrastructure::feed::{FeedCommands, FeedEndpoint};
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

/// Feed environment configuration
#[derive(Debug, Clone)]
pub struct FeedEnvConfig {
    pub base_url: Url,
    pub platform_id: String,
    pub plain_game_id: String,
    pub digest_game_id: String,

    // Cadence
    pub poll_interval_secs: u64,
    pub retry_delay_secs: u64,
    pub request_timeout_secs: u64,

    // Event command codes
    pub plain_result_cmd: i64,
    pub session_marker_cmd: i64,
    pub digest_result_cmd: i64,
}

impl FeedEnvConfig {
    pub fn from_source(source: &EnvSource) -> Result<Self> {
        let raw_url = source("FEED_BASE_URL").context("FEED_BASE_URL must be set")?;
        let base_url =
            Url::parse(&raw_url).context(format!("Invalid FEED_BASE_URL: {}", raw_url))?;

        let config = Self {
            base_url,
            platform_id: source("FEED_PLATFORM_ID").unwrap_or_else(|| "g8".to_string()),
            plain_game_id: source("FEED_PLAIN_GAME_ID").unwrap_or_else(|| "vgmn_100".to_string()),
            digest_game_id: source("FEED_DIGEST_GAME_ID")
                .unwrap_or_else(|| "vgmn_101".to_string()),
            poll_interval_secs: parse_or(source, "FEED_POLL_INTERVAL_SECS", 5)?,
            retry_delay_secs: parse_or(source, "FEED_RETRY_DELAY_SECS", 5)?,
            request_timeout_secs: parse_or(source, "FEED_REQUEST_TIMEOUT_SECS", 10)?,
            plain_result_cmd: parse_or(source, "FEED_PLAIN_RESULT_CMD", 1003)?,
            session_marker_cmd: parse_or(source, "FEED_SESSION_MARKER_CMD", 1008)?,
            digest_result_cmd: parse_or(source, "FEED_DIGEST_RESULT_CMD", 2006)?,
        };

        if config.poll_interval_secs == 0 {
            anyhow::bail!("FEED_POLL_INTERVAL_SECS must be greater than 0");
        }

        Ok(config)
    }

    pub fn commands(&self) -> FeedCommands {
        FeedCommands {
            plain_result: self.plain_result_cmd,
            session_marker: self.session_marker_cmd,
            digest_result: self.digest_result_cmd,
        }
    }

    pub fn endpoint(&self, variant: Variant) -> FeedEndpoint {
        let game_id = match variant {
            Variant::Plain => &self.plain_game_id,
            Variant::Digest => &self.digest_game_id,
        };
        FeedEndpoint {
            base_url: self.base_url.to_string(),
            platform_id: self.platform_id.clone(),
            game_id: game_id.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
