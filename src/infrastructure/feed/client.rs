use super::correlation::{FeedCommands, correlate};
use super::envelope::FeedEnvelope;
use crate::domain::errors::FeedError;
use crate::domain::game::Variant;
use crate::domain::ports::{FeedPoll, RoundFeed};
use crate::infrastructure::core::HttpClientFactory;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, trace};

/// Connection settings for one variant's endpoint.
#[derive(Debug, Clone)]
pub struct FeedEndpoint {
    pub base_url: String,
    pub platform_id: String,
    pub game_id: String,
    pub timeout: Duration,
}

/// Polls the upstream HTTP feed for one variant.
pub struct HttpRoundFeed {
    client: Client,
    endpoint: FeedEndpoint,
    variant: Variant,
    commands: FeedCommands,
}

impl HttpRoundFeed {
    pub fn new(
        variant: Variant,
        endpoint: FeedEndpoint,
        commands: FeedCommands,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client: HttpClientFactory::create_client(endpoint.timeout)?,
            endpoint,
            variant,
            commands,
        })
    }

    async fn fetch_envelope(&self) -> Result<FeedEnvelope, FeedError> {
        let response = self
            .client
            .get(&self.endpoint.base_url)
            .query(&[
                ("platform_id", self.endpoint.platform_id.as_str()),
                ("gid", self.endpoint.game_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        serde_json::from_str(&body).map_err(|e| FeedError::Malformed {
            reason: e.to_string(),
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> FeedError {
        if error.is_timeout() {
            FeedError::Timeout {
                duration_ms: self.endpoint.timeout.as_millis() as u64,
            }
        } else {
            FeedError::Transport {
                reason: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl RoundFeed for HttpRoundFeed {
    fn variant(&self) -> Variant {
        self.variant
    }

    async fn poll(&self) -> Result<FeedPoll, FeedError> {
        let envelope = self.fetch_envelope().await?;
        trace!(
            "HttpRoundFeed[{}]: status={:?}, {} raw events",
            self.variant,
            envelope.status,
            envelope.data.len()
        );

        let events = envelope.events();
        match correlate(self.variant, &events, &self.commands) {
            Ok(round) => Ok(FeedPoll::Round(round)),
            Err(reason) => {
                debug!("HttpRoundFeed[{}]: batch skipped: {}", self.variant, reason);
                Ok(FeedPoll::Skipped(reason))
            }
        }
    }
}
