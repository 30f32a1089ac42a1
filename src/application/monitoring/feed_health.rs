use crate::domain::game::Variant;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::info;

/// Health of one variant's polling task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedHealth {
    Starting,
    Healthy,
    /// Polls succeed but no new round within the silence threshold
    Silent,
    /// Last poll failed
    Failing,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedStatus {
    pub variant: Variant,
    pub health: FeedHealth,
    pub last_poll_at: Option<DateTime<Utc>>,
    pub last_round_at: Option<DateTime<Utc>>,
    pub consecutive_errors: u32,
    pub last_error: Option<String>,
}

impl FeedStatus {
    fn new(variant: Variant) -> Self {
        Self {
            variant,
            health: FeedHealth::Starting,
            last_poll_at: None,
            last_round_at: None,
            consecutive_errors: 0,
            last_error: None,
        }
    }
}

/// Tracks the status of every polling task for the status endpoint.
pub struct FeedHealthRegistry {
    statuses: RwLock<BTreeMap<String, FeedStatus>>,
}

impl FeedHealthRegistry {
    pub fn new() -> Self {
        let statuses = Variant::ALL
            .iter()
            .map(|v| (v.slug().to_string(), FeedStatus::new(*v)))
            .collect();
        Self {
            statuses: RwLock::new(statuses),
        }
    }

    pub async fn record_success(&self, variant: Variant, new_round: bool, healthy: bool) {
        let mut statuses = self.statuses.write().await;
        let status = statuses
            .entry(variant.slug().to_string())
            .or_insert_with(|| FeedStatus::new(variant));

        let now = Utc::now();
        status.last_poll_at = Some(now);
        if new_round {
            status.last_round_at = Some(now);
        }
        status.consecutive_errors = 0;
        status.last_error = None;

        let health = if healthy {
            FeedHealth::Healthy
        } else {
            FeedHealth::Silent
        };
        if status.health != health {
            info!("FeedHealthRegistry: {} is now {:?}", variant, health);
            status.health = health;
        }
    }

    pub async fn record_failure(&self, variant: Variant, reason: String) {
        let mut statuses = self.statuses.write().await;
        let status = statuses
            .entry(variant.slug().to_string())
            .or_insert_with(|| FeedStatus::new(variant));

        status.last_poll_at = Some(Utc::now());
        status.consecutive_errors = status.consecutive_errors.saturating_add(1);
        if status.health != FeedHealth::Failing {
            info!("FeedHealthRegistry: {} is now Failing ({})", variant, reason);
            status.health = FeedHealth::Failing;
        }
        status.last_error = Some(reason);
    }

    pub async fn get(&self, variant: Variant) -> Option<FeedStatus> {
        self.statuses.read().await.get(variant.slug()).cloned()
    }

    pub async fn get_all(&self) -> BTreeMap<String, FeedStatus> {
        self.statuses.read().await.clone()
    }
}

impl Default for FeedHealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}
