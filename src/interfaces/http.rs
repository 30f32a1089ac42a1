//! Read-only HTTP API.
//!
//! Every route reads from the per-variant stores; nothing here mutates state.

use crate::application::monitoring::FeedHealthRegistry;
use crate::application::system::SystemHandle;
use crate::domain::game::{HISTORY_CAPACITY, Variant};
use crate::infrastructure::observability::Metrics;
use crate::infrastructure::repositories::{InMemoryRoundStore, combined_history};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

pub const LIVENESS_MESSAGE: &str = "✅ API đang hoạt động bình thường!";

/// Services the routes read from.
#[derive(Clone)]
pub struct ApiState {
    pub plain: Arc<InMemoryRoundStore>,
    pub digest: Arc<InMemoryRoundStore>,
    pub health: Arc<FeedHealthRegistry>,
    pub metrics: Metrics,
}

impl ApiState {
    pub fn from_handle(handle: &SystemHandle) -> Self {
        Self {
            plain: handle.plain_store.clone(),
            digest: handle.digest_store.clone(),
            health: handle.health.clone(),
            metrics: handle.metrics.clone(),
        }
    }

    fn store(&self, variant: Variant) -> &Arc<InMemoryRoundStore> {
        match variant {
            Variant::Plain => &self.plain,
            Variant::Digest => &self.digest,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct PendingReply {
    variant: Variant,
    status: &'static str,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorReply {
    code: u16,
    message: String,
}

fn with_state(state: ApiState) -> impl Filter<Extract = (ApiState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// All API routes with rejection handling and request tracing.
pub fn routes(state: ApiState) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let home = warp::path::end().map(|| LIVENESS_MESSAGE);

    let combined = warp::path!("api" / "history")
        .and(with_state(state.clone()))
        .then(combined_handler);

    let status = warp::path!("api" / "status")
        .and(with_state(state.clone()))
        .then(status_handler);

    let latest = warp::path!("api" / Variant)
        .and(with_state(state.clone()))
        .then(latest_handler);

    let history = warp::path!("api" / Variant / "history")
        .and(warp::query::<HistoryQuery>())
        .and(with_state(state.clone()))
        .then(history_handler);

    let metrics = warp::path!("metrics")
        .and(with_state(state))
        .map(metrics_handler);

    warp::get()
        .and(
            home.or(combined)
                .or(status)
                .or(latest)
                .or(history)
                .or(metrics),
        )
        .recover(handle_rejection)
        .with(warp::trace::request())
}

async fn latest_handler(variant: Variant, state: ApiState) -> warp::reply::Response {
    match state.store(variant).latest().await {
        Some(result) => warp::reply::json(&result).into_response(),
        None => warp::reply::json(&PendingReply {
            variant,
            status: "pending",
            message: "No round observed yet",
        })
        .into_response(),
    }
}

async fn history_handler(
    variant: Variant,
    query: HistoryQuery,
    state: ApiState,
) -> impl Reply {
    let limit = query.limit.unwrap_or(HISTORY_CAPACITY);
    warp::reply::json(&state.store(variant).history(limit).await)
}

async fn combined_handler(state: ApiState) -> impl Reply {
    warp::reply::json(&combined_history(&state.plain, &state.digest).await)
}

async fn status_handler(state: ApiState) -> impl Reply {
    warp::reply::json(&state.health.get_all().await)
}

fn metrics_handler(state: ApiState) -> impl Reply {
    warp::reply::with_header(
        state.metrics.render(),
        "content-type",
        "text/plain; version=0.0.4",
    )
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Unhandled rejection".to_string())
    };

    let body = warp::reply::json(&ErrorReply {
        code: code.as_u16(),
        message,
    });
    Ok(warp::reply::with_status(body, code))
}

/// Serves the API until the process exits.
pub async fn serve(state: ApiState, addr: SocketAddr) {
    info!("HTTP API listening on http://{}", addr);
    warp::serve(routes(state)).run(addr).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::{Dice, Outcome, RoundId, RoundResult};
    use chrono::Utc;

    fn state() -> ApiState {
        ApiState {
            plain: InMemoryRoundStore::shared(Variant::Plain),
            digest: InMemoryRoundStore::shared(Variant::Digest),
            health: Arc::new(FeedHealthRegistry::new()),
            metrics: Metrics::new().expect("Failed to create metrics"),
        }
    }

    fn result(id: u64, dice: (i64, i64, i64)) -> RoundResult {
        let dice = Dice::new(dice.0, dice.1, dice.2).unwrap();
        RoundResult {
            round_id: RoundId::from(id),
            dice,
            sum: dice.sum(),
            outcome: dice.outcome(),
            predicted_outcome: Outcome::High,
            confidence: 50,
            votes: vec![],
            digest: None,
            observed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_home_returns_liveness_message() {
        let res = warp::test::request().path("/").reply(&routes(state())).await;
        assert_eq!(res.status(), 200);
        assert_eq!(std::str::from_utf8(res.body()).unwrap(), LIVENESS_MESSAGE);
    }

    #[tokio::test]
    async fn test_latest_is_pending_before_first_round() {
        let res = warp::test::request()
            .path("/api/taixiumd5")
            .reply(&routes(state()))
            .await;
        assert_eq!(res.status(), 200);
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["status"], "pending");
        assert_eq!(body["variant"], "taixiumd5");
    }

    #[tokio::test]
    async fn test_history_limit_is_applied() {
        let state = state();
        for id in 1..=4 {
            state.plain.commit(|s| s.record(result(id, (1, 2, 3)))).await;
        }

        let res = warp::test::request()
            .path("/api/taixiu/history?limit=2")
            .reply(&routes(state))
            .await;
        assert_eq!(res.status(), 200);
        let body: Vec<serde_json::Value> = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["round_id"], "4");
        assert_eq!(body[1]["round_id"], "3");
    }

    #[tokio::test]
    async fn test_unknown_variant_is_404() {
        let res = warp::test::request()
            .path("/api/roulette")
            .reply(&routes(state()))
            .await;
        assert_eq!(res.status(), 404);
    }

    #[tokio::test]
    async fn test_bad_limit_is_400() {
        let res = warp::test::request()
            .path("/api/taixiu/history?limit=lots")
            .reply(&routes(state()))
            .await;
        assert_eq!(res.status(), 400);
    }

    #[tokio::test]
    async fn test_post_is_rejected() {
        let res = warp::test::request()
            .method("POST")
            .path("/api/taixiu")
            .reply(&routes(state()))
            .await;
        assert_eq!(res.status(), 405);
    }

    #[tokio::test]
    async fn test_metrics_exposition() {
        let state = state();
        state.metrics.record_round(Variant::Plain, 77, 1);

        let res = warp::test::request().path("/metrics").reply(&routes(state)).await;
        assert_eq!(res.status(), 200);
        let body = std::str::from_utf8(res.body()).unwrap();
        assert!(body.contains("taixiu_rounds_processed_total"));
    }
}
