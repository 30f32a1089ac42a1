//! Wire shape of the upstream result feed.
//!
//! The envelope is `{status, data: [event, ...]}`. Events are decoded one by
//! one so a single odd entry never spoils the batch.

use crate::domain::errors::RoundError;
use crate::domain::game::{Dice, RoundId};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct FeedEnvelope {
    #[serde(default)]
    pub status: Option<Value>,
    pub data: Vec<Value>,
}

impl FeedEnvelope {
    /// Events that decode; anything else is dropped.
    pub fn events(&self) -> Vec<FeedEvent> {
        self.data
            .iter()
            .filter_map(|raw| serde_json::from_value(raw.clone()).ok())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedEvent {
    #[serde(default)]
    pub cmd: Option<i64>,
    #[serde(default)]
    pub sid: Option<Value>,
    #[serde(default)]
    pub d1: Option<i64>,
    #[serde(default)]
    pub d2: Option<i64>,
    #[serde(default)]
    pub d3: Option<i64>,
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub rs: Option<String>,
}

impl FeedEvent {
    pub fn is_cmd(&self, cmd: i64) -> bool {
        self.cmd == Some(cmd)
    }

    /// `sid` as a round id; numbers and non-empty strings are accepted.
    pub fn round_id(&self) -> Option<RoundId> {
        match self.sid.as_ref()? {
            Value::Number(n) => Some(RoundId::new(n.to_string())),
            Value::String(s) if !s.trim().is_empty() => Some(RoundId::new(s.trim())),
            _ => None,
        }
    }

    pub fn dice(&self, round_id: &RoundId) -> Result<Dice, RoundError> {
        match (self.d1, self.d2, self.d3) {
            (Some(d1), Some(d2), Some(d3)) => Dice::new(d1, d2, d3),
            _ => Err(RoundError::MissingDice {
                round_id: round_id.to_string(),
            }),
        }
    }
}
