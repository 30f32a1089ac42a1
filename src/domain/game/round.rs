use super::outcome::Outcome;
use crate::domain::errors::RoundError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session identifier taken from the feed's `sid` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(String);

impl RoundId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RoundId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RoundId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Three validated die faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    pub die1: u8,
    pub die2: u8,
    pub die3: u8,
}

impl Dice {
    /// Validates raw feed values; every face must be in `1..=6`.
    pub fn new(d1: i64, d2: i64, d3: i64) -> Result<Self, RoundError> {
        let face = |position: usize, value: i64| -> Result<u8, RoundError> {
            if (1..=6).contains(&value) {
                Ok(value as u8)
            } else {
                Err(RoundError::InvalidDie { position, value })
            }
        };

        Ok(Self {
            die1: face(1, d1)?,
            die2: face(2, d2)?,
            die3: face(3, d3)?,
        })
    }

    pub fn sum(&self) -> u8 {
        self.die1 + self.die2 + self.die3
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from_dice(self.die1, self.die2, self.die3)
    }
}

/// Integrity data published by the verified feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDigest {
    pub md5: String,
    /// Raw result string the digest was computed over, once revealed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// A round as normalized from one feed batch, before processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRound {
    pub round_id: RoundId,
    pub dice: Dice,
    pub digest: Option<RoundDigest>,
}

impl FeedRound {
    pub fn new(round_id: impl Into<RoundId>, dice: Dice) -> Self {
        Self {
            round_id: round_id.into(),
            dice,
            digest: None,
        }
    }

    pub fn with_digest(mut self, digest: RoundDigest) -> Self {
        self.digest = Some(digest);
        self
    }
}

/// Immutable record of a processed round.
///
/// `predicted_outcome` and `confidence` were computed from the history that
/// existed *before* this round was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_id: RoundId,
    #[serde(flatten)]
    pub dice: Dice,
    pub sum: u8,
    pub outcome: Outcome,
    pub predicted_outcome: Outcome,
    pub confidence: u8,
    pub votes: Vec<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<RoundDigest>,
    pub observed_at: DateTime<Utc>,
}
