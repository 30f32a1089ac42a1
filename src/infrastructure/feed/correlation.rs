//! Batch correlation: turns one decoded feed batch into a normalized round.
//!
//! The digest feed carries the round id on the result event itself. The plain
//! feed splits it: dice arrive on a result event, the id on a sibling
//! session-marker event in the same batch.

use super::envelope::FeedEvent;
use crate::domain::errors::RoundError;
use crate::domain::game::{FeedRound, RoundDigest, Variant};

/// `cmd` codes the upstream uses for each event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCommands {
    pub plain_result: i64,
    pub session_marker: i64,
    pub digest_result: i64,
}

impl Default for FeedCommands {
    fn default() -> Self {
        Self {
            plain_result: 1003,
            session_marker: 1008,
            digest_result: 2006,
        }
    }
}

pub fn correlate(
    variant: Variant,
    events: &[FeedEvent],
    commands: &FeedCommands,
) -> Result<FeedRound, RoundError> {
    match variant {
        Variant::Plain => correlate_plain(events, commands),
        Variant::Digest => correlate_digest(events, commands),
    }
}

fn correlate_plain(events: &[FeedEvent], commands: &FeedCommands) -> Result<FeedRound, RoundError> {
    let result = events
        .iter()
        .find(|e| e.is_cmd(commands.plain_result))
        .ok_or(RoundError::NoResultEvent {
            cmd: commands.plain_result,
        })?;

    let round_id = events
        .iter()
        .filter(|e| e.is_cmd(commands.session_marker))
        .find_map(FeedEvent::round_id)
        .ok_or(RoundError::MissingRoundId {
            cmd: commands.session_marker,
        })?;

    let dice = result.dice(&round_id)?;
    Ok(FeedRound::new(round_id, dice))
}

fn correlate_digest(
    events: &[FeedEvent],
    commands: &FeedCommands,
) -> Result<FeedRound, RoundError> {
    let mut candidates = events
        .iter()
        .filter(|e| e.is_cmd(commands.digest_result))
        .peekable();
    if candidates.peek().is_none() {
        return Err(RoundError::NoResultEvent {
            cmd: commands.digest_result,
        });
    }

    let (result, round_id) = candidates
        .find_map(|e| e.round_id().map(|id| (e, id)))
        .ok_or(RoundError::MissingRoundId {
            cmd: commands.digest_result,
        })?;

    let dice = result.dice(&round_id)?;
    let mut round = FeedRound::new(round_id, dice);
    if let Some(md5) = result.md5.clone().filter(|m| !m.is_empty()) {
        round = round.with_digest(RoundDigest {
            md5,
            raw: result.rs.clone(),
        });
    }
    Ok(round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::{Outcome, RoundId};
    use serde_json::json;

    fn events(raw: serde_json::Value) -> Vec<FeedEvent> {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_plain_round_pairs_dice_with_session_marker() {
        let batch = events(json!([
            {"cmd": 1008, "sid": 501},
            {"cmd": 1003, "d1": 6, "d2": 5, "d3": 1},
        ]));

        let round = correlate(Variant::Plain, &batch, &FeedCommands::default()).unwrap();
        assert_eq!(round.round_id, RoundId::from(501));
        assert_eq!(round.dice.sum(), 12);
        assert_eq!(round.dice.outcome(), Outcome::High);
        assert!(round.digest.is_none());
    }

    #[test]
    fn test_plain_round_without_marker_is_skipped() {
        let batch = events(json!([{"cmd": 1003, "d1": 1, "d2": 2, "d3": 3}]));
        assert_eq!(
            correlate(Variant::Plain, &batch, &FeedCommands::default()),
            Err(RoundError::MissingRoundId { cmd: 1008 })
        );
    }

    #[test]
    fn test_plain_round_missing_dice() {
        let batch = events(json!([
            {"cmd": 1008, "sid": 77},
            {"cmd": 1003, "d1": 1, "d2": 2},
        ]));
        assert_eq!(
            correlate(Variant::Plain, &batch, &FeedCommands::default()),
            Err(RoundError::MissingDice {
                round_id: "77".to_string()
            })
        );
    }

    #[test]
    fn test_digest_round_carries_md5() {
        let batch = events(json!([
            {"cmd": 2005, "sid": 900},
            {"cmd": 2006, "sid": 901, "d1": 1, "d2": 2, "d3": 3, "md5": "abc123", "rs": "{#901} 1-2-3"},
        ]));

        let round = correlate(Variant::Digest, &batch, &FeedCommands::default()).unwrap();
        assert_eq!(round.round_id, RoundId::from(901));
        assert_eq!(round.dice.outcome(), Outcome::Low);
        let digest = round.digest.unwrap();
        assert_eq!(digest.md5, "abc123");
        assert_eq!(digest.raw.as_deref(), Some("{#901} 1-2-3"));
    }

    #[test]
    fn test_digest_skips_events_without_sid() {
        let batch = events(json!([
            {"cmd": 2006, "d1": 1, "d2": 1, "d3": 1},
            {"cmd": 2006, "sid": 12, "d1": 4, "d2": 4, "d3": 4},
        ]));
        let round = correlate(Variant::Digest, &batch, &FeedCommands::default()).unwrap();
        assert_eq!(round.round_id, RoundId::from(12));
    }

    #[test]
    fn test_unknown_commands_yield_nothing() {
        let batch = events(json!([{"cmd": 42, "sid": 1, "d1": 1, "d2": 1, "d3": 1}]));
        assert_eq!(
            correlate(Variant::Digest, &batch, &FeedCommands::default()),
            Err(RoundError::NoResultEvent { cmd: 2006 })
        );
        assert_eq!(
            correlate(Variant::Plain, &batch, &FeedCommands::default()),
            Err(RoundError::NoResultEvent { cmd: 1003 })
        );
    }

    #[test]
    fn test_invalid_die_is_rejected() {
        let batch = events(json!([{"cmd": 2006, "sid": 3, "d1": 7, "d2": 1, "d3": 1}]));
        assert_eq!(
            correlate(Variant::Digest, &batch, &FeedCommands::default()),
            Err(RoundError::InvalidDie {
                position: 1,
                value: 7
            })
        );
    }
}
