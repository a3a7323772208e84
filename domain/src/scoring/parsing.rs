//! Judge reply parsing.
//!
//! The judge is asked to reply with JSON only, e.g. `{"A":4,"B":2}`. This
//! module turns that reply into a [`ScoreCard`] or a typed
//! [`ScoreParseError`]; nothing else in the workspace inspects judge text.
//!
//! Accepted shapes:
//!
//! | Reply | Result |
//! |-------|--------|
//! | `{"A":4,"B":2}` | scores 4 / 2 |
//! | fenced block containing the object | scores |
//! | extra keys such as `"reason"` | ignored |
//! | missing key, float, string, out of range | error |
//!
//! Prose around the object is *not* accepted: the reply must be strict JSON.

use super::score::{Score, ScoreCard};
use crate::participant::ParticipantId;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a judge reply could not be turned into a score card
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreParseError {
    #[error("judge reply is empty")]
    Empty,

    #[error("judge reply is not valid JSON: {0}")]
    NotJson(String),

    #[error("judge reply is not a JSON object")]
    NotAnObject,

    #[error("judge reply has no score for participant {0}")]
    MissingParticipant(ParticipantId),

    #[error("score for participant {participant} is not an integer: {value}")]
    NotAnInteger {
        participant: ParticipantId,
        value: String,
    },

    #[error("score for participant {participant} is outside 0-5: {value}")]
    OutOfRange {
        participant: ParticipantId,
        value: i64,
    },
}

/// Parse and validate a judge reply.
///
/// # Examples
///
/// ```
/// use duel_domain::participant::ParticipantId;
/// use duel_domain::scoring::parse_score_card;
///
/// let card = parse_score_card(r#"{"A":4,"B":2}"#).unwrap();
/// assert_eq!(card.get(ParticipantId::A).value(), 4);
/// assert_eq!(card.get(ParticipantId::B).value(), 2);
///
/// assert!(parse_score_card("A gets 4, B gets 2").is_err());
/// ```
pub fn parse_score_card(reply: &str) -> Result<ScoreCard, ScoreParseError> {
    let body = strip_code_fence(reply.trim());
    if body.is_empty() {
        return Err(ScoreParseError::Empty);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| ScoreParseError::NotJson(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(ScoreParseError::NotAnObject);
    };

    let mut scores = BTreeMap::new();
    for participant in ParticipantId::ALL {
        let raw = map
            .get(participant.as_str())
            .ok_or(ScoreParseError::MissingParticipant(participant))?;
        let int = raw.as_i64().ok_or_else(|| ScoreParseError::NotAnInteger {
            participant,
            value: raw.to_string(),
        })?;
        let score = Score::new(int).map_err(|_| ScoreParseError::OutOfRange {
            participant,
            value: int,
        })?;
        scores.insert(participant, score);
    }

    // Every participant was inserted above
    ScoreCard::new(scores).map_err(|_| ScoreParseError::NotAnObject)
}

/// Remove a surrounding Markdown code fence (```json ... ```), if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the optional language tag on the opening line
    match inner.find('\n') {
        Some(newline) => inner[newline + 1..].trim(),
        None => inner.trim(),
    }
}
