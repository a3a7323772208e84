//! Score value objects

use crate::core::error::DomainError;
use crate::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A judged grade in the inclusive range `0..=5` (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::ScoreOutOfRange(value))
        }
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One score per participant, as produced by the judge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    scores: BTreeMap<ParticipantId, Score>,
}

impl ScoreCard {
    /// Build a card from explicit per-participant scores.
    ///
    /// Every participant must be present.
    pub fn new(scores: BTreeMap<ParticipantId, Score>) -> Result<Self, DomainError> {
        for id in ParticipantId::ALL {
            if !scores.contains_key(&id) {
                return Err(DomainError::UnknownParticipant(format!(
                    "score card is missing participant {}",
                    id
                )));
            }
        }
        Ok(Self { scores })
    }

    pub fn from_pair(a: Score, b: Score) -> Self {
        Self {
            scores: BTreeMap::from([(ParticipantId::A, a), (ParticipantId::B, b)]),
        }
    }

    /// The fallback card used when the judge reply is unusable
    pub fn zero() -> Self {
        Self::from_pair(Score::zero(), Score::zero())
    }

    pub fn get(&self, id: ParticipantId) -> Score {
        self.scores.get(&id).copied().unwrap_or_else(Score::zero)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, Score)> + '_ {
        self.scores.iter().map(|(id, s)| (*id, *s))
    }
}
