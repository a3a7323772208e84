//! User votes on individual answers.
//!
//! Votes are independent of judge scores: they are appended to an external
//! log and never feed the leaderboard.

use crate::core::error::DomainError;
use crate::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thumbs-up or thumbs-down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Up,
    Down,
}

impl Polarity {
    /// `+1` for up, `-1` for down
    pub fn value(&self) -> i8 {
        match self {
            Polarity::Up => 1,
            Polarity::Down => -1,
        }
    }
}

impl std::str::FromStr for Polarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "+1" | "1" | "+" => Ok(Polarity::Up),
            "down" | "-1" | "-" => Ok(Polarity::Down),
            other => Err(DomainError::InvalidPolarity(other.to_string())),
        }
    }
}

/// One recorded vote (append-only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub timestamp: DateTime<Utc>,
    pub participant: ParticipantId,
    pub polarity: Polarity,
    pub question: String,
    pub answer: String,
}

impl VoteRecord {
    pub fn new(
        participant: ParticipantId,
        polarity: Polarity,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            participant,
            polarity,
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_values() {
        assert_eq!(Polarity::Up.value(), 1);
        assert_eq!(Polarity::Down.value(), -1);
    }

    #[test]
    fn test_polarity_parse() {
        assert_eq!("UP".parse::<Polarity>().unwrap(), Polarity::Up);
        assert_eq!("-1".parse::<Polarity>().unwrap(), Polarity::Down);
        assert!("sideways".parse::<Polarity>().is_err());
    }

    #[test]
    fn test_vote_record_timestamp_override() {
        let ts = DateTime::parse_from_rfc3339("2024-07-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let vote = VoteRecord::new(ParticipantId::A, Polarity::Up, "q", "a").at(ts);
        assert_eq!(vote.timestamp, ts);
        assert_eq!(vote.participant, ParticipantId::A);
    }
}
