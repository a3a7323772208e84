//! Scorer port
//!
//! Defines the interface for grading both answers of a turn.

use async_trait::async_trait;
use duel_domain::{Answer, ParticipantId, Question, ScoreCard, ScoreParseError};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while grading a turn
#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unusable judge reply: {0}")]
    InvalidReply(#[from] ScoreParseError),

    #[error("No judgement within {0:?}")]
    Timeout(Duration),
}

/// Grades the answers of one turn
///
/// Implementations must validate the judge reply through
/// [`duel_domain::parse_score_card`] and report any other shape as
/// [`ScorerError::InvalidReply`].
#[async_trait]
pub trait Scorer: Send + Sync {
    async fn score(
        &self,
        question: &Question,
        answers: &BTreeMap<ParticipantId, Answer>,
    ) -> Result<ScoreCard, ScorerError>;
}
