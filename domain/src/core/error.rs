//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Score {0} is outside the range 0-5")]
    ScoreOutOfRange(i64),

    #[error("Invalid vote polarity: {0}")]
    InvalidPolarity(String),

    #[error("Turn #{0} not found in the transcript")]
    TurnNotFound(u64),

    #[error("Turn #{0} already has answers")]
    AnswersAlreadyRecorded(u64),

    #[error("Turn #{0} cannot be scored before both answers are recorded")]
    OrchestrationOrder(u64),

    #[error("Turn #{0} is already scored")]
    TurnAlreadyScored(u64),
}
