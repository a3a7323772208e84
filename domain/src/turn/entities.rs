//! Turn entity

use super::value_objects::Answer;
use crate::core::error::DomainError;
use crate::core::question::Question;
use crate::participant::ParticipantId;
use crate::scoring::{Score, ScoreCard};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle state of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    /// Question recorded, answers outstanding
    Pending,
    /// Both answers settled, waiting for the judge
    Answered,
    /// Scores recorded; terminal
    Scored,
}

impl TurnState {
    pub fn as_str(&self) -> &str {
        match self {
            TurnState::Pending => "pending",
            TurnState::Answered => "answered",
            TurnState::Scored => "scored",
        }
    }
}

/// One question with its two answers and two scores (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    sequence_index: u64,
    question: Question,
    answers: BTreeMap<ParticipantId, Answer>,
    scores: BTreeMap<ParticipantId, Score>,
    /// Set when the judge reply was unusable and zero scores were substituted
    #[serde(skip_serializing_if = "Option::is_none")]
    scoring_warning: Option<String>,
    state: TurnState,
}

impl Turn {
    pub fn new(sequence_index: u64, question: Question) -> Self {
        Self {
            sequence_index,
            question,
            answers: BTreeMap::new(),
            scores: BTreeMap::new(),
            scoring_warning: None,
            state: TurnState::Pending,
        }
    }

    pub fn sequence_index(&self) -> u64 {
        self.sequence_index
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_scored(&self) -> bool {
        self.state == TurnState::Scored
    }

    pub fn answer(&self, id: ParticipantId) -> Option<&Answer> {
        self.answers.get(&id)
    }

    pub fn score(&self, id: ParticipantId) -> Option<Score> {
        self.scores.get(&id).copied()
    }

    pub fn scoring_warning(&self) -> Option<&str> {
        self.scoring_warning.as_deref()
    }

    /// Record both answers. Only valid while the turn is pending.
    pub fn record_answers(
        &mut self,
        answers: BTreeMap<ParticipantId, Answer>,
    ) -> Result<(), DomainError> {
        match self.state {
            TurnState::Pending => {}
            TurnState::Answered => {
                return Err(DomainError::AnswersAlreadyRecorded(self.sequence_index));
            }
            TurnState::Scored => return Err(DomainError::TurnAlreadyScored(self.sequence_index)),
        }
        if let Some(missing) = ParticipantId::ALL
            .into_iter()
            .find(|id| !answers.contains_key(id))
        {
            return Err(DomainError::UnknownParticipant(format!(
                "turn #{} has no answer for participant {}",
                self.sequence_index, missing
            )));
        }
        self.answers = answers;
        self.state = TurnState::Answered;
        Ok(())
    }

    /// Record the judged scores and make the turn terminal.
    pub fn record_scores(
        &mut self,
        card: &ScoreCard,
        warning: Option<String>,
    ) -> Result<(), DomainError> {
        match self.state {
            TurnState::Scored => Err(DomainError::TurnAlreadyScored(self.sequence_index)),
            TurnState::Pending => Err(DomainError::OrchestrationOrder(self.sequence_index)),
            TurnState::Answered => {
                self.scores = card.iter().collect();
                self.scoring_warning = warning;
                self.state = TurnState::Scored;
                Ok(())
            }
        }
    }
}
