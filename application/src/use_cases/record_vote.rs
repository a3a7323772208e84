//! Record Vote use case
//!
//! Appends a thumbs-up/down on one answer to the vote log. Votes live
//! outside the session: they survive resets and never affect scores.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::vote_log::{VoteLog, VoteLogError};
use crate::session_store::SessionStore;
use duel_domain::{ParticipantId, Polarity, VoteRecord};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while recording a vote
#[derive(Error, Debug)]
pub enum RecordVoteError {
    #[error("There is no answered turn to vote on yet")]
    NoScoredTurn,

    #[error("Could not write vote: {0}")]
    Log(#[from] VoteLogError),
}

/// Use case for recording user votes
pub struct RecordVoteUseCase<L: VoteLog> {
    log: Arc<L>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<L: VoteLog> RecordVoteUseCase<L> {
    pub fn new(log: Arc<L>) -> Self {
        Self {
            log,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Append one vote record.
    ///
    /// A write failure is logged and returned; the session is untouched.
    pub fn record_vote(
        &self,
        participant: ParticipantId,
        polarity: Polarity,
        question: &str,
        answer: &str,
    ) -> Result<VoteRecord, RecordVoteError> {
        let record = VoteRecord::new(participant, polarity, question, answer);
        if let Err(e) = self.log.append(&record) {
            warn!(participant = %participant, "Failed to append vote: {}", e);
            return Err(e.into());
        }

        info!(participant = %participant, polarity = polarity.value(), "Vote recorded");
        self.conversation_logger.log(ConversationEvent::new(
            "vote_recorded",
            json!({
                "participant": participant.as_str(),
                "polarity": polarity.value(),
                "question": question,
            }),
        ));
        Ok(record)
    }

    /// Vote on a participant's answer in the most recent scored turn
    pub fn vote_on_latest(
        &self,
        store: &SessionStore,
        participant: ParticipantId,
        polarity: Polarity,
    ) -> Result<VoteRecord, RecordVoteError> {
        let target = store.with_session(|session| {
            session.latest_scored_turn().map(|turn| {
                (
                    turn.question().content().to_string(),
                    turn.answer(participant).map(|a| a.text()).unwrap_or_default(),
                )
            })
        });

        let (question, answer) = target.ok_or(RecordVoteError::NoScoredTurn)?;
        self.record_vote(participant, polarity, &question, &answer)
    }
}
