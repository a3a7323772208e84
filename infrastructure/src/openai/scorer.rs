//! Judge model adapter implementing the [`Scorer`] port

use super::client::OpenAiClient;
use super::error::OpenAiError;
use async_trait::async_trait;
use duel_application::ports::scorer::{Scorer, ScorerError};
use duel_domain::{
    Answer, JudgePrompt, Message, ParticipantId, Question, ScoreCard, ScoreParseError,
    parse_score_card,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Default judge model
pub const DEFAULT_JUDGE_MODEL: &str = "gpt-4o-mini";

impl From<OpenAiError> for ScorerError {
    fn from(err: OpenAiError) -> Self {
        ScorerError::RequestFailed(err.to_string())
    }
}

/// Grades both answers with one chat completion at temperature 0
pub struct JudgeScorer {
    client: Arc<OpenAiClient>,
    model: String,
}

impl JudgeScorer {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self {
            client,
            model: DEFAULT_JUDGE_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl Scorer for JudgeScorer {
    async fn score(
        &self,
        question: &Question,
        answers: &BTreeMap<ParticipantId, Answer>,
    ) -> Result<ScoreCard, ScorerError> {
        let graded: Vec<(ParticipantId, String)> = answers
            .iter()
            .map(|(id, answer)| (*id, answer.text()))
            .collect();
        let messages = [
            Message::system(JudgePrompt::system()),
            Message::user(JudgePrompt::user(question.content(), &graded)),
        ];

        let reply = self
            .client
            .chat_completion(&self.model, &messages, Some(0.0))
            .await?
            .ok_or(ScorerError::InvalidReply(ScoreParseError::Empty))?;
        debug!(model = %self.model, reply = %reply, "Judge reply");

        Ok(parse_score_card(&reply)?)
    }
}
