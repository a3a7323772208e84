//! Responder port
//!
//! Defines the interface for obtaining one participant's answer to a question.

use async_trait::async_trait;
use duel_domain::{ContextPolicy, Message, Participant, Question};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while a participant produces its answer
///
/// None of these abort a turn: the orchestrator turns them into a
/// diagnostic placeholder answer.
#[derive(Error, Debug)]
pub enum ResponderError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Run ended with status '{status}'{}", detail_suffix(.detail))]
    RunNotCompleted {
        status: String,
        detail: Option<String>,
    },

    #[error("Malformed reply: {0}")]
    MalformedContent(String),

    #[error("No reply within {0:?}")]
    Timeout(Duration),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

/// Everything a responder needs to know about who is answering
#[derive(Debug, Clone)]
pub struct ResponderContext {
    /// Participant whose backend must produce the answer
    pub participant: Participant,
    /// Generation of the session this answer belongs to
    pub session_generation: u64,
    /// Whether the remote conversation persists across turns
    pub policy: ContextPolicy,
    /// Earlier questions and this participant's delivered answers
    ///
    /// Empty under [`ContextPolicy::Stateless`].
    pub history: Vec<Message>,
}

impl ResponderContext {
    pub fn new(participant: Participant, session_generation: u64, policy: ContextPolicy) -> Self {
        Self {
            participant,
            session_generation,
            policy,
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }
}

/// Produces a participant's answer
///
/// Implementations (adapters) live in the infrastructure layer. A call may
/// take arbitrarily long; the orchestrator bounds it with a deadline.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn answer(
        &self,
        context: &ResponderContext,
        question: &Question,
    ) -> Result<String, ResponderError>;
}
