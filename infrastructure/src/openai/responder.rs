//! OpenAI-backed [`Responder`] adapter
//!
//! Dispatches on the participant's backend:
//!
//! - **assistant**: post the question to a thread, start a run, poll the run
//!   status at a fixed interval until it is terminal or the deadline passes,
//!   then read the newest thread message.
//! - **chat**: one chat completion carrying the participant's history.

use super::client::OpenAiClient;
use super::error::OpenAiError;
use super::types::RunStatus;
use async_trait::async_trait;
use duel_application::ports::responder::{Responder, ResponderContext, ResponderError};
use duel_domain::{ContextPolicy, Message, ParticipantBackend, ParticipantId, Question};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

impl From<OpenAiError> for ResponderError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::UnexpectedResponse(msg) => ResponderError::MalformedContent(msg),
            other => ResponderError::RequestFailed(other.to_string()),
        }
    }
}

/// Polling cadence and deadline for assistant runs
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub deadline: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            deadline: Duration::from_secs(120),
        }
    }
}

/// Responder adapter for both OpenAI backends
pub struct OpenAiResponder {
    client: Arc<OpenAiClient>,
    poll: PollSettings,
    /// Long-lived threads under the threaded policy, keyed by session generation
    threads: Mutex<HashMap<(u64, ParticipantId), String>>,
}

impl OpenAiResponder {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self {
            client,
            poll: PollSettings::default(),
            threads: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    fn cached_thread(&self, generation: u64, id: ParticipantId) -> Option<String> {
        self.threads
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(&(generation, id))
            .cloned()
    }

    fn remember_thread(&self, generation: u64, id: ParticipantId, thread_id: String) {
        let mut threads = self.threads.lock().unwrap_or_else(|p| p.into_inner());
        // Threads of reset sessions are never used again
        threads.retain(|(g, _), _| *g >= generation);
        threads.insert((generation, id), thread_id);
    }

    fn forget_thread(&self, generation: u64, id: ParticipantId) {
        self.threads
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .remove(&(generation, id));
    }

    /// Cancel an overdue run and drop its thread, which stays locked while the run is active
    async fn abandon_run(&self, context: &ResponderContext, thread_id: &str, run_id: &str) {
        let id = context.participant.id;
        self.forget_thread(context.session_generation, id);
        match self.client.cancel_run(thread_id, run_id).await {
            Ok(run) => debug!(
                participant = %id,
                run = %run_id,
                status = run.status.as_str(),
                "Cancelled overdue run"
            ),
            Err(e) => warn!(
                participant = %id,
                run = %run_id,
                "Failed to cancel overdue run: {}",
                e
            ),
        }
    }

    async fn thread_for(&self, context: &ResponderContext) -> Result<String, ResponderError> {
        let id = context.participant.id;
        let generation = context.session_generation;

        if context.policy == ContextPolicy::Threaded
            && let Some(thread_id) = self.cached_thread(generation, id)
        {
            return Ok(thread_id);
        }

        let thread = self.client.create_thread().await?;
        debug!(participant = %id, thread = %thread.id, "Created thread");
        if context.policy == ContextPolicy::Threaded {
            self.remember_thread(generation, id, thread.id.clone());
        }
        Ok(thread.id)
    }

    async fn ask_assistant(
        &self,
        context: &ResponderContext,
        assistant_id: &str,
        question: &Question,
    ) -> Result<String, ResponderError> {
        let started = Instant::now();
        let thread_id = self.thread_for(context).await?;

        self.client
            .add_user_message(&thread_id, question.content())
            .await?;
        let mut run = self.client.create_run(&thread_id, assistant_id).await?;

        while !run.status.is_terminal() {
            if started.elapsed() >= self.poll.deadline {
                self.abandon_run(context, &thread_id, &run.id).await;
                return Err(ResponderError::Timeout(self.poll.deadline));
            }
            tokio::time::sleep(self.poll.interval).await;
            run = self.client.retrieve_run(&thread_id, &run.id).await?;
        }

        if run.status != RunStatus::Completed {
            return Err(ResponderError::RunNotCompleted {
                status: run.status.as_str().to_string(),
                detail: run.failure_detail(),
            });
        }

        let message = self.client.latest_message(&thread_id).await?;
        if message.role != "assistant" {
            return Err(ResponderError::MalformedContent(format!(
                "newest message has role '{}'",
                message.role
            )));
        }
        let text = message.text().ok_or_else(|| {
            ResponderError::MalformedContent("reply has no text content".to_string())
        })?;

        info!(
            participant = %context.participant.id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Assistant run completed"
        );
        Ok(text)
    }

    async fn ask_chat(
        &self,
        context: &ResponderContext,
        model: &str,
        question: &Question,
    ) -> Result<String, ResponderError> {
        let mut messages: Vec<Message> = context.history.clone();
        messages.push(Message::user(question.content()));

        self.client
            .chat_completion(model, &messages, None)
            .await?
            .ok_or_else(|| ResponderError::MalformedContent("reply has no content".to_string()))
    }
}

#[async_trait]
impl Responder for OpenAiResponder {
    async fn answer(
        &self,
        context: &ResponderContext,
        question: &Question,
    ) -> Result<String, ResponderError> {
        match &context.participant.backend {
            ParticipantBackend::Assistant { assistant_id } => {
                self.ask_assistant(context, assistant_id, question).await
            }
            ParticipantBackend::Chat { model } => self.ask_chat(context, model, question).await,
        }
    }
}
