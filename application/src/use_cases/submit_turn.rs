//! Submit Turn use case
//!
//! Orchestrates one duel turn: both participants answer concurrently, the
//! judge grades the settled answers, and the result is committed to the
//! session store.

use crate::config::TurnParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::progress::{NoProgress, TurnProgressNotifier};
use crate::ports::responder::{Responder, ResponderContext, ResponderError};
use crate::ports::scorer::{Scorer, ScorerError};
use crate::session_store::{SessionStore, StoreError};
use duel_domain::{
    Answer, ContextPolicy, DomainError, Lineup, Message, ParticipantId, Question, ScoreCard,
    Turn,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur while submitting a turn
///
/// Responder and judge failures are not errors: they degrade into
/// placeholder answers and zero scores on the returned [`Turn`].
#[derive(Error, Debug)]
pub enum SubmitTurnError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(#[source] DomainError),

    #[error("Turn {sequence_index} was discarded because the session was reset")]
    Discarded { sequence_index: u64 },

    #[error("Session store error: {0}")]
    Store(#[from] DomainError),
}

impl SubmitTurnError {
    fn from_store(err: StoreError, sequence_index: u64) -> Self {
        match err {
            StoreError::Stale { .. } => SubmitTurnError::Discarded { sequence_index },
            StoreError::Domain(e) => SubmitTurnError::Store(e),
        }
    }
}

/// Use case for running one turn of the duel
pub struct SubmitTurnUseCase<R: Responder + 'static, S: Scorer + 'static> {
    responder: Arc<R>,
    scorer: Arc<S>,
    lineup: Lineup,
    params: TurnParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<R: Responder + 'static, S: Scorer + 'static> SubmitTurnUseCase<R, S> {
    pub fn new(responder: Arc<R>, scorer: Arc<S>, lineup: Lineup) -> Self {
        Self {
            responder,
            scorer,
            lineup,
            params: TurnParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: TurnParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    pub fn params(&self) -> &TurnParams {
        &self.params
    }

    /// Run a turn with default (no-op) progress
    pub async fn submit(
        &self,
        store: &SessionStore,
        question: &str,
    ) -> Result<Turn, SubmitTurnError> {
        self.submit_with_progress(store, question, &NoProgress).await
    }

    /// Run a turn with progress callbacks
    pub async fn submit_with_progress(
        &self,
        store: &SessionStore,
        question: &str,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<Turn, SubmitTurnError> {
        let question = Question::parse(question).map_err(SubmitTurnError::InvalidQuestion)?;

        // History is taken before the new turn exists so it never contains
        // the question being asked.
        let histories = match self.params.context_policy {
            ContextPolicy::Threaded => store.with_session(|session| {
                ParticipantId::ALL
                    .into_iter()
                    .map(|id| (id, session.history_for(id)))
                    .collect::<BTreeMap<_, _>>()
            }),
            ContextPolicy::Stateless => BTreeMap::new(),
        };

        let (generation, sequence_index) = store.begin_turn(question.clone());
        info!(generation, sequence_index, "Turn started");
        progress.on_turn_start(sequence_index, question.content());
        self.conversation_logger.log(ConversationEvent::new(
            "turn_started",
            json!({
                "generation": generation,
                "sequence_index": sequence_index,
                "question": question.content(),
            }),
        ));

        let answers = self
            .collect_answers(generation, &question, histories, progress)
            .await;

        store
            .record_answers(generation, sequence_index, answers.clone())
            .map_err(|e| self.discard(e, sequence_index))?;

        progress.on_scoring_start();
        let (card, warning) = self.judge(&question, &answers).await;
        progress.on_scoring_complete(&card, warning.is_some());

        let turn = store
            .record_scores(generation, sequence_index, &card, warning.clone())
            .map_err(|e| self.discard(e, sequence_index))?;

        let scores: BTreeMap<&str, u8> = card
            .iter()
            .map(|(id, s)| (id.as_str(), s.value()))
            .collect();
        info!(sequence_index, ?scores, "Turn scored");
        self.conversation_logger.log(ConversationEvent::new(
            "turn_scored",
            json!({
                "generation": generation,
                "sequence_index": sequence_index,
                "scores": scores,
                "warning": warning,
            }),
        ));

        Ok(turn)
    }

    /// Ask both participants concurrently and key the results by participant
    async fn collect_answers(
        &self,
        generation: u64,
        question: &Question,
        mut histories: BTreeMap<ParticipantId, Vec<Message>>,
        progress: &dyn TurnProgressNotifier,
    ) -> BTreeMap<ParticipantId, Answer> {
        let mut join_set = JoinSet::new();

        for participant in self.lineup.iter() {
            let responder = Arc::clone(&self.responder);
            let id = participant.id;
            let context = ResponderContext::new(
                participant.clone(),
                generation,
                self.params.context_policy,
            )
            .with_history(histories.remove(&id).unwrap_or_default());
            let question = question.clone();
            let timeout = self.params.responder_timeout;

            join_set.spawn(async move {
                let result =
                    match tokio::time::timeout(timeout, responder.answer(&context, &question))
                        .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(ResponderError::Timeout(timeout)),
                    };
                (id, result)
            });
        }

        let mut answers = BTreeMap::new();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((id, Ok(text))) if !text.trim().is_empty() => {
                    debug!(participant = %id, chars = text.len(), "Answer received");
                    progress.on_answer_complete(id, true);
                    answers.insert(id, Answer::delivered(text));
                }
                Ok((id, Ok(_))) => {
                    warn!(participant = %id, "Responder returned an empty answer");
                    progress.on_answer_complete(id, false);
                    answers.insert(id, Answer::unavailable("empty reply"));
                }
                Ok((id, Err(e))) => {
                    warn!(participant = %id, "Responder failed: {}", e);
                    progress.on_answer_complete(id, false);
                    answers.insert(id, Answer::unavailable(e.to_string()));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // A panicked task has no id to report; fill the gap.
        for id in ParticipantId::ALL {
            answers.entry(id).or_insert_with(|| {
                progress.on_answer_complete(id, false);
                Answer::unavailable("responder task aborted")
            });
        }

        for (id, answer) in &answers {
            self.conversation_logger.log(ConversationEvent::new(
                "answer_received",
                json!({
                    "generation": generation,
                    "participant": id.as_str(),
                    "delivered": answer.is_delivered(),
                    "text": answer.text(),
                }),
            ));
        }

        answers
    }

    /// Grade the answers; an unusable judgement falls back to all zeros
    async fn judge(
        &self,
        question: &Question,
        answers: &BTreeMap<ParticipantId, Answer>,
    ) -> (ScoreCard, Option<String>) {
        let timeout = self.params.scorer_timeout;
        let result = match tokio::time::timeout(timeout, self.scorer.score(question, answers)).await
        {
            Ok(result) => result,
            Err(_) => Err(ScorerError::Timeout(timeout)),
        };

        match result {
            Ok(card) => (card, None),
            Err(e) => {
                warn!("Scoring failed, recording zeros: {}", e);
                let warning = format!("Auto-scoring failed ({}); both answers scored 0", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "scoring_fallback",
                    json!({ "question": question.content(), "error": e.to_string() }),
                ));
                (ScoreCard::zero(), Some(warning))
            }
        }
    }

    fn discard(&self, err: StoreError, sequence_index: u64) -> SubmitTurnError {
        if err.is_stale() {
            info!(sequence_index, "Session was reset mid-turn; discarding results");
        }
        SubmitTurnError::from_store(err, sequence_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use duel_domain::{Participant, ParticipantBackend, Score, TurnState, parse_score_card, summarize};
    use std::sync::Mutex;
    use std::time::Duration;

    const SALARY_QUESTION: &str = "Do I have to file if my salary is Rs 550,000?";

    /// Scripted behaviour for one participant
    #[derive(Clone)]
    enum Script {
        Reply(&'static str),
        Fail,
        Hang,
    }

    struct MockResponder {
        a: Script,
        b: Script,
        contexts: Mutex<Vec<ResponderContext>>,
    }

    impl MockResponder {
        fn new(a: Script, b: Script) -> Self {
            Self {
                a,
                b,
                contexts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Responder for MockResponder {
        async fn answer(
            &self,
            context: &ResponderContext,
            _question: &Question,
        ) -> Result<String, ResponderError> {
            self.contexts.lock().unwrap().push(context.clone());
            let script = match context.participant.id {
                ParticipantId::A => self.a.clone(),
                ParticipantId::B => self.b.clone(),
            };
            match script {
                Script::Reply(text) => Ok(text.to_string()),
                Script::Fail => Err(ResponderError::RunNotCompleted {
                    status: "failed".to_string(),
                    detail: None,
                }),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok("too late".to_string())
                }
            }
        }
    }

    /// Judge that parses a canned reply, like a real adapter would
    struct MockScorer {
        reply: &'static str,
        seen: Mutex<Vec<BTreeMap<ParticipantId, Answer>>>,
    }

    impl MockScorer {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Scorer for MockScorer {
        async fn score(
            &self,
            _question: &Question,
            answers: &BTreeMap<ParticipantId, Answer>,
        ) -> Result<ScoreCard, ScorerError> {
            self.seen.lock().unwrap().push(answers.clone());
            Ok(parse_score_card(self.reply)?)
        }
    }

    /// Responder that resets the session while its answer is in flight
    struct ResettingResponder {
        store: Arc<SessionStore>,
    }

    #[async_trait]
    impl Responder for ResettingResponder {
        async fn answer(
            &self,
            context: &ResponderContext,
            _question: &Question,
        ) -> Result<String, ResponderError> {
            if context.participant.id == ParticipantId::A {
                self.store.reset();
            }
            Ok("answer".to_string())
        }
    }

    /// Responder that snapshots the transcript while its answer is in flight
    struct ObservingResponder {
        store: Arc<SessionStore>,
        observed: Mutex<Vec<Vec<(u64, TurnState, String)>>>,
    }

    #[async_trait]
    impl Responder for ObservingResponder {
        async fn answer(
            &self,
            _context: &ResponderContext,
            _question: &Question,
        ) -> Result<String, ResponderError> {
            let snapshot = self
                .store
                .get_or_create()
                .transcript()
                .iter()
                .map(|t| (t.sequence_index(), t.state(), t.question().content().to_string()))
                .collect();
            self.observed.lock().unwrap().push(snapshot);
            Ok("answer".to_string())
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn lineup() -> Lineup {
        Lineup::new(
            Participant::new(
                ParticipantId::A,
                ParticipantBackend::Assistant {
                    assistant_id: "asst_a".to_string(),
                },
            ),
            Participant::new(
                ParticipantId::B,
                ParticipantBackend::Assistant {
                    assistant_id: "asst_b".to_string(),
                },
            ),
        )
        .unwrap()
    }

    fn use_case(
        responder: MockResponder,
        scorer: MockScorer,
    ) -> SubmitTurnUseCase<MockResponder, MockScorer> {
        SubmitTurnUseCase::new(Arc::new(responder), Arc::new(scorer), lineup())
    }

    #[tokio::test]
    async fn test_salary_question_scenario() {
        let store = SessionStore::new();
        let use_case = use_case(
            MockResponder::new(Script::Reply("T_A"), Script::Reply("T_B")),
            MockScorer::replying(r#"{"A":4,"B":2}"#),
        );

        let turn = use_case.submit(&store, SALARY_QUESTION).await.unwrap();

        assert_eq!(turn.state(), TurnState::Scored);
        assert_eq!(turn.answer(ParticipantId::A), Some(&Answer::delivered("T_A")));
        assert_eq!(turn.answer(ParticipantId::B), Some(&Answer::delivered("T_B")));
        assert_eq!(turn.score(ParticipantId::A), Some(Score::new(4).unwrap()));
        assert_eq!(turn.score(ParticipantId::B), Some(Score::new(2).unwrap()));
        assert!(turn.scoring_warning().is_none());

        let board = store.leaderboard();
        let a = board.entry(ParticipantId::A).unwrap();
        let b = board.entry(ParticipantId::B).unwrap();
        assert_eq!((a.mean.to_string(), a.count), ("4.00".to_string(), 1));
        assert_eq!((b.mean.to_string(), b.count), ("2.00".to_string(), 1));
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected_without_state_change() {
        let store = SessionStore::new();
        let use_case = use_case(
            MockResponder::new(Script::Reply("a"), Script::Reply("b")),
            MockScorer::replying(r#"{"A":1,"B":1}"#),
        );

        let err = use_case.submit(&store, "   \n").await.unwrap_err();

        assert!(matches!(err, SubmitTurnError::InvalidQuestion(_)));
        assert!(store.get_or_create().transcript().is_empty());
    }

    #[tokio::test]
    async fn test_one_responder_failing_still_scores_both() {
        let store = SessionStore::new();
        let scorer = Arc::new(MockScorer::replying(r#"{"A":0,"B":5}"#));
        let use_case = SubmitTurnUseCase::new(
            Arc::new(MockResponder::new(Script::Fail, Script::Reply("genuine"))),
            Arc::clone(&scorer),
            lineup(),
        );

        let turn = use_case.submit(&store, "What is TDS?").await.unwrap();

        let a = turn.answer(ParticipantId::A).unwrap();
        assert!(!a.is_delivered());
        assert!(a.text().starts_with(duel_domain::UNAVAILABLE_PREFIX));
        assert!(a.text().contains("failed"));
        assert_eq!(turn.answer(ParticipantId::B), Some(&Answer::delivered("genuine")));
        assert!(turn.is_scored());

        // The judge saw the placeholder, keyed by participant
        let seen = scorer.seen.lock().unwrap();
        assert!(!seen[0][&ParticipantId::A].is_delivered());
    }

    #[tokio::test]
    async fn test_invalid_judge_reply_falls_back_to_zero() {
        let store = SessionStore::new();
        let use_case = use_case(
            MockResponder::new(Script::Reply("a"), Script::Reply("b")),
            MockScorer::replying("Both answers look fine to me."),
        );

        let turn = use_case.submit(&store, "Q").await.unwrap();

        assert!(turn.is_scored());
        assert_eq!(turn.score(ParticipantId::A), Some(Score::zero()));
        assert_eq!(turn.score(ParticipantId::B), Some(Score::zero()));
        assert!(turn.scoring_warning().is_some());

        let session = store.get_or_create();
        assert_eq!(session.scores(ParticipantId::A), &[Score::zero()]);
        assert_eq!(session.scores(ParticipantId::B), &[Score::zero()]);
    }

    #[tokio::test]
    async fn test_out_of_range_judge_reply_falls_back_to_zero() {
        let store = SessionStore::new();
        let use_case = use_case(
            MockResponder::new(Script::Reply("a"), Script::Reply("b")),
            MockScorer::replying(r#"{"A":7,"B":2}"#),
        );

        let turn = use_case.submit(&store, "Q").await.unwrap();
        assert_eq!(turn.score(ParticipantId::A), Some(Score::zero()));
        assert_eq!(turn.score(ParticipantId::B), Some(Score::zero()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_responder_timeout_becomes_placeholder() {
        let store = SessionStore::new();
        let use_case = use_case(
            MockResponder::new(Script::Hang, Script::Reply("quick")),
            MockScorer::replying(r#"{"A":0,"B":3}"#),
        )
        .with_params(TurnParams::default().with_responder_timeout(Duration::from_secs(5)));

        let turn = use_case.submit(&store, "Q").await.unwrap();

        let a = turn.answer(ParticipantId::A).unwrap();
        assert!(!a.is_delivered());
        assert!(a.text().contains("No reply within"));
        assert_eq!(turn.score(ParticipantId::B), Some(Score::new(3).unwrap()));
    }

    #[tokio::test]
    async fn test_reset_mid_turn_discards_results() {
        let store = Arc::new(SessionStore::new());
        let use_case = SubmitTurnUseCase::new(
            Arc::new(ResettingResponder {
                store: Arc::clone(&store),
            }),
            Arc::new(MockScorer::replying(r#"{"A":5,"B":5}"#)),
            lineup(),
        );

        let err = use_case.submit(&store, "Q").await.unwrap_err();

        assert!(matches!(err, SubmitTurnError::Discarded { sequence_index: 1 }));
        let session = store.get_or_create();
        assert!(session.transcript().is_empty());
        assert!(session.scores(ParticipantId::A).is_empty());
    }

    #[tokio::test]
    async fn test_pending_turn_visible_while_answers_in_flight() {
        let store = Arc::new(SessionStore::new());
        let responder = Arc::new(ObservingResponder {
            store: Arc::clone(&store),
            observed: Mutex::new(Vec::new()),
        });
        let use_case = SubmitTurnUseCase::new(
            Arc::clone(&responder),
            Arc::new(MockScorer::replying(r#"{"A":3,"B":3}"#)),
            lineup(),
        );

        let turn = use_case.submit(&store, SALARY_QUESTION).await.unwrap();
        assert_eq!(turn.state(), TurnState::Scored);

        let observed = responder.observed.lock().unwrap();
        assert_eq!(observed.len(), 2);
        for snapshot in observed.iter() {
            assert_eq!(
                snapshot,
                &vec![(1, TurnState::Pending, SALARY_QUESTION.to_string())]
            );
        }
    }

    #[tokio::test]
    async fn test_threaded_policy_passes_history() {
        let store = SessionStore::new();
        let responder = Arc::new(MockResponder::new(Script::Reply("a"), Script::Fail));
        let use_case = SubmitTurnUseCase::new(
            Arc::clone(&responder),
            Arc::new(MockScorer::replying(r#"{"A":3,"B":0}"#)),
            lineup(),
        );

        use_case.submit(&store, "first").await.unwrap();
        use_case.submit(&store, "second").await.unwrap();

        let contexts = responder.contexts.lock().unwrap();
        let second_a = contexts
            .iter()
            .rev()
            .find(|c| c.participant.id == ParticipantId::A)
            .unwrap();
        assert_eq!(second_a.history.len(), 2);
        // B never delivered, so it has nothing to remember
        let second_b = contexts
            .iter()
            .rev()
            .find(|c| c.participant.id == ParticipantId::B)
            .unwrap();
        assert!(second_b.history.is_empty());
    }

    #[tokio::test]
    async fn test_stateless_policy_passes_no_history() {
        let store = SessionStore::new();
        let responder = Arc::new(MockResponder::new(Script::Reply("a"), Script::Reply("b")));
        let use_case = SubmitTurnUseCase::new(
            Arc::clone(&responder),
            Arc::new(MockScorer::replying(r#"{"A":3,"B":3}"#)),
            lineup(),
        )
        .with_params(TurnParams::default().with_context_policy(ContextPolicy::Stateless));

        use_case.submit(&store, "first").await.unwrap();
        use_case.submit(&store, "second").await.unwrap();

        let contexts = responder.contexts.lock().unwrap();
        assert!(contexts.iter().all(|c| c.history.is_empty()));
        assert!(
            contexts
                .iter()
                .all(|c| c.policy == ContextPolicy::Stateless)
        );
    }

    #[tokio::test]
    async fn test_score_lists_track_scored_turns() {
        let store = SessionStore::new();
        let use_case = use_case(
            MockResponder::new(Script::Reply("a"), Script::Reply("b")),
            MockScorer::replying(r#"{"A":2,"B":4}"#),
        );

        for question in ["one", "two", "three"] {
            use_case.submit(&store, question).await.unwrap();
            let session = store.get_or_create();
            for id in ParticipantId::ALL {
                assert_eq!(session.scores(id).len(), session.scored_turn_count());
            }
        }
        assert_eq!(summarize(&store.get_or_create()), store.leaderboard());
    }

    #[tokio::test]
    async fn test_conversation_events() {
        let store = SessionStore::new();
        let logger = Arc::new(RecordingLogger::default());
        let use_case = use_case(
            MockResponder::new(Script::Reply("a"), Script::Reply("b")),
            MockScorer::replying("nope"),
        )
        .with_conversation_logger(logger.clone());

        use_case.submit(&store, "Q").await.unwrap();

        let events = logger.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "turn_started",
                "answer_received",
                "answer_received",
                "scoring_fallback",
                "turn_scored"
            ]
        );
    }
}
