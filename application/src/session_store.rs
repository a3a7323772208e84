//! Session store
//!
//! Holds the one live [`Session`] of a user and hands out snapshots. Every
//! mutation names the session generation it was computed for; a mutation
//! addressed to a generation that has since been reset is dropped and
//! reported as [`StoreError::Stale`].

use duel_domain::{
    Answer, DomainError, Leaderboard, ParticipantId, Question, ScoreCard, Session, Turn,
    summarize,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned by [`SessionStore`] mutations
#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("Session generation {expected} is gone (current: {current:?})")]
    Stale { expected: u64, current: Option<u64> },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl StoreError {
    pub fn is_stale(&self) -> bool {
        matches!(self, StoreError::Stale { .. })
    }
}

#[derive(Debug)]
struct StoreState {
    session: Option<Session>,
    next_generation: u64,
}

/// Session-scoped storage for one user
#[derive(Debug)]
pub struct SessionStore {
    state: Mutex<StoreState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                session: None,
                next_generation: 1,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn live(state: &mut StoreState) -> &mut Session {
        let next_generation = &mut state.next_generation;
        state.session.get_or_insert_with(|| {
            let session = Session::new(*next_generation);
            *next_generation += 1;
            debug!(generation = session.generation(), "Created session");
            session
        })
    }

    fn live_at(state: &mut StoreState, generation: u64) -> Result<&mut Session, StoreError> {
        match state.session.as_mut() {
            Some(session) if session.generation() == generation => Ok(session),
            other => Err(StoreError::Stale {
                expected: generation,
                current: other.map(|s| s.generation()),
            }),
        }
    }

    /// Snapshot of the live session, creating an empty one if needed
    pub fn get_or_create(&self) -> Session {
        Self::live(&mut self.lock()).clone()
    }

    /// Run a read-only closure against the live session
    pub fn with_session<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        f(Self::live(&mut self.lock()))
    }

    /// Leaderboard of the live session
    pub fn leaderboard(&self) -> Leaderboard {
        self.with_session(summarize)
    }

    /// Append a pending turn; returns `(generation, sequence_index)`
    pub fn begin_turn(&self, question: Question) -> (u64, u64) {
        let mut state = self.lock();
        let session = Self::live(&mut state);
        let sequence_index = session.begin_turn(question);
        (session.generation(), sequence_index)
    }

    /// Append an already-built turn to the session of `generation`
    pub fn append_turn(&self, generation: u64, turn: Turn) -> Result<(), StoreError> {
        let mut state = self.lock();
        Self::live_at(&mut state, generation)?.append_turn(turn);
        Ok(())
    }

    pub fn record_answers(
        &self,
        generation: u64,
        sequence_index: u64,
        answers: BTreeMap<ParticipantId, Answer>,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        Self::live_at(&mut state, generation)?.record_answers(sequence_index, answers)?;
        Ok(())
    }

    /// Record the scores of a turn and return the terminal turn
    pub fn record_scores(
        &self,
        generation: u64,
        sequence_index: u64,
        card: &ScoreCard,
        warning: Option<String>,
    ) -> Result<Turn, StoreError> {
        let mut state = self.lock();
        let session = Self::live_at(&mut state, generation)?;
        session.record_scores(sequence_index, card, warning)?;
        session
            .turn(sequence_index)
            .cloned()
            .ok_or(StoreError::Domain(DomainError::TurnNotFound(sequence_index)))
    }

    /// Set the advisory example-question hint of the live session
    pub fn set_hint(&self, hint: impl Into<String>) {
        Self::live(&mut self.lock()).set_hint(hint);
    }

    pub fn clear_hint(&self) {
        Self::live(&mut self.lock()).clear_hint();
    }

    /// Discard all state. The next access creates a fresh session with a
    /// higher generation; results still in flight for the old one are dropped.
    pub fn reset(&self) {
        let mut state = self.lock();
        if let Some(old) = state.session.take() {
            info!(
                generation = old.generation(),
                turns = old.transcript().len(),
                "Session reset"
            );
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_domain::Score;

    fn q(text: &str) -> Question {
        Question::parse(text).unwrap()
    }

    fn answers() -> BTreeMap<ParticipantId, Answer> {
        BTreeMap::from([
            (ParticipantId::A, Answer::delivered("a")),
            (ParticipantId::B, Answer::delivered("b")),
        ])
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let store = SessionStore::new();
        let first = store.get_or_create();
        let second = store.get_or_create();
        assert_eq!(first.generation(), second.generation());
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_yields_fresh_empty_session() {
        let store = SessionStore::new();
        let (generation, seq) = store.begin_turn(q("How is a yearly bonus taxed?"));
        store.record_answers(generation, seq, answers()).unwrap();
        store
            .record_scores(generation, seq, &ScoreCard::zero(), None)
            .unwrap();
        store.set_hint("Advance tax on selling property?");

        store.reset();
        let fresh = store.get_or_create();

        assert!(fresh.generation() > generation);
        assert!(fresh.transcript().is_empty());
        assert!(fresh.scores(ParticipantId::A).is_empty());
        assert!(fresh.scores(ParticipantId::B).is_empty());
        assert!(fresh.pending_hint().is_none());
    }

    #[test]
    fn test_reset_is_safe_on_empty_store() {
        let store = SessionStore::new();
        store.reset();
        store.reset();
        assert!(store.get_or_create().is_empty());
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let store = SessionStore::new();
        let (generation, seq) = store.begin_turn(q("Penalty for filing return 2 months late?"));

        store.reset();

        let err = store.record_answers(generation, seq, answers()).unwrap_err();
        assert!(err.is_stale());

        let err = store
            .record_scores(generation, seq, &ScoreCard::zero(), None)
            .unwrap_err();
        assert!(err.is_stale());

        let current = store.get_or_create();
        assert!(current.transcript().is_empty());
        assert!(current.scores(ParticipantId::A).is_empty());
    }

    #[test]
    fn test_record_scores_returns_terminal_turn() {
        let store = SessionStore::new();
        let (generation, seq) = store.begin_turn(q("Q"));
        store.record_answers(generation, seq, answers()).unwrap();
        let card = ScoreCard::from_pair(Score::new(4).unwrap(), Score::new(2).unwrap());
        let turn = store.record_scores(generation, seq, &card, None).unwrap();
        assert!(turn.is_scored());

        let board = store.leaderboard();
        assert_eq!(board.entry(ParticipantId::A).unwrap().count, 1);
    }

    #[test]
    fn test_append_turn_to_stale_generation() {
        let store = SessionStore::new();
        let generation = store.get_or_create().generation();
        store.reset();
        let err = store
            .append_turn(generation, Turn::new(1, q("Q")))
            .unwrap_err();
        assert!(err.is_stale());
    }
}
