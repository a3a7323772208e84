//! Session aggregate

use super::message::Message;
use crate::core::error::DomainError;
use crate::core::question::Question;
use crate::participant::ParticipantId;
use crate::scoring::{Score, ScoreCard};
use crate::turn::{Answer, Turn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The per-user aggregate root: transcript, score history and pending hint
///
/// Invariant: for every participant, `scores(p).len()` equals the number of
/// scored turns in the transcript, in transcript order.
///
/// `generation` identifies this session instance. A reset produces a new
/// session with a higher generation, so results computed for an older one
/// can be recognised and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    generation: u64,
    transcript: Vec<Turn>,
    scores_by_participant: BTreeMap<ParticipantId, Vec<Score>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pending_hint: Option<String>,
    next_sequence: u64,
}

impl Session {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            transcript: Vec::new(),
            scores_by_participant: ParticipantId::ALL
                .into_iter()
                .map(|id| (id, Vec::new()))
                .collect(),
            pending_hint: None,
            next_sequence: 1,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    pub fn turn(&self, sequence_index: u64) -> Option<&Turn> {
        self.transcript
            .iter()
            .find(|t| t.sequence_index() == sequence_index)
    }

    /// Most recent turn that reached the scored state
    pub fn latest_scored_turn(&self) -> Option<&Turn> {
        self.transcript.iter().rev().find(|t| t.is_scored())
    }

    pub fn scores(&self, id: ParticipantId) -> &[Score] {
        self.scores_by_participant
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn scored_turn_count(&self) -> usize {
        self.transcript.iter().filter(|t| t.is_scored()).count()
    }

    pub fn pending_hint(&self) -> Option<&str> {
        self.pending_hint.as_deref()
    }

    /// Set the advisory example-question hint
    pub fn set_hint(&mut self, hint: impl Into<String>) {
        self.pending_hint = Some(hint.into());
    }

    pub fn clear_hint(&mut self) {
        self.pending_hint = None;
    }

    /// Append a new pending turn for `question` and return its sequence index.
    ///
    /// Submitting a question consumes the pending hint.
    pub fn begin_turn(&mut self, question: Question) -> u64 {
        let sequence_index = self.next_sequence;
        self.append_turn(Turn::new(sequence_index, question));
        self.pending_hint = None;
        sequence_index
    }

    /// Append a turn to the transcript.
    ///
    /// A turn that is already scored carries its scores into the score lists
    /// so the length invariant holds.
    pub fn append_turn(&mut self, turn: Turn) {
        self.next_sequence = self.next_sequence.max(turn.sequence_index() + 1);
        if turn.is_scored() {
            for id in ParticipantId::ALL {
                if let Some(score) = turn.score(id) {
                    self.record_score(id, score);
                }
            }
        }
        self.transcript.push(turn);
    }

    /// Store the settled answers of a pending turn
    pub fn record_answers(
        &mut self,
        sequence_index: u64,
        answers: BTreeMap<ParticipantId, Answer>,
    ) -> Result<(), DomainError> {
        self.turn_mut(sequence_index)?.record_answers(answers)
    }

    /// Record the judged scores of a turn and make it terminal.
    ///
    /// Appends one score per participant to the score lists.
    pub fn record_scores(
        &mut self,
        sequence_index: u64,
        card: &ScoreCard,
        warning: Option<String>,
    ) -> Result<(), DomainError> {
        self.turn_mut(sequence_index)?
            .record_scores(card, warning)?;
        for (id, score) in card.iter() {
            self.record_score(id, score);
        }
        Ok(())
    }

    /// Conversation history of one participant: each answered question
    /// followed by that participant's delivered answer.
    pub fn history_for(&self, id: ParticipantId) -> Vec<Message> {
        let mut messages = Vec::new();
        for turn in &self.transcript {
            if let Some(Answer::Delivered { text }) = turn.answer(id) {
                messages.push(Message::user(turn.question().content()));
                messages.push(Message::assistant(text.clone()));
            }
        }
        messages
    }

    fn record_score(&mut self, id: ParticipantId, score: Score) {
        self.scores_by_participant.entry(id).or_default().push(score);
    }

    fn turn_mut(&mut self, sequence_index: u64) -> Result<&mut Turn, DomainError> {
        self.transcript
            .iter_mut()
            .find(|t| t.sequence_index() == sequence_index)
            .ok_or(DomainError::TurnNotFound(sequence_index))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> Question {
        Question::parse(text).unwrap()
    }

    fn both(a: &str, b: &str) -> BTreeMap<ParticipantId, Answer> {
        BTreeMap::from([
            (ParticipantId::A, Answer::delivered(a)),
            (ParticipantId::B, Answer::delivered(b)),
        ])
    }

    fn card(a: i64, b: i64) -> ScoreCard {
        ScoreCard::from_pair(Score::new(a).unwrap(), Score::new(b).unwrap())
    }

    fn assert_invariant(session: &Session) {
        for id in ParticipantId::ALL {
            assert_eq!(session.scores(id).len(), session.scored_turn_count());
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new(3);
        assert_eq!(session.generation(), 3);
        assert!(session.is_empty());
        assert!(session.scores(ParticipantId::A).is_empty());
        assert!(session.pending_hint().is_none());
    }

    #[test]
    fn test_sequence_indices_are_monotonic() {
        let mut session = Session::new(1);
        let first = session.begin_turn(q("How is a yearly bonus taxed?"));
        let second = session.begin_turn(q("Advance tax on selling property?"));
        assert!(second > first);
        let order: Vec<_> = session
            .transcript()
            .iter()
            .map(|t| t.sequence_index())
            .collect();
        assert_eq!(order, vec![first, second]);
    }

    #[test]
    fn test_scores_track_scored_turns() {
        let mut session = Session::new(1);
        let first = session.begin_turn(q("Q1"));
        assert_invariant(&session);

        session.record_answers(first, both("a1", "b1")).unwrap();
        assert_invariant(&session);

        session.record_scores(first, &card(4, 2), None).unwrap();
        assert_invariant(&session);

        let second = session.begin_turn(q("Q2"));
        assert_invariant(&session);
        session.record_answers(second, both("a2", "b2")).unwrap();
        session.record_scores(second, &card(1, 5), None).unwrap();
        assert_invariant(&session);

        let a: Vec<u8> = session.scores(ParticipantId::A).iter().map(|s| s.value()).collect();
        let b: Vec<u8> = session.scores(ParticipantId::B).iter().map(|s| s.value()).collect();
        assert_eq!(a, vec![4, 1]);
        assert_eq!(b, vec![2, 5]);
    }

    #[test]
    fn test_double_scoring_does_not_grow_lists() {
        let mut session = Session::new(1);
        let seq = session.begin_turn(q("Q1"));
        session.record_answers(seq, both("a", "b")).unwrap();
        session.record_scores(seq, &card(3, 3), None).unwrap();
        assert!(session.record_scores(seq, &card(5, 5), None).is_err());
        assert_eq!(session.scores(ParticipantId::A).len(), 1);
        assert_invariant(&session);
    }

    #[test]
    fn test_unknown_turn() {
        let mut session = Session::new(1);
        assert_eq!(
            session.record_answers(42, both("a", "b")),
            Err(DomainError::TurnNotFound(42))
        );
    }

    #[test]
    fn test_append_scored_turn_keeps_invariant() {
        let mut turn = Turn::new(7, q("Penalty for filing return 2 months late?"));
        turn.record_answers(both("a", "b")).unwrap();
        turn.record_scores(&card(2, 3), None).unwrap();

        let mut session = Session::new(1);
        session.append_turn(turn);
        assert_invariant(&session);
        assert_eq!(session.scores(ParticipantId::B)[0].value(), 3);
        assert_eq!(session.begin_turn(q("next")), 8);
    }

    #[test]
    fn test_hint_is_consumed_by_submission() {
        let mut session = Session::new(1);
        session.set_hint("How is a yearly bonus taxed?");
        assert_eq!(session.pending_hint(), Some("How is a yearly bonus taxed?"));
        session.begin_turn(q("Something else entirely"));
        assert!(session.pending_hint().is_none());
    }

    #[test]
    fn test_history_skips_unavailable_answers() {
        let mut session = Session::new(1);
        let seq = session.begin_turn(q("Q1"));
        let answers = BTreeMap::from([
            (ParticipantId::A, Answer::delivered("a1")),
            (ParticipantId::B, Answer::unavailable("timeout")),
        ]);
        session.record_answers(seq, answers).unwrap();

        let history_a = session.history_for(ParticipantId::A);
        assert_eq!(history_a, vec![Message::user("Q1"), Message::assistant("a1")]);
        assert!(session.history_for(ParticipantId::B).is_empty());
    }
}
