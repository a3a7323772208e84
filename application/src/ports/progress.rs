//! Progress notification port
//!
//! Defines the interface for reporting progress while a turn runs.

use duel_domain::{ParticipantId, ScoreCard};

/// Callback for progress updates during a turn
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinner, plain text, ...).
pub trait TurnProgressNotifier: Send + Sync {
    /// Called once the question is in the transcript
    fn on_turn_start(&self, sequence_index: u64, question: &str);

    /// Called when a participant's answer settles
    fn on_answer_complete(&self, participant: ParticipantId, success: bool);

    /// Called before the judge is asked
    fn on_scoring_start(&self) {}

    /// Called with the recorded scores; `fallback` is true when zeros were
    /// substituted for an unusable judge reply
    fn on_scoring_complete(&self, card: &ScoreCard, fallback: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl TurnProgressNotifier for NoProgress {
    fn on_turn_start(&self, _sequence_index: u64, _question: &str) {}
    fn on_answer_complete(&self, _participant: ParticipantId, _success: bool) {}
    fn on_scoring_complete(&self, _card: &ScoreCard, _fallback: bool) {}
}
