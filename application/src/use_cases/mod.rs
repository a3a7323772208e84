//! Application use cases
//!
//! - [`submit_turn`]: one full duel turn: answers, judgement, commit
//! - [`record_vote`]: append a user vote to the vote log

pub mod record_vote;
pub mod submit_turn;
