//! Domain layer for tax-duel
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Duel
//!
//! Two participants (`A` and `B`) answer the same question. A judge grades
//! both answers 0-5 and the grades accumulate into a leaderboard.
//!
//! ```text
//! Question ──▶ Turn(Pending) ──answers──▶ Turn(Answered) ──judge──▶ Turn(Scored)
//!                                                                     │
//!                                              Session.scores_by_participant
//!                                                                     │
//!                                                         leaderboard::summarize
//! ```

pub mod config;
pub mod core;
pub mod leaderboard;
pub mod participant;
pub mod prompt;
pub mod scoring;
pub mod session;
pub mod turn;
pub mod vote;

// Re-export commonly used types
pub use config::{ContextPolicy, OutputFormat};
pub use core::{error::DomainError, question::Question};
pub use leaderboard::{Leaderboard, LeaderboardEntry, MeanScore, summarize};
pub use participant::{Lineup, Participant, ParticipantBackend, ParticipantId};
pub use prompt::{EXAMPLE_QUESTIONS, JudgePrompt};
pub use scoring::{Score, ScoreCard, ScoreParseError, parse_score_card};
pub use session::{
    entities::Session,
    message::{Message, Role},
};
pub use turn::{Answer, Turn, TurnState, UNAVAILABLE_PREFIX};
pub use vote::{Polarity, VoteRecord};
