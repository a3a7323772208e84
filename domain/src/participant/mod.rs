//! Participants of the duel.
//!
//! - [`entities::ParticipantId`]: stable short id (`A` / `B`)
//! - [`entities::Participant`]: id, display label and remote backend reference
//! - [`entities::Lineup`]: the fixed pair of participants supplied at startup

pub mod entities;

pub use entities::{Lineup, Participant, ParticipantBackend, ParticipantId};
