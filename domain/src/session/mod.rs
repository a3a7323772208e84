//! Duel session domain.
//!
//! - [`entities::Session`]: the per-user aggregate of transcript and score history
//! - [`message::Message`]: a chat message, used to replay a participant's history

pub mod entities;
pub mod message;
