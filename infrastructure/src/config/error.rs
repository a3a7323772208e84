//! Configuration errors. All of them are fatal at startup.

use duel_domain::{DomainError, ParticipantId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing secret: {0}")]
    MissingSecret(&'static str),

    #[error("participants.{}: the chat backend needs a `model`", .0.as_str().to_lowercase())]
    MissingModel(ParticipantId),

    #[error("Invalid configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
