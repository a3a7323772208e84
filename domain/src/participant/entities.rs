//! Participant entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Stable short identifier of a competing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParticipantId {
    A,
    B,
}

impl ParticipantId {
    /// Every participant id, in display order
    pub const ALL: [ParticipantId; 2] = [ParticipantId::A, ParticipantId::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantId::A => "A",
            ParticipantId::B => "B",
        }
    }

    /// The other side of the duel
    pub fn opponent(&self) -> ParticipantId {
        match self {
            ParticipantId::A => ParticipantId::B,
            ParticipantId::B => ParticipantId::A,
        }
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ParticipantId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(ParticipantId::A),
            "B" | "b" => Ok(ParticipantId::B),
            other => Err(DomainError::UnknownParticipant(other.to_string())),
        }
    }
}

/// Remote answer-generating backend behind a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum ParticipantBackend {
    /// A hosted assistant driven through thread runs
    Assistant { assistant_id: String },
    /// A plain chat-completion model
    Chat { model: String },
}

impl ParticipantBackend {
    /// Remote reference used in logs (assistant id or model name)
    pub fn reference(&self) -> &str {
        match self {
            ParticipantBackend::Assistant { assistant_id } => assistant_id,
            ParticipantBackend::Chat { model } => model,
        }
    }
}

/// A participant in the duel (Entity)
///
/// Immutable at runtime; supplied at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub label: String,
    pub backend: ParticipantBackend,
}

impl Participant {
    pub fn new(id: ParticipantId, backend: ParticipantBackend) -> Self {
        Self {
            id,
            label: format!("Model {}", id),
            backend,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// The pair of participants competing in every turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    a: Participant,
    b: Participant,
}

impl Lineup {
    /// Build a lineup; the ids must be `A` and `B` respectively.
    pub fn new(a: Participant, b: Participant) -> Result<Self, DomainError> {
        if a.id != ParticipantId::A {
            return Err(DomainError::UnknownParticipant(format!(
                "expected participant A, got {}",
                a.id
            )));
        }
        if b.id != ParticipantId::B {
            return Err(DomainError::UnknownParticipant(format!(
                "expected participant B, got {}",
                b.id
            )));
        }
        Ok(Self { a, b })
    }

    pub fn get(&self, id: ParticipantId) -> &Participant {
        match id {
            ParticipantId::A => &self.a,
            ParticipantId::B => &self.b,
        }
    }

    pub fn label(&self, id: ParticipantId) -> &str {
        &self.get(id).label
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        [&self.a, &self.b].into_iter()
    }
}
