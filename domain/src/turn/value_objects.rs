//! Turn value objects

use serde::{Deserialize, Serialize};

/// Prefix marking a diagnostic placeholder in place of a model answer
pub const UNAVAILABLE_PREFIX: &str = "⚠️ answer unavailable";

/// A participant's answer for one turn (Value Object)
///
/// A failed responder never aborts the turn: its answer becomes
/// [`Answer::Unavailable`] and the diagnostic text is what the judge and the
/// user see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Answer {
    /// Genuine model output
    Delivered { text: String },
    /// Placeholder for a failed responder call
    Unavailable { reason: String },
}

impl Answer {
    pub fn delivered(text: impl Into<String>) -> Self {
        Answer::Delivered { text: text.into() }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Answer::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Answer::Delivered { .. })
    }

    /// Text to display or to hand to the judge
    pub fn text(&self) -> String {
        match self {
            Answer::Delivered { text } => text.clone(),
            Answer::Unavailable { reason } => format!("{}: {}", UNAVAILABLE_PREFIX, reason),
        }
    }
}
