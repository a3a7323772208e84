//! Participant configuration from TOML (`[participants.a]`, `[participants.b]`)

use serde::{Deserialize, Serialize};

/// Which remote API backs a participant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileBackendKind {
    /// Hosted assistant; its id comes from the `ASSISTANT_<ID>_ID` secret
    #[default]
    Assistant,
    /// Plain chat-completion model named by `model`
    Chat,
}

/// Raw configuration of one participant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParticipantConfig {
    /// Display label (defaults to "Model A" / "Model B")
    pub label: Option<String>,
    pub backend: FileBackendKind,
    /// Chat model name; required for the chat backend
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParticipantsConfig {
    pub a: FileParticipantConfig,
    pub b: FileParticipantConfig,
}
