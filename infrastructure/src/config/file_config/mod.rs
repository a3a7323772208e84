//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod participants;
mod repl;
mod services;
mod turn;

pub use output::FileOutputConfig;
pub use participants::{FileBackendKind, FileParticipantConfig, FileParticipantsConfig};
pub use repl::FileReplConfig;
pub use services::{
    FileJudgeConfig, FileLoggingConfig, FileOpenAiConfig, FileSecretsConfig, FileVotesConfig,
};
pub use turn::FileTurnConfig;

use super::error::ConfigError;
use super::secrets::Secrets;
use duel_domain::{Lineup, Participant, ParticipantBackend, ParticipantId};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub judge: FileJudgeConfig,
    pub participants: FileParticipantsConfig,
    pub turn: FileTurnConfig,
    pub openai: FileOpenAiConfig,
    pub votes: FileVotesConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
    pub logging: FileLoggingConfig,
    /// Optional inline secrets; the environment is consulted for any left unset
    pub secrets: FileSecretsConfig,
}

impl FileConfig {
    fn participant(&self, id: ParticipantId) -> &FileParticipantConfig {
        match id {
            ParticipantId::A => &self.participants.a,
            ParticipantId::B => &self.participants.b,
        }
    }

    /// Whether participant `id` needs an assistant id secret
    pub fn uses_assistant(&self, id: ParticipantId) -> bool {
        self.participant(id).backend == FileBackendKind::Assistant
    }

    /// Build the participant lineup from config and resolved secrets
    pub fn lineup(&self, secrets: &Secrets) -> Result<Lineup, ConfigError> {
        let build = |id: ParticipantId| -> Result<Participant, ConfigError> {
            let raw = self.participant(id);
            let backend = match raw.backend {
                FileBackendKind::Assistant => ParticipantBackend::Assistant {
                    assistant_id: secrets.assistant_id(id)?.to_string(),
                },
                FileBackendKind::Chat => ParticipantBackend::Chat {
                    model: raw
                        .model
                        .clone()
                        .filter(|m| !m.trim().is_empty())
                        .ok_or(ConfigError::MissingModel(id))?,
                },
            };
            let participant = Participant::new(id, backend);
            Ok(match &raw.label {
                Some(label) => participant.with_label(label.clone()),
                None => participant,
            })
        };

        Ok(Lineup::new(
            build(ParticipantId::A)?,
            build(ParticipantId::B)?,
        )?)
    }
}
