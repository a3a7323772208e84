//! Secret resolution
//!
//! Each secret is looked up in the `[secrets]` config table first, then in
//! the process environment. The first one missing aborts startup.

use super::error::ConfigError;
use super::file_config::FileConfig;
use duel_domain::ParticipantId;
use std::collections::BTreeMap;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Environment name of a participant's assistant id
pub fn assistant_key(id: ParticipantId) -> &'static str {
    match id {
        ParticipantId::A => "ASSISTANT_A_ID",
        ParticipantId::B => "ASSISTANT_B_ID",
    }
}

/// Resolved credentials
#[derive(Clone)]
pub struct Secrets {
    openai_api_key: String,
    assistant_ids: BTreeMap<ParticipantId, String>,
}

impl Secrets {
    /// Resolve against the config and the process environment
    pub fn resolve(config: &FileConfig) -> Result<Self, ConfigError> {
        Self::resolve_with(config, |key| std::env::var(key).ok())
    }

    /// Resolve with a custom environment lookup
    pub fn resolve_with(
        config: &FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let present = |v: &String| !v.trim().is_empty();
        let lookup = |key: &'static str, inline: &Option<String>| {
            inline
                .clone()
                .filter(present)
                .or_else(|| env(key).filter(present))
                .ok_or(ConfigError::MissingSecret(key))
        };

        let openai_api_key = lookup(OPENAI_API_KEY, &config.secrets.openai_api_key)?;

        let mut assistant_ids = BTreeMap::new();
        for id in ParticipantId::ALL {
            if !config.uses_assistant(id) {
                continue;
            }
            let inline = match id {
                ParticipantId::A => &config.secrets.assistant_a_id,
                ParticipantId::B => &config.secrets.assistant_b_id,
            };
            assistant_ids.insert(id, lookup(assistant_key(id), inline)?);
        }

        Ok(Self {
            openai_api_key,
            assistant_ids,
        })
    }

    pub fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }

    pub fn assistant_id(&self, id: ParticipantId) -> Result<&str, ConfigError> {
        self.assistant_ids
            .get(&id)
            .map(String::as_str)
            .ok_or(ConfigError::MissingSecret(assistant_key(id)))
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("openai_api_key", &"<redacted>")
            .field("assistant_ids", &self.assistant_ids)
            .finish()
    }
}
