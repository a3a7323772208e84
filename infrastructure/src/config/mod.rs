//! Configuration loading for tax-duel
//!
//! This module handles file I/O, merging of configuration from multiple
//! sources and secret resolution. The priority order (highest to lowest):
//!
//! 1. `DUEL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./duel.toml` or `./.duel.toml`
//! 4. Global: `$XDG_CONFIG_HOME/tax-duel/config.toml`
//! 5. Default values

mod error;
mod file_config;
mod loader;
mod secrets;

pub use error::ConfigError;
pub use file_config::{
    FileBackendKind, FileConfig, FileJudgeConfig, FileLoggingConfig, FileOpenAiConfig,
    FileOutputConfig, FileParticipantConfig, FileParticipantsConfig, FileReplConfig,
    FileSecretsConfig, FileTurnConfig, FileVotesConfig,
};
pub use loader::ConfigLoader;
pub use secrets::{OPENAI_API_KEY, Secrets, assistant_key};
