//! Infrastructure layer for tax-duel
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;
pub mod votes;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig, Secrets};
pub use logging::JsonlConversationLogger;
pub use openai::{JudgeScorer, OpenAiClient, OpenAiError, OpenAiResponder, PollSettings};
pub use votes::CsvVoteLog;
