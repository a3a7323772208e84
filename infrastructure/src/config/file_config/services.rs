//! Remote service, vote log and logging sections
//! (`[judge]`, `[openai]`, `[votes]`, `[logging]`, `[secrets]`)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJudgeConfig {
    pub model: String,
}

impl Default for FileJudgeConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    pub base_url: String,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: crate::openai::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotesConfig {
    /// CSV file receiving user votes
    pub path: String,
}

impl Default for FileVotesConfig {
    fn default() -> Self {
        Self {
            path: "votes.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily-rolling operation logs
    pub dir: Option<String>,
    /// JSONL file receiving duel events
    pub conversation_log: Option<String>,
}

/// Secrets that may be stored in config instead of the environment.
///
/// Keys are accepted in upper case (as in the environment) or lower case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSecretsConfig {
    #[serde(alias = "OPENAI_API_KEY", skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(alias = "ASSISTANT_A_ID", skip_serializing_if = "Option::is_none")]
    pub assistant_a_id: Option<String>,
    #[serde(alias = "ASSISTANT_B_ID", skip_serializing_if = "Option::is_none")]
    pub assistant_b_id: Option<String>,
}
