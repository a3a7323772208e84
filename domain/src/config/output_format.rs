//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for a completed turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Both answers followed by the scores (default)
    Full,
    /// Only the scores and the leaderboard
    Scores,
    /// JSON output
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Full
    }
}
