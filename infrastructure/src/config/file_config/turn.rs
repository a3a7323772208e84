//! Turn configuration from TOML (`[turn]` section)

use duel_application::TurnParams;
use duel_domain::ContextPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw turn configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTurnConfig {
    pub responder_timeout_secs: u64,
    pub scorer_timeout_secs: u64,
    /// Interval between assistant run status checks
    pub poll_interval_ms: u64,
    pub context_policy: ContextPolicy,
}

impl Default for FileTurnConfig {
    fn default() -> Self {
        Self {
            responder_timeout_secs: 120,
            scorer_timeout_secs: 60,
            poll_interval_ms: 500,
            context_policy: ContextPolicy::Threaded,
        }
    }
}

impl FileTurnConfig {
    pub fn to_turn_params(&self) -> TurnParams {
        TurnParams::default()
            .with_responder_timeout(Duration::from_secs(self.responder_timeout_secs))
            .with_scorer_timeout(Duration::from_secs(self.scorer_timeout_secs))
            .with_context_policy(self.context_policy)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
