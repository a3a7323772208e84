//! Turn parameters: orchestration deadlines and context policy.

use duel_domain::ContextPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Static parameters controlling one turn.
///
/// Every remote call is bounded: a responder or judge that does not finish
/// before its deadline is treated as failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnParams {
    /// Deadline for each participant's answer
    pub responder_timeout: Duration,
    /// Deadline for the judge
    pub scorer_timeout: Duration,
    /// Whether participant conversations persist across turns
    pub context_policy: ContextPolicy,
}

impl Default for TurnParams {
    fn default() -> Self {
        Self {
            responder_timeout: Duration::from_secs(120),
            scorer_timeout: Duration::from_secs(60),
            context_policy: ContextPolicy::Threaded,
        }
    }
}

impl TurnParams {
    pub fn with_responder_timeout(mut self, timeout: Duration) -> Self {
        self.responder_timeout = timeout;
        self
    }

    pub fn with_scorer_timeout(mut self, timeout: Duration) -> Self {
        self.scorer_timeout = timeout;
        self
    }

    pub fn with_context_policy(mut self, policy: ContextPolicy) -> Self {
        self.context_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = TurnParams::default();
        assert_eq!(params.responder_timeout, Duration::from_secs(120));
        assert_eq!(params.scorer_timeout, Duration::from_secs(60));
        assert_eq!(params.context_policy, ContextPolicy::Threaded);
    }

    #[test]
    fn test_builder() {
        let params = TurnParams::default()
            .with_responder_timeout(Duration::from_secs(5))
            .with_context_policy(ContextPolicy::Stateless);
        assert_eq!(params.responder_timeout, Duration::from_secs(5));
        assert_eq!(params.context_policy, ContextPolicy::Stateless);
    }
}
