//! Responder context policy

use serde::{Deserialize, Serialize};

/// Whether a participant's conversation persists across turns
///
/// | Policy | Remote conversation |
/// |--------|---------------------|
/// | `Threaded` | one per participant, kept until the session is reset |
/// | `Stateless` | a fresh one for every question |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextPolicy {
    Threaded,
    Stateless,
}

impl ContextPolicy {
    pub fn as_str(&self) -> &str {
        match self {
            ContextPolicy::Threaded => "threaded",
            ContextPolicy::Stateless => "stateless",
        }
    }
}

impl Default for ContextPolicy {
    fn default() -> Self {
        Self::Threaded
    }
}

impl std::fmt::Display for ContextPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContextPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "threaded" | "thread" => Ok(ContextPolicy::Threaded),
            "stateless" | "fresh" => Ok(ContextPolicy::Stateless),
            other => Err(format!(
                "unknown context policy '{}' (expected 'threaded' or 'stateless')",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_threaded() {
        assert_eq!(ContextPolicy::default(), ContextPolicy::Threaded);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Stateless".parse::<ContextPolicy>(), Ok(ContextPolicy::Stateless));
        assert!("sometimes".parse::<ContextPolicy>().is_err());
    }
}
