//! OpenAI adapters
//!
//! [`OpenAiClient`] wraps the HTTP API; [`OpenAiResponder`] and
//! [`JudgeScorer`] implement the application ports on top of it.

pub mod client;
pub mod error;
pub mod responder;
pub mod scorer;
pub mod types;

pub use client::{DEFAULT_BASE_URL, OpenAiClient};
pub use error::OpenAiError;
pub use responder::{OpenAiResponder, PollSettings};
pub use scorer::{DEFAULT_JUDGE_MODEL, JudgeScorer};
