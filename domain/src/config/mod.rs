//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod context_policy;
mod output_format;

pub use context_policy::ContextPolicy;
pub use output_format::OutputFormat;
