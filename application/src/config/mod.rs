//! Application-level configuration.
//!
//! - [`TurnParams`]: deadlines and context policy used by the turn orchestrator

pub mod turn_params;

pub use turn_params::TurnParams;
