//! Turn domain.
//!
//! A [`Turn`] is one question plus the two participant answers and the two
//! judged scores produced for it.
//!
//! ```text
//! Pending ──answers──▶ Answered ──scores──▶ Scored (terminal, immutable)
//! ```

pub mod entities;
pub mod value_objects;

pub use entities::{Turn, TurnState};
pub use value_objects::{Answer, UNAVAILABLE_PREFIX};
