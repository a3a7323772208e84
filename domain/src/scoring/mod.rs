//! Judge scoring domain
//!
//! - [`score::Score`]: an integer grade in `0..=5`
//! - [`score::ScoreCard`]: one grade per participant
//! - [`parsing::parse_score_card`]: the single parse-and-validate step
//!   applied to a judge reply

pub mod parsing;
pub mod score;

pub use parsing::{ScoreParseError, parse_score_card};
pub use score::{Score, ScoreCard};
