//! Vote log persistence
//!
//! Provides [`CsvVoteLog`], an append-only CSV file implementing the
//! [`VoteLog`](duel_application::VoteLog) port.

mod csv_log;

pub use csv_log::{CsvVoteLog, VOTE_LOG_HEADER};
