//! Vote log port
//!
//! Append-only persistence for user votes.

use duel_domain::VoteRecord;
use thiserror::Error;

/// Errors from the vote log
#[derive(Error, Debug)]
pub enum VoteLogError {
    #[error("Vote log I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Append-only store of vote records
pub trait VoteLog: Send + Sync {
    /// Append one record. Never rewrites earlier records.
    fn append(&self, record: &VoteRecord) -> Result<(), VoteLogError>;
}
