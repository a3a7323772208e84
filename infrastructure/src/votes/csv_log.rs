//! Append-only CSV vote log.
//!
//! The file is created on first write together with its header row. Every
//! later write appends one row and flushes.

use duel_application::ports::vote_log::{VoteLog, VoteLogError};
use duel_domain::VoteRecord;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Header row written once when the file is created
pub const VOTE_LOG_HEADER: &str = "time,model,score,question,answer";

/// CSV vote log.
///
/// Writes are serialized by an internal lock so rows never interleave.
pub struct CsvVoteLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvVoteLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VoteLog for CsvVoteLog {
    fn append(&self, record: &VoteRecord) -> Result<(), VoteLogError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut out = String::new();
        if file.metadata()?.len() == 0 {
            out.push_str(VOTE_LOG_HEADER);
            out.push('\n');
        }
        out.push_str(&format_row(record));
        out.push('\n');

        file.write_all(out.as_bytes())?;
        file.flush()?;
        debug!(path = %self.path.display(), "Vote appended");
        Ok(())
    }
}

fn format_row(record: &VoteRecord) -> String {
    let timestamp = record
        .timestamp
        .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    [
        timestamp,
        record.participant.to_string(),
        record.polarity.value().to_string(),
        quote_field(&record.question),
        quote_field(&record.answer),
    ]
    .join(",")
}

/// Quote a field when it contains a separator, quote or line break
fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
