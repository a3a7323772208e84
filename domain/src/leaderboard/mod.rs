//! Leaderboard aggregation.
//!
//! [`summarize`] is a pure read-side view over a [`Session`]'s score lists:
//! calling it twice on the same state yields identical output.

use crate::participant::ParticipantId;
use crate::session::entities::Session;
use serde::{Deserialize, Serialize};

/// Mean score of a participant, or an explicit "no data" marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MeanScore {
    NoData,
    Mean(f64),
}

impl MeanScore {
    pub fn value(&self) -> Option<f64> {
        match self {
            MeanScore::NoData => None,
            MeanScore::Mean(v) => Some(*v),
        }
    }
}

impl std::fmt::Display for MeanScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeanScore::NoData => write!(f, "no data"),
            MeanScore::Mean(v) => write!(f, "{:.2}", v),
        }
    }
}

/// Summary line for one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub participant: ParticipantId,
    pub count: usize,
    pub mean: MeanScore,
}

/// Per-participant mean and sample count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn entry(&self, id: ParticipantId) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.participant == id)
    }

    /// Participant with the strictly highest mean, if any
    pub fn leader(&self) -> Option<ParticipantId> {
        let mut ranked: Vec<(ParticipantId, f64)> = self
            .entries
            .iter()
            .filter_map(|e| e.mean.value().map(|m| (e.participant, m)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        match ranked.as_slice() {
            [(id, _)] => Some(*id),
            [(id, first), (_, second), ..] if first > second => Some(*id),
            _ => None,
        }
    }
}

/// Summarize a session's score lists
pub fn summarize(session: &Session) -> Leaderboard {
    let entries = ParticipantId::ALL
        .into_iter()
        .map(|participant| {
            let scores = session.scores(participant);
            let count = scores.len();
            let mean = if count == 0 {
                MeanScore::NoData
            } else {
                let sum: u64 = scores.iter().map(|s| u64::from(s.value())).sum();
                MeanScore::Mean(sum as f64 / count as f64)
            };
            LeaderboardEntry {
                participant,
                count,
                mean,
            }
        })
        .collect();

    Leaderboard { entries }
}
