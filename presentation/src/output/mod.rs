//! Output formatting for turns and the leaderboard

pub mod console;
