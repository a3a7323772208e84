//! Console output formatter for duel turns

use colored::Colorize;
use duel_domain::{
    EXAMPLE_QUESTIONS, Leaderboard, Lineup, MeanScore, ParticipantId, Polarity, Turn,
};
use serde_json::json;

/// Formats turns and leaderboards for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Both answers, the scores and the leaderboard
    pub fn format_turn(turn: &Turn, lineup: &Lineup, board: &Leaderboard) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Question {}", turn.sequence_index())));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            turn.question()
        ));

        for id in ParticipantId::ALL {
            let title = format!("── {} ──", lineup.label(id));
            match turn.answer(id) {
                Some(answer) if answer.is_delivered() => {
                    output.push_str(&format!("\n{}\n{}\n", title.yellow().bold(), answer.text()));
                }
                Some(answer) => {
                    output.push_str(&format!("\n{}\n{}\n", title.red().bold(), answer.text()));
                }
                None => {
                    output.push_str(&format!("\n{}\n{}\n", title.dimmed(), "(pending)".dimmed()));
                }
            }
        }

        output.push_str(&Self::section_header("Scores"));
        output.push_str(&Self::score_banner(turn, lineup));
        output.push('\n');
        output.push_str(&Self::format_leaderboard(board, lineup));
        output.push_str(&Self::footer());
        output
    }

    /// Scores and leaderboard only (concise output)
    pub fn format_scores(turn: &Turn, lineup: &Lineup, board: &Leaderboard) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), turn.question()));
        output.push_str(&Self::score_banner(turn, lineup));
        output.push('\n');
        output.push_str(&Self::format_leaderboard(board, lineup));
        output
    }

    /// Turn and leaderboard as pretty JSON
    pub fn format_json(turn: &Turn, board: &Leaderboard) -> String {
        serde_json::to_string_pretty(&json!({
            "turn": turn,
            "leaderboard": board,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// `Auto-scores → Model A 4 | Model B 2`, or the fallback warning
    pub fn score_banner(turn: &Turn, lineup: &Lineup) -> String {
        let scores = ParticipantId::ALL
            .into_iter()
            .map(|id| {
                let score = turn
                    .score(id)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                format!("{} {}", lineup.label(id), score)
            })
            .collect::<Vec<_>>()
            .join(" | ");
        let banner = format!("Auto-scores → {}", scores);

        match turn.scoring_warning() {
            Some(warning) => format!("{}\n{} {}\n", banner.yellow(), "warning:".yellow().bold(), warning),
            None => format!("{}\n", banner.green()),
        }
    }

    /// One `Model A: 4.00 on 1 Qs` line per participant
    pub fn format_leaderboard(board: &Leaderboard, lineup: &Lineup) -> String {
        let mut output = format!("{}\n", "Leaderboard (avg score)".cyan().bold());
        let leader = board.leader();
        for entry in &board.entries {
            let label = lineup.label(entry.participant);
            let line = match entry.mean {
                MeanScore::NoData => format!("{}: {}", label, "no data".dimmed()),
                MeanScore::Mean(_) => format!("{}: {} on {} Qs", label, entry.mean, entry.count),
            };
            if leader == Some(entry.participant) {
                output.push_str(&format!("  {} {}\n", "*".green().bold(), line));
            } else {
                output.push_str(&format!("    {}\n", line));
            }
        }
        output
    }

    /// Numbered sample questions
    pub fn format_examples() -> String {
        let mut output = format!("{}\n", "Need inspiration? Pick a sample with /try N".cyan());
        for (i, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, question));
        }
        output
    }

    /// Advisory hint line; never pre-fills the input
    pub fn format_hint(hint: &str) -> String {
        format!("💡 Try this: {}", hint.bold())
    }

    /// Acknowledgement shown after a vote
    pub fn vote_ack(polarity: Polarity) -> &'static str {
        match polarity {
            Polarity::Up => "Thanks for the 👍!",
            Polarity::Down => "Got it – we'll improve!",
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_domain::{
        Answer, Participant, ParticipantBackend, Question, Score, ScoreCard, Session, summarize,
    };
    use std::collections::BTreeMap;

    fn lineup() -> Lineup {
        let backend = |id: &str| ParticipantBackend::Assistant {
            assistant_id: id.to_string(),
        };
        Lineup::new(
            Participant::new(ParticipantId::A, backend("asst_a")),
            Participant::new(ParticipantId::B, backend("asst_b")),
        )
        .unwrap()
    }

    fn scored_session(warning: Option<&str>) -> Session {
        colored::control::set_override(false);
        let mut session = Session::new(1);
        let seq = session.begin_turn(
            Question::parse("Do I have to file if my salary is Rs 550,000?").unwrap(),
        );
        session
            .record_answers(
                seq,
                BTreeMap::from([
                    (ParticipantId::A, Answer::delivered("T_A")),
                    (ParticipantId::B, Answer::unavailable("Run ended with status 'failed'")),
                ]),
            )
            .unwrap();
        session
            .record_scores(
                seq,
                &ScoreCard::from_pair(Score::new(4).unwrap(), Score::new(2).unwrap()),
                warning.map(str::to_string),
            )
            .unwrap();
        session
    }

    #[test]
    fn test_score_banner() {
        let session = scored_session(None);
        let banner = ConsoleFormatter::score_banner(&session.transcript()[0], &lineup());
        assert_eq!(banner, "Auto-scores → Model A 4 | Model B 2\n");
    }

    #[test]
    fn test_score_banner_with_warning() {
        let session = scored_session(Some("judge reply was not JSON"));
        let banner = ConsoleFormatter::score_banner(&session.transcript()[0], &lineup());
        assert!(banner.contains("warning: judge reply was not JSON"));
    }

    #[test]
    fn test_leaderboard_lines() {
        let session = scored_session(None);
        let text = ConsoleFormatter::format_leaderboard(&summarize(&session), &lineup());
        assert!(text.contains("Model A: 4.00 on 1 Qs"));
        assert!(text.contains("Model B: 2.00 on 1 Qs"));
    }

    #[test]
    fn test_empty_leaderboard_says_no_data() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_leaderboard(&summarize(&Session::new(1)), &lineup());
        assert!(text.contains("Model A: no data"));
    }

    #[test]
    fn test_full_output_shows_placeholder() {
        let session = scored_session(None);
        let text = ConsoleFormatter::format_turn(
            &session.transcript()[0],
            &lineup(),
            &summarize(&session),
        );
        assert!(text.contains("T_A"));
        assert!(text.contains("⚠️ answer unavailable: Run ended with status 'failed'"));
    }

    #[test]
    fn test_json_output() {
        let session = scored_session(None);
        let text = ConsoleFormatter::format_json(&session.transcript()[0], &summarize(&session));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["turn"]["state"], "scored");
        assert!(value["leaderboard"].is_object());
    }

    #[test]
    fn test_examples_are_numbered() {
        let text = ConsoleFormatter::format_examples();
        assert!(text.contains("1. Do I have to file if my salary is Rs 550,000?"));
        assert!(text.contains("4. Penalty for filing return 2 months late?"));
    }

    #[test]
    fn test_vote_acks() {
        assert_eq!(ConsoleFormatter::vote_ack(Polarity::Up), "Thanks for the 👍!");
        assert_eq!(ConsoleFormatter::vote_ack(Polarity::Down), "Got it – we'll improve!");
    }
}
