//! Slash command parsing for the chat REPL

use duel_domain::{EXAMPLE_QUESTIONS, ParticipantId, Polarity};

/// A parsed `/` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    /// Reset the session
    New,
    Leaderboard,
    Examples,
    /// Set the hint to the sample with this zero-based index
    Try(usize),
    Vote(ParticipantId, Polarity),
    Quit,
}

impl ReplCommand {
    /// Parse a line starting with `/`. The error is a message for the user.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match name {
            "/quit" | "/exit" | "/q" => Ok(ReplCommand::Quit),
            "/help" | "/h" | "/?" => Ok(ReplCommand::Help),
            "/new" | "/reset" => Ok(ReplCommand::New),
            "/leaderboard" | "/lb" => Ok(ReplCommand::Leaderboard),
            "/examples" | "/ex" => Ok(ReplCommand::Examples),
            "/try" => {
                let n: usize = arg
                    .and_then(|a| a.parse().ok())
                    .filter(|n| (1..=EXAMPLE_QUESTIONS.len()).contains(n))
                    .ok_or_else(|| format!("Usage: /try <1-{}>", EXAMPLE_QUESTIONS.len()))?;
                Ok(ReplCommand::Try(n - 1))
            }
            "/up" | "/down" => {
                let polarity = if name == "/up" {
                    Polarity::Up
                } else {
                    Polarity::Down
                };
                let participant: ParticipantId = arg
                    .ok_or_else(|| format!("Usage: {} <A|B>", name))?
                    .parse()
                    .map_err(|_| format!("Usage: {} <A|B>", name))?;
                Ok(ReplCommand::Vote(participant, polarity))
            }
            other => Err(format!(
                "Unknown command: {}\nType /help for available commands",
                other
            )),
        }
    }

    pub fn help() -> &'static str {
        "Commands:
  /help, /h, /?       - Show this help
  /new                - Start a new chat (clears answers and leaderboard)
  /leaderboard, /lb   - Show average scores
  /examples           - List sample questions
  /try <N>            - Suggest sample question N (before the first question)
  /up <A|B>           - Thumbs-up the latest answer of a model
  /down <A|B>         - Thumbs-down the latest answer of a model
  /quit, /exit, /q    - Exit chat"
    }
}
