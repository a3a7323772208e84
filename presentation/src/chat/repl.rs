//! REPL (Read-Eval-Print Loop) for interactive duels

use super::command::ReplCommand;
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use duel_application::{
    ConversationEvent, ConversationLogger, NoConversationLogger, RecordVoteUseCase, Responder,
    Scorer, SessionStore, SubmitTurnError, SubmitTurnUseCase, VoteLog,
};
use duel_domain::EXAMPLE_QUESTIONS;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// Interactive duel REPL
///
/// Input is blocked while a turn runs, so a session never has two turns in
/// flight.
pub struct DuelRepl<R: Responder + 'static, S: Scorer + 'static, L: VoteLog> {
    submit: SubmitTurnUseCase<R, S>,
    votes: RecordVoteUseCase<L>,
    store: Arc<SessionStore>,
    conversation_logger: Arc<dyn ConversationLogger>,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl<R: Responder + 'static, S: Scorer + 'static, L: VoteLog> DuelRepl<R, S, L> {
    pub fn new(
        submit: SubmitTurnUseCase<R, S>,
        votes: RecordVoteUseCase<L>,
        store: Arc<SessionStore>,
    ) -> Self {
        Self {
            submit,
            votes,
            store,
            conversation_logger: Arc::new(NoConversationLogger),
            show_progress: true,
            history_file: dirs::data_dir().map(|p| p.join("tax-duel").join("history.txt")),
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Override the readline history location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_file = path;
        }
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            if let Some(hint) = self.pending_hint() {
                println!("{}", ConsoleFormatter::format_hint(&hint));
            }

            let readline = rl.readline("tax> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn pending_hint(&self) -> Option<String> {
        self.store
            .with_session(|s| s.pending_hint().map(str::to_string))
    }

    fn print_welcome(&self) {
        let lineup = self.submit.lineup();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            Tax Duel - Chat Mode             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        for participant in lineup.iter() {
            println!(
                "{} {} ({})",
                format!("{}:", participant.id).cyan().bold(),
                participant.label,
                participant.backend.reference()
            );
        }
        println!();
        println!("{}", ReplCommand::help());
        println!();
        print!("{}", ConsoleFormatter::format_examples());
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, line: &str) -> bool {
        let command = match ReplCommand::parse(line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                return false;
            }
        };

        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                println!("{}", ReplCommand::help());
                println!();
            }
            ReplCommand::New => {
                let generation = self.store.get_or_create().generation();
                self.store.reset();
                self.conversation_logger.log(ConversationEvent::new(
                    "session_reset",
                    json!({ "generation": generation }),
                ));
                println!("{}", "Started a new chat.".green());
            }
            ReplCommand::Leaderboard => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_leaderboard(
                        &self.store.leaderboard(),
                        self.submit.lineup()
                    )
                );
                println!();
            }
            ReplCommand::Examples => {
                print!("{}", ConsoleFormatter::format_examples());
            }
            ReplCommand::Try(index) => {
                if self.store.with_session(|s| s.is_empty()) {
                    self.store.set_hint(EXAMPLE_QUESTIONS[index]);
                } else {
                    println!("Samples are offered before the first question; /new starts over.");
                }
            }
            ReplCommand::Vote(participant, polarity) => {
                match self.votes.vote_on_latest(&self.store, participant, polarity) {
                    Ok(_) => println!("{}", ConsoleFormatter::vote_ack(polarity)),
                    Err(e) => eprintln!("{} {}", "Vote not recorded:".red(), e),
                }
            }
        }
        false
    }

    async fn process_question(&self, question: &str) {
        println!();

        let result = if self.show_progress {
            let progress = ProgressReporter::new(self.submit.lineup().clone());
            self.submit
                .submit_with_progress(&self.store, question, &progress)
                .await
        } else {
            self.submit.submit(&self.store, question).await
        };

        match result {
            Ok(turn) => {
                let board = self.store.leaderboard();
                print!(
                    "{}",
                    ConsoleFormatter::format_turn(&turn, self.submit.lineup(), &board)
                );
                println!("{}", "Vote with /up A, /down B ...".dimmed());
            }
            Err(SubmitTurnError::Discarded { .. }) => {
                println!("{}", "The chat was reset; that answer was discarded.".yellow());
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}
