//! Progress reporting for duel turns

use colored::Colorize;
use duel_application::ports::progress::TurnProgressNotifier;
use duel_domain::{Lineup, ParticipantId, ScoreCard};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with an indicatif bar for the answers and a spinner
/// for the judge
pub struct ProgressReporter {
    lineup: Lineup,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new(lineup: Lineup) -> Self {
        Self {
            lineup,
            bar: Mutex::new(None),
        }
    }

    fn answers_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:20.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn replace(&self, next: Option<ProgressBar>) -> Option<ProgressBar> {
        let mut slot = self.bar.lock().unwrap_or_else(|p| p.into_inner());
        std::mem::replace(&mut *slot, next)
    }
}

impl TurnProgressNotifier for ProgressReporter {
    fn on_turn_start(&self, _sequence_index: u64, _question: &str) {
        let pb = ProgressBar::new(ParticipantId::ALL.len() as u64);
        pb.set_style(Self::answers_style());
        pb.set_prefix("Answers");
        pb.set_message("waiting for both models...");
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Some(old) = self.replace(Some(pb)) {
            old.finish_and_clear();
        }
    }

    fn on_answer_complete(&self, participant: ParticipantId, success: bool) {
        let slot = self.bar.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(pb) = slot.as_ref() {
            let label = self.lineup.label(participant);
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_scoring_start(&self) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix("Judge");
        spinner.set_message("grading answers...");
        spinner.enable_steady_tick(Duration::from_millis(120));
        if let Some(answers) = self.replace(Some(spinner)) {
            answers.finish_with_message(format!("{}", "answers in".green()));
        }
    }

    fn on_scoring_complete(&self, _card: &ScoreCard, fallback: bool) {
        if let Some(pb) = self.replace(None) {
            if fallback {
                pb.finish_with_message(format!("{}", "judge failed, scored 0".yellow()));
            } else {
                pb.finish_and_clear();
            }
        }
    }
}
