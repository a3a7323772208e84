//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a completed turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Both answers, the scores and the leaderboard
    Full,
    /// Only the scores and the leaderboard
    Scores,
    /// JSON output
    Json,
}

impl From<OutputFormat> for duel_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => duel_domain::OutputFormat::Full,
            OutputFormat::Scores => duel_domain::OutputFormat::Scores,
            OutputFormat::Json => duel_domain::OutputFormat::Json,
        }
    }
}

/// Context policy override
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContextPolicyArg {
    /// Keep one remote conversation per model until /new
    Threaded,
    /// Start a fresh remote conversation for every question
    Stateless,
}

impl From<ContextPolicyArg> for duel_domain::ContextPolicy {
    fn from(arg: ContextPolicyArg) -> Self {
        match arg {
            ContextPolicyArg::Threaded => duel_domain::ContextPolicy::Threaded,
            ContextPolicyArg::Stateless => duel_domain::ContextPolicy::Stateless,
        }
    }
}

/// CLI arguments for tax-duel
#[derive(Parser, Debug)]
#[command(name = "tax-duel")]
#[command(author, version, about = "Tax Duel - Two models answer, a judge grades")]
#[command(long_about = r#"
Tax Duel sends each tax question to two models, shows both answers side by
side and asks a judge model to grade them 0-5. Average grades accumulate in a
leaderboard; thumbs-up/down votes are appended to a CSV file.

Secrets (OPENAI_API_KEY, ASSISTANT_A_ID, ASSISTANT_B_ID) are read from the
[secrets] table of the configuration or from the environment.

Configuration files are loaded from (in priority order):
1. DUEL_* environment variables
2. --config <path>     Explicit config file
3. ./duel.toml         Project-level config
4. ~/.config/tax-duel/config.toml   Global config

Example:
  tax-duel "Do I have to file if my salary is Rs 550,000?"
  tax-duel -o json "How is a yearly bonus taxed?"
  tax-duel --chat
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Output format (one-shot mode)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Override the context policy
    #[arg(long, value_enum, value_name = "POLICY")]
    pub context_policy: Option<ContextPolicyArg>,

    /// Override the judge model
    #[arg(long, value_name = "MODEL")]
    pub judge_model: Option<String>,

    /// CSV file receiving votes
    #[arg(long, value_name = "PATH")]
    pub votes: Option<PathBuf>,

    /// Directory for daily-rolling log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
