//! CLI entrypoint for Tax Duel
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use duel_application::{
    ConversationLogger, NoConversationLogger, RecordVoteUseCase, SessionStore, SubmitTurnUseCase,
};
use duel_domain::{OutputFormat, summarize};
use duel_infrastructure::{
    ConfigLoader, CsvVoteLog, FileConfig, JsonlConversationLogger, JudgeScorer, OpenAiClient,
    OpenAiResponder, PollSettings, Secrets,
};
use duel_presentation::{Cli, ConsoleFormatter, DuelRepl, ProgressReporter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    apply_overrides(&cli, &mut config);

    let _log_guard = init_logging(cli.verbose, config.logging.dir.as_deref())?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting Tax Duel");

    // Fails fast, naming the first missing key
    let secrets = Secrets::resolve(&config)?;
    let lineup = config.lineup(&secrets)?;
    let params = config.turn.to_turn_params();

    // === Dependency Injection ===
    let client = Arc::new(
        OpenAiClient::new(secrets.openai_api_key()).with_base_url(config.openai.base_url.clone()),
    );
    let responder = Arc::new(OpenAiResponder::new(Arc::clone(&client)).with_poll_settings(
        PollSettings {
            interval: config.turn.poll_interval(),
            deadline: params.responder_timeout,
        },
    ));
    let scorer = Arc::new(JudgeScorer::new(client).with_model(config.judge.model.clone()));

    let conversation_logger: Arc<dyn ConversationLogger> = config
        .logging
        .conversation_log
        .as_ref()
        .and_then(JsonlConversationLogger::new)
        .map(|logger| Arc::new(logger) as Arc<dyn ConversationLogger>)
        .unwrap_or_else(|| Arc::new(NoConversationLogger));

    let submit = SubmitTurnUseCase::new(responder, scorer, lineup.clone())
        .with_params(params)
        .with_conversation_logger(Arc::clone(&conversation_logger));
    let store = Arc::new(SessionStore::new());

    // Chat mode
    if cli.chat {
        let votes = RecordVoteUseCase::new(Arc::new(CsvVoteLog::new(&config.votes.path)))
            .with_conversation_logger(Arc::clone(&conversation_logger));
        let repl = DuelRepl::new(submit, votes, store)
            .with_progress(!cli.quiet && config.repl.show_progress)
            .with_history_file(config.repl.history_file.as_ref().map(PathBuf::from))
            .with_conversation_logger(conversation_logger);

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let format = config.output.format.unwrap_or_default();
    let turn = if cli.quiet || format == OutputFormat::Json {
        submit.submit(&store, &question).await?
    } else {
        let progress = ProgressReporter::new(lineup.clone());
        submit
            .submit_with_progress(&store, &question, &progress)
            .await?
    };

    let board = summarize(&store.get_or_create());
    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format_turn(&turn, &lineup, &board),
        OutputFormat::Scores => ConsoleFormatter::format_scores(&turn, &lineup, &board),
        OutputFormat::Json => ConsoleFormatter::format_json(&turn, &board),
    };

    println!("{}", output);

    Ok(())
}

/// Command-line flags win over every configuration source
fn apply_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if let Some(policy) = cli.context_policy {
        config.turn.context_policy = policy.into();
    }
    if let Some(model) = &cli.judge_model {
        config.judge.model = model.clone();
    }
    if let Some(path) = &cli.votes {
        config.votes.path = path.display().to_string();
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = Some(dir.display().to_string());
    }
}

/// Install the tracing subscriber.
///
/// Verbosity comes from `-v` unless `RUST_LOG` is set. With a log directory,
/// events are also written to a daily-rolling file; the returned guard must
/// live until exit so buffered lines are flushed.
fn init_logging(verbose: u8, log_dir: Option<&str>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create log directory {}", dir))?;
            let appender = tracing_appender::rolling::daily(dir, "tax-duel.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
