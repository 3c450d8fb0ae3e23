//! Parley - NLP-powered FAQ chatbot
//!
//! Main entry point for the Parley CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

mod commands;

use commands::{analyze, ask, chat, kb};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Parley - NLP-powered FAQ chatbot
#[derive(Parser)]
#[command(name = "parley")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the linguistic model artifacts
    #[arg(long, global = true, env = "PARLEY_MODELS_DIR")]
    pub models: Option<PathBuf>,

    /// Knowledge file replacing the built-in question set
    #[arg(long, global = true, env = "PARLEY_KNOWLEDGE")]
    pub knowledge: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enter interactive chat mode (REPL)
    Chat(chat::ChatArgs),

    /// Ask a one-shot question
    Ask(ask::AskArgs),

    /// Show how the pipeline reads a piece of text
    Analyze(analyze::AnalyzeArgs),

    /// Inspect the knowledge base
    Kb(kb::KbArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console (human-readable, stderr) + rotating JSON file
    let filter = if cli.verbose {
        "parley=debug,parley_engine=debug,parley_nlp=debug,parley_config=debug,info"
    } else {
        "warn"
    };
    let console_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    let log_dir = parley_config::xdg_config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("parley")
        .filename_suffix("log")
        .build(&log_dir)
        .ok();
    let (file_writer, _guard) = match file_appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "parley=trace,parley_engine=trace,parley_nlp=trace,parley_config=trace,info",
                ))
        }))
        .init();

    let loaded = parley_config::load_config(None)?;
    for warning in &loaded.warnings {
        warn!("{}", warning);
    }

    let ctx = commands::Context::new(
        loaded.config,
        cli.models,
        cli.knowledge,
        cli.json,
        cli.verbose,
    );

    // Dispatch to command handlers
    match cli.command {
        Commands::Chat(args) => chat::run(args, &ctx),
        Commands::Ask(args) => ask::run(args, &ctx),
        Commands::Analyze(args) => analyze::run(args, &ctx),
        Commands::Kb(args) => kb::run(args, &ctx),
    }
}
