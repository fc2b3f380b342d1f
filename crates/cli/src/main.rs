// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hydra - pipeline dashboard state from a recorded event feed

mod color;
mod commands;
mod config;
mod env;
mod output;
mod poll;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{events, follow, replay, stages, timeline};
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hydra",
    version,
    about = "Hydra - replay and inspect an issue pipeline event feed"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    /// Config file (default: ./hydra.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce a journal and print the session summary
    Replay(replay::ReplayArgs),
    /// Show per-issue lifecycle timelines
    Timeline(timeline::TimelineArgs),
    /// Show per-stage counts and the workload summary
    Stages(stages::StagesArgs),
    /// List the event log, newest first
    Events(events::EventsArgs),
    /// Tail a growing journal and apply new lines as they land
    Follow(follow::FollowArgs),
}

#[tokio::main]
async fn main() {
    let _guard = setup_logging();
    if let Err(e) = run().await {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(1);
    }
}

/// Install the tracing subscriber.
///
/// Logs go to stderr, or to `HYDRA_LOG_FILE` through a non-blocking writer
/// whose guard must live until exit.
fn setup_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("warn"));

    let file = env::log_file().and_then(|path| {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name = path.file_name()?.to_owned();
        std::fs::create_dir_all(&dir).ok()?;
        Some(tracing_appender::rolling::never(dir, name))
    });

    match file {
        Some(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
            None
        }
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, the
/// "Caused by" chain is skipped; otherwise the full chain is rendered.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = config::Config::load(cli.config.as_deref())?;

    match command {
        Commands::Replay(args) => replay::handle(args, &config, format)?,
        Commands::Timeline(args) => timeline::handle(args, &config, format)?,
        Commands::Stages(args) => stages::handle(args, &config, format)?,
        Commands::Events(args) => events::handle(args, &config, format)?,
        Commands::Follow(args) => follow::handle(args, &config, format).await?,
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
