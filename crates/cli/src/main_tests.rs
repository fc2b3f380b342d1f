// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::error::ErrorKind;
use clap::Parser;

use super::{format_error, Cli, Commands, OutputFormat};

#[test]
fn version_long() {
    let err = Cli::try_parse_from(["hydra", "--version"])
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
}

#[test]
fn no_subcommand_parses() {
    let cli = Cli::try_parse_from(["hydra"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.output, OutputFormat::Text);
}

#[test]
fn output_flag_is_global() {
    let cli = Cli::try_parse_from(["hydra", "stages", "feed.jsonl", "-o", "json"]).unwrap();
    assert_eq!(cli.output, OutputFormat::Json);
    assert!(matches!(cli.command, Some(Commands::Stages(_))));
}

#[test]
fn config_flag_is_global() {
    let cli =
        Cli::try_parse_from(["hydra", "events", "feed.jsonl", "--config", "x.toml"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("x.toml")));
}

#[test]
fn journal_argument_is_required() {
    let err = Cli::try_parse_from(["hydra", "timeline"]).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn format_error_skips_redundant_chain() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err = anyhow::Error::new(io).context("failed to open feed.jsonl: no such file");
    assert_eq!(format_error(&err), "failed to open feed.jsonl: no such file");
}

#[test]
fn format_error_renders_distinct_causes() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err = anyhow::Error::new(io).context("failed to open feed.jsonl");
    assert_eq!(
        format_error(&err),
        "failed to open feed.jsonl\n\nCaused by:\n    0: no such file"
    );
}

#[test]
fn follow_timeout_accepts_units() {
    let cli =
        Cli::try_parse_from(["hydra", "follow", "feed.jsonl", "--timeout", "1500ms"]).unwrap();
    let Some(Commands::Follow(args)) = cli.command else {
        panic!("expected follow");
    };
    assert_eq!(args.timeout, Some(std::time::Duration::from_millis(1500)));
}

#[test]
fn follow_timeout_rejects_garbage() {
    let err = Cli::try_parse_from(["hydra", "follow", "feed.jsonl", "--timeout", "soon"])
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}
