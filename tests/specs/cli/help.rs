//! CLI help output specs

use crate::prelude::*;

#[test]
fn no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn help_lists_every_command() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("replay")
        .stdout_has("timeline")
        .stdout_has("stages")
        .stdout_has("events")
        .stdout_has("follow");
}

#[test]
fn replay_help_shows_snapshot_flags() {
    cli()
        .args(&["replay", "--help"])
        .passes()
        .stdout_has("--snapshot")
        .stdout_has("--save");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}
