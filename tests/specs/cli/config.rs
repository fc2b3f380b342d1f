//! hydra.toml and environment overrides

use crate::prelude::*;

#[test]
fn config_in_working_directory_bounds_the_log() {
    let ws = Workspace::with_feed();
    ws.file("hydra.toml", "max_events = 2\n");
    ws.hydra()
        .args(&["replay", "feed.jsonl"])
        .passes()
        .stdout_has("Events:       2 / 2\n");
}

#[test]
fn env_override_beats_config_file() {
    let ws = Workspace::with_feed();
    ws.file("hydra.toml", "max_events = 2\n");
    ws.hydra()
        .env("HYDRA_MAX_EVENTS", "4")
        .args(&["replay", "feed.jsonl"])
        .passes()
        .stdout_has("Events:       4 / 4\n");
}

#[test]
fn explicit_config_path_is_used() {
    let ws = Workspace::with_feed();
    ws.file("conf/custom.toml", "max_events = 3\n");
    ws.hydra()
        .args(&["replay", "feed.jsonl", "--config", "conf/custom.toml"])
        .passes()
        .stdout_has("Events:       3 / 3\n");
}

#[test]
fn unknown_config_key_fails() {
    let ws = Workspace::with_feed();
    ws.file("hydra.toml", "max_event = 2\n");
    ws.hydra()
        .args(&["replay", "feed.jsonl"])
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn zero_capacity_fails() {
    let ws = Workspace::with_feed();
    ws.file("hydra.toml", "max_events = 0\n");
    ws.hydra()
        .args(&["replay", "feed.jsonl"])
        .fails()
        .stderr_has("max_events must be greater than zero");
}
