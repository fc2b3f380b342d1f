//! `hydra follow` specs

use crate::prelude::*;
use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

#[test]
fn follow_prints_current_stages_and_stops_at_timeout() {
    let ws = Workspace::with_feed();
    ws.hydra()
        .env("HYDRA_FOLLOW_POLL_MS", "20")
        .args(&["follow", "feed.jsonl", "--timeout", "200ms"])
        .passes()
        .stdout_eq(
            "live/session  triage 1/1  plan 0/0  implement 1/0  review 0/0  merged 0/0\n",
        );
}

#[test]
fn follow_applies_appended_lines() {
    let ws = Workspace::with_feed();
    let child = ws
        .hydra()
        .env("HYDRA_FOLLOW_POLL_MS", "20")
        .args(&["follow", "feed.jsonl", "--timeout", "3s"])
        .command()
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    std::thread::sleep(Duration::from_millis(500));
    let mut journal = std::fs::OpenOptions::new()
        .append(true)
        .open(ws.path().join("feed.jsonl"))
        .unwrap();
    writeln!(
        journal,
        r#"{{"id":8,"type":"worker_update","timestamp":"2026-01-01T00:05:00Z","data":{{"issue":5,"status":"done"}}}}"#
    )
    .unwrap();
    drop(journal);

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(
        stdout.contains("#8 worker_update issue=5 status=done\n"),
        "{stdout}"
    );
    assert!(
        stdout.contains("live/session  triage 1/1  plan 0/0  implement 0/1  review 0/0  merged 0/0\n"),
        "{stdout}"
    );
}
