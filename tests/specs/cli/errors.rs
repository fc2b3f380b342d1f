//! Failure modes: exit code 1 with a readable message on stderr

use crate::prelude::*;

#[test]
fn missing_journal_fails_with_path() {
    let ws = Workspace::empty();
    ws.hydra()
        .args(&["replay", "absent.jsonl"])
        .fails()
        .stderr_has("Error:")
        .stderr_has("absent.jsonl");
}

#[test]
fn unknown_issue_fails() {
    let ws = Workspace::with_feed();
    ws.hydra()
        .args(&["timeline", "feed.jsonl", "--issue", "99"])
        .fails()
        .stderr_has("issue #99 has no timeline");
}

#[test]
fn bad_timeout_is_rejected_by_the_parser() {
    let ws = Workspace::with_feed();
    ws.hydra()
        .args(&["follow", "feed.jsonl", "--timeout", "soon"])
        .fails()
        .stderr_has("invalid number in duration");
}

#[test]
fn corrupt_lines_warn_but_do_not_fail() {
    let ws = Workspace::with_feed();
    ws.hydra()
        .args(&["stages", "feed.jsonl"])
        .passes()
        .stderr_has("warning: skipped 1 unreadable line(s)");
}
