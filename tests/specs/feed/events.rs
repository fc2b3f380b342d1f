//! `hydra events` specs

use crate::prelude::*;

#[test]
fn events_are_newest_first_and_limited() {
    let ws = Workspace::with_feed();
    ws.hydra()
        .args(&["events", "feed.jsonl", "-n", "3"])
        .passes()
        .stdout_eq(
            "\
ID  TIME                  EVENT
 7  2026-01-01T00:04:00Z  triage_update issue=8 status=running
 6  2026-01-01T00:03:00Z  pr_created pr=30 issue=5
 5  2026-01-01T00:01:00Z  worker_update issue=5 status=running
",
        );
}

#[test]
fn replayed_id_is_logged_once() {
    let ws = Workspace::with_feed();
    ws.hydra()
        .args(&["events", "feed.jsonl", "--kind", "triage_update"])
        .passes()
        .stdout_eq(
            "\
ID  TIME                  EVENT
 7  2026-01-01T00:04:00Z  triage_update issue=8 status=running
 4  2026-01-01T00:00:40Z  triage_update issue=5 status=done
 3  2026-01-01T00:00:10Z  triage_update issue=5 status=running
",
        );
}

#[test]
fn events_json_uses_wire_form() {
    let ws = Workspace::with_feed();
    let json = ws
        .hydra()
        .args(&["-o", "json", "events", "feed.jsonl", "-n", "1"])
        .passes()
        .json();

    assert_eq!(
        json,
        serde_json::json!([{
            "id": 7,
            "type": "triage_update",
            "timestamp": "2026-01-01T00:04:00Z",
            "data": {"issue": 8, "status": "running", "title": "Add dark mode"}
        }])
    );
}

#[test]
fn no_matching_events() {
    let ws = Workspace::with_feed();
    ws.hydra()
        .args(&["events", "feed.jsonl", "--kind", "merge_update"])
        .passes()
        .stdout_eq("No events\n");
}
