//! `hydra replay` specs

use crate::prelude::*;

#[test]
fn replay_prints_session_summary() {
    let ws = Workspace::with_feed();
    ws.hydra().args(&["replay", "feed.jsonl"]).passes().stdout_eq(
        "\
Phase:        plan
Orchestrator: running
Connected:    yes
Last event:   #7
Events:       7 / 5000
Workers:      3 (2 active)
Open PRs:     1
Reviews:      0
HITL:         0
Session:      triaged 1  planned 0  implemented 0  reviewed 0  merged 0  prs 1
(1 unreadable journal line(s) skipped)
",
    );
}

#[test]
fn replay_json_reports_counters() {
    let ws = Workspace::with_feed();
    let json = ws
        .hydra()
        .args(&["-o", "json", "replay", "feed.jsonl"])
        .passes()
        .json();

    assert_eq!(json["last_seen_id"], 7);
    assert_eq!(json["events"], 7);
    assert_eq!(json["counters"]["triaged"], 1);
    assert_eq!(json["counters"]["prs"], 1);
    assert_eq!(json["skipped_lines"], 1);
}

#[test]
fn saved_snapshot_resumes_without_double_counting() {
    let ws = Workspace::with_feed();
    ws.hydra()
        .args(&["replay", "feed.jsonl", "--save", "state/snapshot.json"])
        .passes();
    assert!(ws.path().join("state/snapshot.json").exists());

    let json = ws
        .hydra()
        .args(&[
            "-o",
            "json",
            "replay",
            "feed.jsonl",
            "--snapshot",
            "state/snapshot.json",
        ])
        .passes()
        .json();

    assert_eq!(json["events"], 7);
    assert_eq!(json["counters"]["triaged"], 1);
}

#[test]
fn corrupt_snapshot_is_set_aside() {
    let ws = Workspace::with_feed();
    ws.file("snapshot.json", "{not a snapshot");

    ws.hydra()
        .args(&["replay", "feed.jsonl", "--snapshot", "snapshot.json"])
        .passes()
        .stdout_has("Last event:   #7\n");
    assert!(ws.path().join("snapshot.bak").exists());
    assert!(!ws.path().join("snapshot.json").exists());
}
