//! `hydra timeline` specs

use crate::prelude::*;

#[test]
fn timeline_lists_newest_issue_first() {
    let ws = Workspace::with_feed();
    ws.hydra().args(&["timeline", "feed.jsonl"]).passes().stdout_eq(
        "\
ISSUE  TITLE          STAGE      STATUS   PR  AGE
   #8  Add dark mode  triage     active    -  0s
   #5  Fix login      implement  active  #30  3m
",
    );
}

#[test]
fn timeline_for_one_issue_breaks_down_stages() {
    let ws = Workspace::with_feed();
    ws.hydra()
        .args(&["timeline", "feed.jsonl", "--issue", "5"])
        .passes()
        .stdout_eq(
            "\
#5 Fix login (branch agent/issue-5, PR #30)
STAGE      STATUS   TIME  LAST LINE
triage     done      30s  
plan       pending     -  
implement  active     3m  
review     pending     -  
merged     pending     -  
",
        );
}

#[test]
fn timeline_json_carries_stage_records() {
    let ws = Workspace::with_feed();
    let json = ws
        .hydra()
        .args(&["-o", "json", "timeline", "feed.jsonl"])
        .passes()
        .json();

    let issues = json.as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[1]["issue"], 5);
    assert_eq!(issues[1]["pr"], 30);
    assert_eq!(issues[1]["current_stage"], "implement");
    assert_eq!(issues[1]["stages"]["triage"]["status"], "done");
    assert_eq!(issues[1]["stages"]["triage"]["end_time"], "2026-01-01T00:00:40Z");
}

#[test]
fn empty_journal_has_no_issues() {
    let ws = Workspace::empty();
    ws.file("feed.jsonl", "");
    ws.hydra()
        .args(&["timeline", "feed.jsonl"])
        .passes()
        .stdout_eq("No issues in the event log\n");
}
