// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hydra_core::test_support::*;
use hydra_state::{Action, Control, Store};
use serial_test::serial;

fn plain_output() {
    std::env::set_var("NO_COLOR", "1");
}

fn replayed(actions: Vec<Action>) -> DashboardState {
    let mut store = Store::new(DashboardState::default());
    store.dispatch_all(&actions);
    store.into_state()
}

fn session() -> DashboardState {
    replayed(vec![
        Control::Connected.into(),
        with_id(1, phase(Some("idle"), "plan")).into(),
        with_id(2, orchestrator("running")).into(),
        with_id(3, triage(5, "done")).into(),
        with_id(4, worker(5, "running")).into(),
        with_id(5, pr_created(30, 5)).into(),
        with_id(6, review(30, 5, "done")).into(),
    ])
}

#[test]
fn summary_reflects_reduced_state() {
    let summary = Summary::of(&session(), 0);

    assert_eq!(summary.phase, "plan");
    assert_eq!(summary.orchestrator_status, "running");
    assert!(summary.connected);
    assert_eq!(summary.last_seen_id, Some(EventId(6)));
    assert_eq!(summary.events, 6);
    assert_eq!(summary.open_prs, 1);
    assert_eq!(summary.reviews, 1);
    assert_eq!(summary.counters.triaged, 1);
    assert_eq!(summary.counters.prs, 1);
    assert_eq!(summary.counters.reviewed, 1);
}

#[test]
fn active_workers_excludes_finished_ones() {
    let summary = Summary::of(&session(), 0);

    // triage-5 done, implementer 5 running, review-30 done
    assert_eq!(summary.workers, 3);
    assert_eq!(summary.active_workers, 1);
}

#[test]
#[serial]
fn text_summary_lists_each_field() {
    plain_output();
    let text = format_summary(&Summary::of(&session(), 0));

    assert!(text.contains("Phase:        plan\n"), "{text}");
    assert!(text.contains("Connected:    yes\n"), "{text}");
    assert!(text.contains("Last event:   #6\n"), "{text}");
    assert!(text.contains("Workers:      3 (1 active)\n"), "{text}");
    assert!(text.contains("triaged 1  planned 0"), "{text}");
    assert!(!text.contains("skipped"), "{text}");
}

#[test]
#[serial]
fn empty_state_shows_placeholders() {
    plain_output();
    let text = format_summary(&Summary::of(&DashboardState::default(), 2));

    assert!(text.contains("Last event:   -\n"), "{text}");
    assert!(text.contains("Events:       0 / 5000\n"), "{text}");
    assert!(text.contains("(2 unreadable journal line(s) skipped)"), "{text}");
}

#[test]
fn summary_serializes_with_snake_case_keys() {
    let json = serde_json::to_value(Summary::of(&session(), 0)).unwrap();

    assert_eq!(json["last_seen_id"], 6);
    assert_eq!(json["counters"]["triaged"], 1);
    assert_eq!(json["connected"], true);
}
