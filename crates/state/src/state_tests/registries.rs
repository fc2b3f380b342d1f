// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hydra_core::{IssueUpdate, ReviewUpdate};

#[yare::parameterized(
    planning = { planner(5, "planning"), Stage::Plan, "planning" },
    triaging = { triage(5, "reading"), Stage::Triage, "reading" },
    quality_fix = { worker(5, "quality_fix"), Stage::Implement, "quality_fix" },
    reviewing = { review(5, 1, "reviewing"), Stage::Review, "reviewing" },
)]
fn status_is_stored_verbatim(event: Event, stage: Stage, status: &str) {
    let state = state_after([with_id(1, event)]);
    let entry = &state.workers[&key(stage, 5)];
    assert_eq!(entry.status, status);
    assert_eq!(entry.role, stage);
}

#[test]
fn worker_entry_carries_branch_and_default_title() {
    let state = state_after([with_id(1, worker(7, "running"))]);
    let entry = &state.workers[&key(Stage::Implement, 7)];
    assert_eq!(entry.title, "Issue #7");
    assert_eq!(entry.branch, "agent/issue-7");
    assert_eq!(entry.issue, Some(7));
}

#[test]
fn title_from_payload_wins() {
    let event = Event::TriageUpdate(IssueUpdate {
        issue: Some(3),
        status: "running".to_string(),
        title: Some("Fix login".to_string()),
    });
    let state = state_after([with_id(1, event)]);
    assert_eq!(state.workers[&key(Stage::Triage, 3)].title, "Fix login");
}

#[test]
fn completion_counts_once_per_subject() {
    let state = state_after([
        with_id(1, triage(5, "done")),
        with_id(2, triage(5, "done")),
        with_id(3, triage(5, "running")),
        with_id(4, triage(5, "done")),
        with_id(5, triage(6, "done")),
    ]);
    assert_eq!(state.counters.triaged, 2);
    assert!(state.workers[&key(Stage::Triage, 5)].counted);
}

#[yare::parameterized(
    triage_done = { triage(1, "done"), Stage::Triage },
    plan_done = { planner(1, "done"), Stage::Plan },
    implement_done = { worker(1, "done"), Stage::Implement },
    review_done = { review(1, 1, "done"), Stage::Review },
)]
fn done_increments_matching_counter(event: Event, stage: Stage) {
    let state = state_after([with_id(1, event)]);
    for s in Stage::ALL {
        let expected = u64::from(s == stage);
        assert_eq!(state.counters.for_stage(s), expected, "{s}");
    }
}

#[test]
fn non_done_terminal_statuses_do_not_count() {
    let state = state_after([
        with_id(1, worker(1, "failed")),
        with_id(2, worker(2, "completed")),
        with_id(3, worker(3, "escalated")),
    ]);
    assert_eq!(state.counters.implemented, 0);
}

#[test]
fn update_keeps_existing_transcript() {
    let state = state_after([
        with_id(1, worker(7, "running")),
        with_id(2, transcript("implementer", Some(7), None, "cargo test")),
        with_id(3, worker(7, "quality_fix")),
    ]);
    let entry = &state.workers[&key(Stage::Implement, 7)];
    assert_eq!(entry.status, "quality_fix");
    assert_eq!(entry.transcript.len(), 1);
}

#[test]
fn done_review_is_recorded() {
    let event = Event::ReviewUpdate(ReviewUpdate {
        pr: Some(30),
        issue: Some(7),
        status: "done".to_string(),
        verdict: Some("approve".to_string()),
        duration: Some(42.5),
        ..ReviewUpdate::default()
    });
    let state = state_after([with_id(1, review(30, 7, "reviewing")), with_id(2, event)]);

    assert_eq!(state.reviews.len(), 1);
    let record = &state.reviews[0];
    assert_eq!(record.pr, 30);
    assert_eq!(record.issue, Some(7));
    assert_eq!(record.verdict, "approve");
    assert_eq!(record.duration, Some(42.5));
    assert_eq!(state.counters.reviewed, 1);
}

#[test]
fn review_without_issue_resolves_through_pr_registry() {
    let event = Event::ReviewUpdate(ReviewUpdate {
        pr: Some(30),
        status: "reviewing".to_string(),
        ..ReviewUpdate::default()
    });
    let state = state_after([with_id(1, pr_created(30, 7)), with_id(2, event)]);

    let entry = &state.workers[&key(Stage::Review, 30)];
    assert_eq!(entry.issue, Some(7));
    assert_eq!(entry.title, "PR #30");
    assert_eq!(state.issue_for_pr(30), Some(7));
}

#[test]
fn merge_marks_pr_and_counts_once() {
    let state = state_after([
        with_id(1, pr_created(30, 7)),
        with_id(2, merge(30, None, "merged")),
        with_id(3, merge(30, None, "merged")),
    ]);
    assert_eq!(state.prs.len(), 1);
    assert!(state.prs[0].merged);
    assert_eq!(state.counters.merged, 1);
    assert_eq!(state.counters.prs, 1);
}

#[test]
fn merge_of_unknown_pr_adds_merged_entry() {
    let state = state_after([with_id(1, merge(31, Some(8), "merged"))]);
    assert_eq!(state.pull_request(31).map(|p| (p.merged, p.issue)), Some((true, Some(8))));
    assert_eq!(state.counters.merged, 1);
}

#[test]
fn unmerged_merge_status_is_ignored() {
    let state = state_after([
        with_id(1, pr_created(30, 7)),
        with_id(2, merge(30, None, "conflict")),
    ]);
    assert!(!state.prs[0].merged);
    assert_eq!(state.counters.merged, 0);
}

#[test]
fn duplicate_pr_created_is_a_no_op() {
    let mut state = DashboardState::default();
    state.apply(&Control::ExistingPrs(vec![pr(1, None), pr(2, None)]).into());
    apply_all(&mut state, [with_id(1, pr_created(1, 1))]);

    assert_eq!(state.prs.len(), 2);
    assert_eq!(state.counters.prs, 0);
}

#[test]
fn new_pr_is_registered_and_counted() {
    let state = state_after([with_id(1, pr_created(30, 7))]);
    let registered = &state.prs[0];
    assert_eq!(registered.issue, Some(7));
    assert_eq!(registered.branch, "agent/issue-7");
    assert_eq!(state.counters.prs, 1);
}

#[test]
fn transcript_is_capped_to_most_recent_lines() {
    let mut state = DashboardState::with_limits(100, 3);
    apply_all(&mut state, [with_id(1, planner(5, "planning"))]);
    apply_all(
        &mut state,
        (2..=6).map(|n| with_id(n, transcript("planner", Some(5), None, &format!("line {n}")))),
    );

    let lines: Vec<_> = state.workers[&key(Stage::Plan, 5)]
        .transcript
        .iter()
        .map(|l| l.line.as_str())
        .collect();
    assert_eq!(lines, ["line 4", "line 5", "line 6"]);
}

#[test]
fn transcript_routes_reviewer_lines_by_pr() {
    let state = state_after([
        with_id(1, review(30, 7, "reviewing")),
        with_id(2, transcript("reviewer", Some(7), Some(30), "looks fine")),
    ]);
    assert_eq!(state.workers[&key(Stage::Review, 30)].transcript.len(), 1);
}

#[test]
fn transcript_for_unknown_worker_is_only_logged() {
    let state = state_after([with_id(1, transcript("planner", Some(5), None, "x"))]);
    assert!(state.workers.is_empty());
    assert_eq!(state.events.len(), 1);
}

#[test]
fn hitl_update_only_reaches_the_log() {
    let before = state_after([with_id(1, worker(7, "running"))]);
    let after = reduce(&before, &with_id(2, hitl(7, "escalated")).into());

    assert_eq!(after.events.len(), 2);
    assert_eq!(after.workers, before.workers);
    assert_eq!(after.hitl_items, before.hitl_items);
}

#[test]
fn unknown_event_only_reaches_the_log() {
    let before = DashboardState::default();
    let after = reduce(&before, &with_id(1, unknown("agent_thought")).into());

    assert_eq!(after.events.len(), 1);
    assert!(after.workers.is_empty());
    assert_eq!(after.counters, before.counters);
}

#[test]
fn event_without_subject_is_logged_but_ignored() {
    let event = Event::from_wire("worker_update", serde_json::json!({"status": "done"}));
    let state = state_after([with_id(1, event)]);
    assert_eq!(state.events.len(), 1);
    assert!(state.workers.is_empty());
    assert_eq!(state.counters.implemented, 0);
}

#[test]
fn background_status_upserts_by_name() {
    let mut state = DashboardState::default();
    state.apply(
        &Control::BackgroundWorkers(vec![BackgroundWorker {
            name: "triage".to_string(),
            status: "ok".to_string(),
            enabled: false,
            last_run: None,
            details: serde_json::Value::Null,
        }])
        .into(),
    );
    apply_all(
        &mut state,
        [
            with_id(1, background_worker("triage", "error")),
            with_id(2, background_worker("memory_sync", "ok")),
        ],
    );

    assert_eq!(state.background_workers.len(), 2);
    let triage = &state.background_workers[0];
    assert_eq!(triage.status, "error");
    assert!(!triage.enabled);
    assert_eq!(triage.last_run.as_deref(), Some(ts(1).as_str()));
    assert!(state.background_workers[1].enabled);
}

#[test]
fn stage_event_activates_matching_intent() {
    let mut state = DashboardState::default();
    state.apply(
        &Control::IntentSubmitted {
            text: "add dark mode".to_string(),
            issue: Some(12),
            timestamp: None,
        }
        .into(),
    );
    apply_all(&mut state, [with_id(1, triage(11, "running"))]);
    assert_eq!(state.intents[0].status, IntentStatus::Pending);

    apply_all(&mut state, [with_id(2, triage(12, "running"))]);
    assert_eq!(state.intents[0].status, IntentStatus::Active);
}
