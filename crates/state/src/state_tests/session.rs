// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn busy_state() -> DashboardState {
    let mut state = state_after((1..=5).map(|n| with_id(n, worker(n, "done"))));
    apply_all(
        &mut state,
        [
            with_id(6, pr_created(30, 1)),
            with_id(7, review(30, 1, "done")),
            with_id(8, background_worker("memory_sync", "ok")),
        ],
    );
    state.apply(
        &Control::HitlItems(vec![HitlItem {
            issue: 2,
            title: String::new(),
            pr: None,
            branch: String::new(),
            cause: "ci".to_string(),
            status: String::new(),
        }])
        .into(),
    );
    state.apply(&Control::Metrics(Metrics::default()).into());
    state
}

#[test]
fn new_run_resets_session_state() {
    let mut state = busy_state();
    assert_eq!(state.counters.implemented, 5);

    apply_all(&mut state, [with_id(9, phase(Some("idle"), "plan"))]);

    assert!(state.workers.is_empty());
    assert!(state.prs.is_empty());
    assert!(state.reviews.is_empty());
    assert!(state.hitl_items.is_empty());
    assert_eq!(state.counters, SessionCounters::default());
    assert_eq!(state.last_seen_id, None);
    assert_eq!(state.phase, "plan");
}

#[test]
fn new_run_keeps_process_wide_state() {
    let mut state = busy_state();
    apply_all(&mut state, [with_id(9, phase(Some("done"), "plan"))]);

    assert_eq!(state.background_workers.len(), 1);
    assert!(state.metrics.is_some());
    assert!(!state.events.is_empty());
}

#[yare::parameterized(
    plan_to_implement = { Some("plan"), "implement" },
    implement_to_review = { Some("implement"), "review" },
    review_to_plan = { Some("review"), "plan" },
    idle_to_implement = { Some("idle"), "implement" },
)]
fn phase_change_within_run_keeps_state(from: Option<&str>, to: &str) {
    let mut state = busy_state();
    apply_all(&mut state, [with_id(9, phase(from, to))]);

    assert_eq!(state.workers.len(), 6);
    assert_eq!(state.counters.implemented, 5);
    assert_eq!(state.last_seen_id, Some(EventId(9)));
    assert_eq!(state.phase, to);
}

#[test]
fn missing_from_falls_back_to_current_phase() {
    let mut state = busy_state();
    apply_all(&mut state, [with_id(9, phase(None, "plan"))]);
    assert!(state.workers.is_empty());

    let mut state = busy_state();
    apply_all(
        &mut state,
        [
            with_id(9, phase(None, "implement")),
            with_id(10, phase(None, "plan")),
        ],
    );
    assert_eq!(state.counters.implemented, 5);
}

#[test]
fn ids_restart_after_new_run() {
    let mut state = busy_state();
    apply_all(
        &mut state,
        [
            with_id(9, phase(Some("idle"), "plan")),
            with_id(1, triage(40, "done")),
        ],
    );
    assert_eq!(state.counters.triaged, 1);
    assert_eq!(state.last_seen_id, Some(EventId(1)));
}

#[yare::parameterized(
    idle = { "idle" },
    done = { "done" },
    stopping = { "stopping" },
)]
fn stop_status_clears_workers_and_counters(status: &str) {
    let mut state = busy_state();
    apply_all(&mut state, [with_id(20, orchestrator("running"))]);
    apply_all(&mut state, [with_id(21, worker(8, "running"))]);

    apply_all(&mut state, [with_id(22, orchestrator(status))]);

    assert!(state.workers.is_empty());
    assert_eq!(state.counters, SessionCounters::default());
    assert_eq!(state.orchestrator_status, status);
    assert_eq!(state.last_seen_id, Some(EventId(22)));
}

#[test]
fn repeated_status_is_a_no_op() {
    let mut state = busy_state();
    assert_eq!(state.orchestrator_status, "idle");

    apply_all(&mut state, [with_id(20, orchestrator("idle"))]);

    assert_eq!(state.workers.len(), 6);
    assert_eq!(state.counters.implemented, 5);
}

#[test]
fn running_from_rest_clears_work_lists() {
    let mut state = busy_state();
    apply_all(&mut state, [with_id(20, orchestrator("running"))]);

    assert!(state.workers.is_empty());
    assert!(state.prs.is_empty());
    assert!(state.reviews.is_empty());
    assert!(state.hitl_items.is_empty());
    assert_eq!(state.background_workers.len(), 1);
}

#[test]
fn running_from_other_status_keeps_work_lists() {
    let mut state = busy_state();
    apply_all(&mut state, [with_id(20, orchestrator("paused"))]);
    apply_all(&mut state, [with_id(21, orchestrator("running"))]);

    assert_eq!(state.prs.len(), 1);
    assert_eq!(state.workers.len(), 6);
}
