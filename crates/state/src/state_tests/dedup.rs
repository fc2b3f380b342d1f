// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn replayed_terminal_event_counts_once() {
    let event = with_id(1, triage(5, "done"));
    let mut state = state_after([event.clone()]);
    assert_eq!(state.counters.triaged, 1);

    apply_all(&mut state, [event]);
    assert_eq!(state.counters.triaged, 1);
    assert_eq!(state.events.len(), 1);
}

#[test]
fn stale_id_does_not_regress_worker() {
    let state = state_after([
        with_id(5, worker(7, "running")),
        with_id(3, worker(7, "done")),
    ]);
    assert_eq!(state.workers[&key(Stage::Implement, 7)].status, "running");
    assert_eq!(state.counters.implemented, 0);
    assert_eq!(state.events.len(), 1);
    assert_eq!(state.last_seen_id, Some(EventId(5)));
}

#[test]
fn events_without_id_are_never_deduplicated() {
    let event = anonymous(1, triage(5, "running"));
    let state = state_after([event.clone(), event]);
    assert_eq!(state.events.len(), 2);
    assert_eq!(state.last_seen_id, None);
}

#[test]
fn last_seen_id_tracks_highest_processed() {
    let state = state_after([
        with_id(1, triage(1, "running")),
        anonymous(2, triage(2, "running")),
        with_id(9, triage(3, "running")),
    ]);
    assert_eq!(state.last_seen_id, Some(EventId(9)));
}

#[test]
fn replayed_transcript_line_is_not_appended_twice() {
    let line = with_id(2, transcript("planner", Some(5), None, "thinking"));
    let mut state = state_after([with_id(1, planner(5, "planning")), line.clone()]);
    apply_all(&mut state, [line]);

    let entry = &state.workers[&key(Stage::Plan, 5)];
    assert_eq!(entry.transcript.len(), 1);
    assert_eq!(entry.transcript[0].id, Some(EventId(2)));
}

#[test]
fn live_copy_of_backfilled_event_updates_registries_once() {
    let historical = with_id(10, triage(5, "done"));
    let mut state = DashboardState::default();
    state.apply(&Control::BackfillEvents(vec![historical.clone()]).into());
    assert_eq!(state.last_seen_id, None);

    apply_all(&mut state, [historical.clone()]);
    assert_eq!(state.workers[&key(Stage::Triage, 5)].status, "done");
    assert_eq!(state.counters.triaged, 1);
    assert_eq!(state.events.len(), 1);
    assert_eq!(state.last_seen_id, Some(EventId(10)));

    apply_all(&mut state, [historical]);
    assert_eq!(state.counters.triaged, 1);
    assert_eq!(state.events.len(), 1);
}

#[test]
fn new_run_reusing_an_old_id_is_logged() {
    let mut state = state_after([at(1, 10, triage(5, "done"))]);
    apply_all(&mut state, [at(2, 20, phase(Some("idle"), "plan"))]);
    assert_eq!(state.last_seen_id, None);

    apply_all(&mut state, [at(1, 30, triage(6, "running"))]);
    assert_eq!(state.events.len(), 3);
}

#[test]
fn backfilled_history_replayed_live_rebuilds_the_session() {
    let history: Vec<_> = (1..=3).map(|n| at(n, n as i64, triage(n, "done"))).collect();
    let mut state = DashboardState::default();
    state.apply(&Control::BackfillEvents(history.clone()).into());

    apply_all(&mut state, history);
    assert_eq!(state.workers.len(), 3);
    assert_eq!(state.counters.triaged, 3);
    assert_eq!(state.events.len(), 3);
}

#[test]
fn disconnect_keeps_dedup_watermark_and_registries() {
    let mut state = state_after([with_id(3, worker(7, "running"))]);
    state.apply(&Control::Connected.into());
    state.apply(&Control::Disconnected.into());

    assert!(!state.connected);
    assert_eq!(state.last_seen_id, Some(EventId(3)));
    assert!(state.workers.contains_key(&key(Stage::Implement, 7)));

    apply_all(&mut state, [with_id(3, worker(7, "done"))]);
    assert_eq!(state.workers[&key(Stage::Implement, 7)].status, "running");
}
