// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::event_log::MAX_EVENTS;

#[test]
fn existing_prs_replace_registry_without_duplicates() {
    let mut state = state_after([with_id(1, pr_created(9, 1))]);
    state.apply(&Control::ExistingPrs(vec![pr(1, None), pr(2, Some(4)), pr(1, Some(5))]).into());

    let numbers: Vec<u64> = state.prs.iter().map(|p| p.pr).collect();
    assert_eq!(numbers, [1, 2]);
    assert_eq!(state.prs[0].issue, None);
    assert_eq!(state.counters.prs, 1);
}

#[test]
fn empty_backfill_is_a_no_op() {
    let before = state_after([with_id(1, triage(1, "running"))]);
    let after = reduce(&before, &Control::BackfillEvents(Vec::new()).into());
    assert_eq!(before, after);
}

#[test]
fn backfill_twice_equals_backfill_once() {
    let batch: Vec<_> = (1..=20)
        .map(|n| with_id(n, triage(n, "done")))
        .chain([anonymous(3, unknown("agent_thought"))])
        .collect();
    let action: Action = Control::BackfillEvents(batch).into();

    let once = reduce(&DashboardState::default(), &action);
    let twice = reduce(&once, &action);
    assert_eq!(once, twice);
    assert_eq!(once.events.len(), 21);
}

#[test]
fn backfill_does_not_touch_registries_or_counters() {
    let state = reduce(
        &DashboardState::default(),
        &Control::BackfillEvents(vec![with_id(1, triage(5, "done"))]).into(),
    );
    assert!(state.workers.is_empty());
    assert_eq!(state.counters.triaged, 0);
}

#[test]
fn backfill_leaves_last_seen_id_alone() {
    let mut state = state_after([with_id(50, triage(1, "running"))]);
    state.apply(
        &Control::BackfillEvents(vec![with_id(3, triage(2, "done")), with_id(80, triage(3, "done"))])
            .into(),
    );
    assert_eq!(state.last_seen_id, Some(EventId(50)));
}

#[test]
fn large_backfill_is_truncated_newest_first() {
    let mut state = DashboardState::default();
    apply_all(
        &mut state,
        (0..3000u64).map(|n| at(10_000 + n, 10_000 + n as i64, triage(n, "running"))),
    );
    let backfill: Vec<_> = (0..3000u64)
        .map(|n| at(n + 1, n as i64, triage(n, "done")))
        .collect();
    state.apply(&Control::BackfillEvents(backfill).into());

    assert_eq!(state.events.len(), MAX_EVENTS);
    let stamps: Vec<_> = state.events.iter().map(|e| e.timestamp.clone()).collect();
    assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(state.events.newest().map(|e| e.timestamp.clone()), Some(ts(12_999)));
}

#[test]
fn human_input_requests_replace_and_remove() {
    let mut state = DashboardState::default();
    state.apply(
        &Control::HumanInputRequests(
            [(4, "which db?".to_string()), (9, "ok to delete?".to_string())].into(),
        )
        .into(),
    );
    state.apply(&Control::HumanInputSubmitted { issue: 4 }.into());
    state.apply(&Control::HumanInputSubmitted { issue: 77 }.into());

    assert_eq!(state.human_input_requests.keys().copied().collect::<Vec<_>>(), [9]);
}

#[test]
fn intent_placeholder_is_replaced_per_issue() {
    let mut state = DashboardState::default();
    for text in ["first", "second"] {
        state.apply(
            &Control::IntentSubmitted {
                text: text.to_string(),
                issue: Some(3),
                timestamp: Some(ts(1)),
            }
            .into(),
        );
    }
    state.apply(
        &Control::IntentSubmitted {
            text: "unfiled".to_string(),
            issue: None,
            timestamp: None,
        }
        .into(),
    );

    assert_eq!(state.intents.len(), 2);
    assert_eq!(state.intents[0].text, "second");
    assert_eq!(state.intents[0].status, IntentStatus::Pending);
}

#[test]
fn metrics_and_snapshot_lists_are_replaced() {
    let mut state = DashboardState::default();
    let metrics = Metrics {
        lifetime: [("issues_completed".to_string(), 12)].into(),
        rates: Default::default(),
    };
    state.apply(&Control::Metrics(metrics.clone()).into());
    state.apply(
        &Control::PipelineSnapshot(
            [(
                Stage::Plan,
                vec![PipelineIssue {
                    issue: 4,
                    title: String::new(),
                    status: "active".to_string(),
                }],
            )]
            .into(),
        )
        .into(),
    );

    assert_eq!(state.metrics, Some(metrics));
    assert_eq!(state.pipeline_issues[&Stage::Plan].len(), 1);
}

#[test]
fn connection_state_follows_controls() {
    let mut state = DashboardState::default();
    state.apply(&Control::Connected.into());
    assert!(state.connected);
    state.apply(&Control::Disconnected.into());
    assert!(!state.connected);
}

#[test]
fn set_limits_trims_log_and_transcripts() {
    let mut state = state_after(
        [with_id(1, worker(9, "running"))]
            .into_iter()
            .chain((2..=5).map(|n| with_id(n, transcript("implementer", Some(9), None, "line")))),
    );
    assert_eq!(state.workers[&key(Stage::Implement, 9)].transcript.len(), 4);

    state.set_limits(3, 2);

    assert_eq!(state.events.capacity(), 3);
    assert_eq!(state.events.len(), 3);
    let ids: Vec<_> = state.workers[&key(Stage::Implement, 9)]
        .transcript
        .iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, [Some(EventId(4)), Some(EventId(5))]);
}
