// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod controls;
mod dedup;
mod properties;
mod registries;
mod session;

use super::*;
use hydra_core::test_support::*;

fn apply_all(state: &mut DashboardState, envelopes: impl IntoIterator<Item = EventEnvelope>) {
    for envelope in envelopes {
        state.apply(&Action::Event(envelope));
    }
}

fn state_after(envelopes: impl IntoIterator<Item = EventEnvelope>) -> DashboardState {
    let mut state = DashboardState::default();
    apply_all(&mut state, envelopes);
    state
}

fn key(stage: Stage, subject: u64) -> WorkerKey {
    WorkerKey::new(stage, subject)
}

fn pr(number: u64, issue: Option<u64>) -> PullRequest {
    PullRequest {
        pr: number,
        issue,
        url: String::new(),
        branch: String::new(),
        title: String::new(),
        draft: false,
        merged: false,
    }
}

#[test]
fn default_state_is_idle_and_empty() {
    let state = DashboardState::default();
    assert_eq!(state.phase, "idle");
    assert_eq!(state.orchestrator_status, "idle");
    assert_eq!(state.last_seen_id, None);
    assert!(state.events.is_empty());
    assert!(state.workers.is_empty());
    assert_eq!(state.counters, SessionCounters::default());
}

#[test]
fn reduce_leaves_input_untouched() {
    let before = state_after([with_id(1, triage(5, "running"))]);
    let after = reduce(&before, &with_id(2, triage(5, "done")).into());

    assert_eq!(before.workers[&key(Stage::Triage, 5)].status, "running");
    assert_eq!(after.workers[&key(Stage::Triage, 5)].status, "done");
    assert_eq!(before.counters.triaged, 0);
    assert_eq!(after.counters.triaged, 1);
}

#[test]
fn identical_sequences_give_identical_states() {
    let sequence = || {
        [
            with_id(1, triage(5, "running")),
            with_id(2, triage(5, "done")),
            with_id(3, pr_created(30, 5)),
            anonymous(4, unknown("agent_thought")),
        ]
    };
    assert_eq!(state_after(sequence()), state_after(sequence()));
}
