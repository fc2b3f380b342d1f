// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::action::Control;
use hydra_core::test_support::*;
use hydra_core::{Stage, WorkerKey};

#[test]
fn snapshot_is_not_affected_by_later_dispatch() {
    let mut store = Store::default();
    store.dispatch(&with_id(1, worker(7, "running")).into());
    let before = store.snapshot();

    store.dispatch(&with_id(2, worker(7, "done")).into());

    let key = WorkerKey::new(Stage::Implement, 7);
    assert_eq!(before.workers[&key].status, "running");
    assert_eq!(store.state().workers[&key].status, "done");
    assert_eq!(before.counters.implemented, 0);
    assert_eq!(store.state().counters.implemented, 1);
}

#[test]
fn dispatch_all_matches_repeated_reduce() {
    let actions: Vec<Action> = vec![
        Control::Connected.into(),
        with_id(1, triage(5, "done")).into(),
        with_id(2, pr_created(30, 5)).into(),
    ];

    let mut store = Store::new(DashboardState::default());
    store.dispatch_all(&actions);

    let expected = actions
        .iter()
        .fold(DashboardState::default(), |state, action| {
            crate::state::reduce(&state, action)
        });
    assert_eq!(store.into_state(), expected);
}
