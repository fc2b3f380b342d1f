// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-writer owner of the dashboard state.

use crate::action::Action;
use crate::state::DashboardState;
use std::sync::Arc;

/// Holds the current state behind an `Arc`. Readers take a snapshot and
/// keep it as long as they like; the next dispatch copies the state first
/// when a snapshot is still alive, so a snapshot never changes under them.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<DashboardState>,
}

impl Store {
    pub fn new(state: DashboardState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn dispatch(&mut self, action: &Action) {
        Arc::make_mut(&mut self.state).apply(action);
    }

    pub fn dispatch_all<'a>(&mut self, actions: impl IntoIterator<Item = &'a Action>) {
        let state = Arc::make_mut(&mut self.state);
        for action in actions {
            state.apply(action);
        }
    }

    pub fn snapshot(&self) -> Arc<DashboardState> {
        Arc::clone(&self.state)
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn into_state(self) -> DashboardState {
        Arc::unwrap_or_clone(self.state)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
