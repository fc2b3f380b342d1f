// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded, newest-first log of received envelopes.

use hydra_core::EventEnvelope;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Default capacity of the event log
pub const MAX_EVENTS: usize = 5000;

/// Envelopes ordered by timestamp, newest first, never longer than its
/// capacity. The oldest entries fall off the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<EventEnvelope>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::bounded(MAX_EVENTS)
    }
}

impl EventLog {
    pub fn bounded(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping the oldest entries that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.entries.truncate(capacity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate newest to oldest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &EventEnvelope> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&EventEnvelope> {
        self.entries.front()
    }

    /// Whether this exact envelope is already logged.
    pub fn contains(&self, envelope: &EventEnvelope) -> bool {
        let start = self
            .entries
            .partition_point(|e| e.timestamp > envelope.timestamp);
        self.entries
            .range(start..)
            .take_while(|e| e.timestamp == envelope.timestamp)
            .any(|e| e == envelope)
    }

    /// Add one live envelope.
    ///
    /// Lands before every entry that is not newer than it, which is the
    /// front of the log whenever events arrive in timestamp order.
    pub fn push(&mut self, envelope: EventEnvelope) {
        let at = self
            .entries
            .partition_point(|e| e.timestamp > envelope.timestamp);
        self.entries.insert(at, envelope);
        self.entries.truncate(self.capacity);
    }

    /// Merge a batch of historical envelopes, skipping ones already present.
    ///
    /// Returns how many envelopes from the batch were new. Re-merging the
    /// same batch leaves the log unchanged.
    pub fn merge_backfill(&mut self, batch: &[EventEnvelope]) -> usize {
        if batch.is_empty() {
            return 0;
        }
        let mut seen: HashSet<_> = self.entries.iter().map(EventEnvelope::identity).collect();
        let mut merged: Vec<EventEnvelope> = self.entries.drain(..).collect();
        let before = merged.len();
        merged.extend(
            batch
                .iter()
                .filter(|e| seen.insert(e.identity()))
                .cloned(),
        );
        let added = merged.len() - before;
        merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        merged.truncate(self.capacity);
        self.entries = merged.into();
        added
    }
}

#[cfg(test)]
#[path = "event_log_tests.rs"]
mod tests;
