// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod events;
pub mod follow;
pub mod replay;
pub mod stages;
pub mod timeline;

use anyhow::{Context, Result};
use hydra_state::{Journal, Snapshot, Store};
use std::path::Path;

use crate::config::Config;

/// A journal reduced into a store.
pub(crate) struct Loaded {
    pub store: Store,
    /// Lines in the journal that did not decode
    pub skipped: usize,
    /// Byte offset just past the last complete line
    pub offset: u64,
}

/// Reduce `journal` on top of `snapshot` (or an empty state).
///
/// Replaying a journal over a snapshot taken from the same feed is safe:
/// envelopes at or below the snapshot's last seen id are skipped. A restored
/// state takes the configured limits, not the ones it was saved with.
pub(crate) fn load(journal: &Path, snapshot: Option<&Path>, config: &Config) -> Result<Loaded> {
    let state = match snapshot {
        Some(path) => Snapshot::load(path)
            .with_context(|| format!("failed to load snapshot {}", path.display()))?
            .map(|s| config.bound(s.state))
            .unwrap_or_else(|| config.new_state()),
        None => config.new_state(),
    };

    let read = Journal::new(journal).read()?;
    if read.skipped > 0 {
        eprintln!(
            "warning: skipped {} unreadable line(s) in {}",
            read.skipped,
            journal.display()
        );
    }

    let mut store = Store::new(state);
    store.dispatch_all(&read.actions);
    tracing::debug!(
        journal = %journal.display(),
        actions = read.actions.len(),
        skipped = read.skipped,
        "journal replayed",
    );

    Ok(Loaded {
        store,
        skipped: read.skipped,
        offset: read.offset,
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
