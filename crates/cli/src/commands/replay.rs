// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hydra replay` - reduce a journal and summarize the session

use anyhow::{Context, Result};
use clap::Args;
use hydra_core::{EventId, LoadClass};
use hydra_state::{DashboardState, SessionCounters, Snapshot};
use serde::Serialize;
use std::path::PathBuf;

use crate::color;
use crate::config::Config;
use crate::output::{or_dash, print_json, OutputFormat};

#[derive(Args)]
pub struct ReplayArgs {
    /// Recorded feed (one JSON action per line)
    pub journal: PathBuf,

    /// Resume from a saved snapshot instead of an empty state
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Write the resulting state to this snapshot file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Summary {
    pub phase: String,
    pub orchestrator_status: String,
    pub connected: bool,
    pub last_seen_id: Option<EventId>,
    pub events: usize,
    pub capacity: usize,
    pub workers: usize,
    pub active_workers: usize,
    pub open_prs: usize,
    pub reviews: usize,
    pub hitl_items: usize,
    pub counters: SessionCounters,
    pub skipped_lines: usize,
}

impl Summary {
    pub(crate) fn of(state: &DashboardState, skipped_lines: usize) -> Self {
        Self {
            phase: state.phase.clone(),
            orchestrator_status: state.orchestrator_status.clone(),
            connected: state.connected,
            last_seen_id: state.last_seen_id,
            events: state.events.len(),
            capacity: state.events.capacity(),
            workers: state.workers.len(),
            active_workers: state
                .workers
                .values()
                .filter(|w| w.load_class() == LoadClass::Active)
                .count(),
            open_prs: state.prs.iter().filter(|p| !p.merged).count(),
            reviews: state.reviews.len(),
            hitl_items: state.hitl_items.len(),
            counters: state.counters,
            skipped_lines,
        }
    }
}

pub(crate) fn format_summary(summary: &Summary) -> String {
    let c = &summary.counters;
    let rows = [
        ("Phase", color::status(&summary.phase)),
        ("Orchestrator", color::status(&summary.orchestrator_status)),
        (
            "Connected",
            if summary.connected { "yes" } else { "no" }.to_string(),
        ),
        (
            "Last event",
            or_dash(summary.last_seen_id.map(|id| format!("#{id}"))),
        ),
        (
            "Events",
            format!("{} / {}", summary.events, summary.capacity),
        ),
        (
            "Workers",
            format!("{} ({} active)", summary.workers, summary.active_workers),
        ),
        ("Open PRs", summary.open_prs.to_string()),
        ("Reviews", summary.reviews.to_string()),
        ("HITL", summary.hitl_items.to_string()),
        (
            "Session",
            format!(
                "triaged {}  planned {}  implemented {}  reviewed {}  merged {}  prs {}",
                c.triaged, c.planned, c.implemented, c.reviewed, c.merged, c.prs
            ),
        ),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{:<13} {}\n", format!("{label}:"), value));
    }
    if summary.skipped_lines > 0 {
        out.push_str(&color::muted(&format!(
            "({} unreadable journal line(s) skipped)",
            summary.skipped_lines
        )));
        out.push('\n');
    }
    out
}

pub fn handle(args: ReplayArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let loaded = super::load(&args.journal, args.snapshot.as_deref(), config)?;
    let state = loaded.store.state();

    if let Some(path) = &args.save {
        Snapshot::new(state.clone())
            .save(path)
            .with_context(|| format!("failed to save snapshot {}", path.display()))?;
        tracing::info!(path = %path.display(), "snapshot saved");
    }

    let summary = Summary::of(state, loaded.skipped);
    match format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => print!("{}", format_summary(&summary)),
    }
    Ok(())
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
