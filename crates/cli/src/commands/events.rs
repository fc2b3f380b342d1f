// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hydra events` - the bounded event log, newest first

use anyhow::Result;
use clap::Args;
use hydra_core::EventEnvelope;
use hydra_state::EventLog;
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::output::{or_dash, print_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct EventsArgs {
    /// Recorded feed (one JSON action per line)
    pub journal: PathBuf,

    /// Number of events to show
    #[arg(short = 'n', long, default_value_t = 50)]
    pub limit: usize,

    /// Only show events of this wire type (e.g. worker_update)
    #[arg(long)]
    pub kind: Option<String>,
}

pub(crate) fn select<'a>(
    log: &'a EventLog,
    kind: Option<&str>,
    limit: usize,
) -> Vec<&'a EventEnvelope> {
    log.iter()
        .filter(|e| kind.map_or(true, |k| e.event.kind() == k))
        .take(limit)
        .collect()
}

pub(crate) fn events_table(events: &[&EventEnvelope]) -> Table {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::muted("TIME"),
        Column::left("EVENT"),
    ]);
    for envelope in events {
        table.row(vec![
            or_dash(envelope.id),
            envelope.timestamp.to_string(),
            envelope.event.log_summary(),
        ]);
    }
    table
}

pub fn handle(args: EventsArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let loaded = super::load(&args.journal, None, config)?;
    let events = select(&loaded.store.state().events, args.kind.as_deref(), args.limit);

    match format {
        OutputFormat::Json => print_json(&events)?,
        OutputFormat::Text if events.is_empty() => println!("No events"),
        OutputFormat::Text => {
            let mut out = std::io::stdout();
            events_table(&events).render(&mut out);
            out.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
