// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hydra timeline` - per-issue lifecycle across the pipeline stages

use anyhow::Result;
use clap::Args;
use hydra_core::{format_span, Stage, Timestamp};
use hydra_state::{IssueTimeline, StageRecord};
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::output::{or_dash, print_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct TimelineArgs {
    /// Recorded feed (one JSON action per line)
    pub journal: PathBuf,

    /// Show the stage breakdown for one issue
    #[arg(long)]
    pub issue: Option<u64>,
}

/// Time between `start` and `end`, or `reference` while still open.
fn elapsed(
    start: Option<&Timestamp>,
    end: Option<&Timestamp>,
    reference: Option<&Timestamp>,
) -> String {
    let span = start.zip(end.or(reference)).and_then(|(s, e)| format_span(s, e));
    or_dash(span)
}

pub(crate) fn timeline_table(timelines: &[IssueTimeline], now: Option<&Timestamp>) -> Table {
    let mut table = Table::new(vec![
        Column::right("ISSUE"),
        Column::left("TITLE").with_max(40),
        Column::left("STAGE"),
        Column::status("STATUS"),
        Column::right("PR"),
        Column::muted("AGE"),
    ]);
    for t in timelines {
        table.row(vec![
            format!("#{}", t.issue),
            t.title.clone().unwrap_or_default(),
            or_dash(t.current_stage.map(Stage::name)),
            t.overall_status.name().to_string(),
            or_dash(t.pr.map(|pr| format!("#{pr}"))),
            elapsed(t.start_time.as_ref(), None, now),
        ]);
    }
    table
}

fn last_line(record: &StageRecord) -> String {
    record
        .transcript
        .last()
        .map(|entry| entry.line.clone())
        .unwrap_or_default()
}

pub(crate) fn stage_table(timeline: &IssueTimeline, now: Option<&Timestamp>) -> Table {
    let mut table = Table::new(vec![
        Column::left("STAGE"),
        Column::status("STATUS"),
        Column::right("TIME"),
        Column::muted("LAST LINE").with_max(60),
    ]);
    for stage in Stage::ALL {
        let record = timeline.stages.get(stage);
        table.row(vec![
            stage.name().to_string(),
            record.status.name().to_string(),
            elapsed(record.start_time.as_ref(), record.end_time.as_ref(), now),
            last_line(record),
        ]);
    }
    table
}

pub(crate) fn issue_heading(timeline: &IssueTimeline) -> String {
    let mut heading = format!("#{}", timeline.issue);
    if let Some(title) = &timeline.title {
        heading.push_str(&format!(" {title}"));
    }
    let mut refs = Vec::new();
    if let Some(branch) = &timeline.branch {
        refs.push(format!("branch {branch}"));
    }
    if let Some(pr) = timeline.pr {
        refs.push(format!("PR #{pr}"));
    }
    if !refs.is_empty() {
        heading.push_str(&format!(" ({})", refs.join(", ")));
    }
    heading
}

pub fn handle(args: TimelineArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let loaded = super::load(&args.journal, None, config)?;
    let state = loaded.store.state();
    let timelines = state.issue_timelines();
    let now = state.events.newest().map(|e| &e.timestamp);

    let mut out = std::io::stdout();
    match args.issue {
        Some(issue) => {
            let Some(timeline) = timelines.iter().find(|t| t.issue == issue) else {
                anyhow::bail!("issue #{issue} has no timeline");
            };
            match format {
                OutputFormat::Json => print_json(timeline)?,
                OutputFormat::Text => {
                    println!("{}", crate::color::header(&issue_heading(timeline)));
                    stage_table(timeline, now).render(&mut out);
                }
            }
        }
        None => match format {
            OutputFormat::Json => print_json(&timelines)?,
            OutputFormat::Text if timelines.is_empty() => println!("No issues in the event log"),
            OutputFormat::Text => timeline_table(&timelines, now).render(&mut out),
        },
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
