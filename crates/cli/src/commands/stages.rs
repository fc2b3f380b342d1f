// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hydra stages` - per-stage counts and the workload summary

use anyhow::Result;
use clap::Args;
use hydra_core::Stage;
use hydra_state::{StageStatusMap, Workload};
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::output::{print_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct StagesArgs {
    /// Recorded feed (one JSON action per line)
    pub journal: PathBuf,
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

pub(crate) fn stages_table(status: &StageStatusMap) -> Table {
    let mut table = Table::new(vec![
        Column::left("STAGE"),
        Column::right("ISSUES"),
        Column::right("ACTIVE"),
        Column::right("QUEUED"),
        Column::right("WORKERS"),
        Column::status("ENABLED"),
        Column::right("SESSION"),
    ]);
    for stage in Stage::ALL {
        let s = status.get(stage);
        table.row(vec![
            stage.name().to_string(),
            s.issue_count.to_string(),
            s.active_count.to_string(),
            s.queued_count.to_string(),
            s.worker_count.to_string(),
            on_off(s.enabled).to_string(),
            s.session_count.to_string(),
        ]);
    }
    table
}

pub(crate) fn workload_line(w: &Workload) -> String {
    format!(
        "Workload: {} workers, {} active, {} done, {} failed",
        w.total, w.active, w.done, w.failed
    )
}

pub fn handle(args: StagesArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let loaded = super::load(&args.journal, None, config)?;
    let status = loaded.store.state().stage_status();

    match format {
        OutputFormat::Json => print_json(&status)?,
        OutputFormat::Text => {
            let mut out = std::io::stdout();
            stages_table(&status).render(&mut out);
            writeln!(out)?;
            writeln!(out, "{}", workload_line(&status.workload))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "stages_tests.rs"]
mod tests;
