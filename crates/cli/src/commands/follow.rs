// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hydra follow` - tail a growing journal as a live feed

use anyhow::{Context, Result};
use clap::Args;
use hydra_core::Stage;
use hydra_state::{Action, DashboardState, Journal, StageStatusMap, Store};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use crate::color;
use crate::config::Config;
use crate::output::{print_json_line, OutputFormat};
use crate::poll::{parse_duration, Poller, Tick};

#[derive(Args)]
pub struct FollowArgs {
    /// Recorded feed (one JSON action per line)
    pub journal: PathBuf,

    /// Stop after this long (e.g. 1500ms, 30s, 5m)
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,
}

/// Incremental reader that keeps a store in step with the journal.
pub(crate) struct Follower {
    journal: Journal,
    store: Store,
    offset: u64,
    config: Config,
}

impl Follower {
    /// Replay everything already in the journal.
    pub(crate) fn start(path: PathBuf, config: &Config) -> Result<Self> {
        let loaded = super::load(&path, None, config)?;
        Ok(Self {
            journal: Journal::new(path),
            store: loaded.store,
            offset: loaded.offset,
            config: config.clone(),
        })
    }

    pub(crate) fn state(&self) -> &DashboardState {
        self.store.state()
    }

    /// Apply lines appended since the last poll and return them.
    ///
    /// A journal that shrank was rewritten, so the state is rebuilt from
    /// its first line. A journal that vanished yields nothing until it
    /// comes back.
    pub(crate) fn poll(&mut self) -> Result<Vec<Action>> {
        let len = match std::fs::metadata(self.journal.path()) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to stat {}", self.journal.path().display())
                })
            }
        };
        if len < self.offset {
            tracing::warn!(
                path = %self.journal.path().display(),
                offset = self.offset,
                len,
                "journal shrank, replaying from the start",
            );
            self.store = Store::new(self.config.new_state());
            self.offset = 0;
        }
        if len == self.offset {
            return Ok(Vec::new());
        }

        let read = self.journal.read_from(self.offset)?;
        self.offset = read.offset;
        self.store.dispatch_all(&read.actions);
        Ok(read.actions)
    }
}

/// One-line view of the pipeline: live workers and session completions
/// per stage.
pub(crate) fn stage_line(status: &StageStatusMap) -> String {
    let parts: Vec<String> = Stage::ALL
        .into_iter()
        .map(|stage| {
            let s = status.get(stage);
            format!("{} {}/{}", stage.name(), s.worker_count, s.session_count)
        })
        .collect();
    format!("live/session  {}", parts.join("  "))
}

pub async fn handle(args: FollowArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let mut follower = Follower::start(args.journal, config)?;
    let mut poller = Poller::new(config.follow_poll()).with_timeout(args.timeout);

    if format == OutputFormat::Text {
        println!("{}", color::muted(&stage_line(&follower.state().stage_status())));
    }

    loop {
        match poller.tick().await {
            Tick::Ready => {}
            Tick::Timeout => {
                tracing::debug!(ticks = poller.ticks(), "follow timed out");
                break;
            }
            Tick::Interrupted => break,
        }

        let actions = follower.poll()?;
        if actions.is_empty() {
            continue;
        }
        for action in &actions {
            match format {
                OutputFormat::Json => print_json_line(action)?,
                OutputFormat::Text => println!("{}", action.log_summary()),
            }
        }
        if format == OutputFormat::Text {
            println!("{}", color::muted(&stage_line(&follower.state().stage_status())));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "follow_tests.rs"]
mod tests;
