// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hydra-state: the dashboard reducer, its projections, and persistence

mod action;
mod counters;
mod event_log;
mod journal;
mod registry;
mod snapshot;
mod stage_status;
mod state;
mod store;
mod timeline;

pub use action::{Action, Control};
pub use counters::SessionCounters;
pub use event_log::{EventLog, MAX_EVENTS};
pub use journal::{Journal, JournalError, JournalRead};
pub use registry::{
    BackgroundWorker, HitlItem, Intent, IntentStatus, Metrics, PipelineIssue, PullRequest,
    ReviewRecord, TranscriptEntry, WorkerEntry, MAX_TRANSCRIPT_LINES,
};
pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};
pub use stage_status::{derive_stage_status, StageStatus, StageStatusMap, Workload};
pub use state::{reduce, DashboardState};
pub use store::Store;
pub use timeline::{
    derive_issue_timelines, IssueTimeline, StageMap, StageRecord, StageState,
    TIMELINE_TRANSCRIPT_WINDOW,
};
