// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hydra-core: wire types for the pipeline dashboard event feed

pub mod envelope;
pub mod event;
pub mod stage;
pub mod status;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use envelope::{EventEnvelope, EventId, EventIdentity, Timestamp};
pub use event::{
    BackgroundWorkerStatus, Event, HitlUpdate, IssueUpdate, MergeUpdate, OrchestratorStatus,
    PhaseChange, PrCreated, ReviewUpdate, TranscriptLine, WorkerUpdate,
};
pub use stage::{ParseWorkerKeyError, Stage, WorkerKey};
pub use status::{LoadClass, StatusClass};
pub use time_fmt::{format_elapsed, format_span};
