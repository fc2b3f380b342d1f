// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entity records held by the dashboard state.

use hydra_core::{EventId, LoadClass, Stage, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound on transcript lines kept per worker entry
pub const MAX_TRANSCRIPT_LINES: usize = 500;

/// One transcript line with the id of the event that carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    pub line: String,
}

/// Status of one stage worker, keyed in the registry by [`hydra_core::WorkerKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerEntry {
    /// Verbatim status from the latest update
    pub status: String,
    pub role: Stage,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub transcript: Vec<TranscriptEntry>,
    #[serde(default)]
    pub pr: Option<u64>,
    /// Issue the worker is serving. For reviewers this is carried
    /// separately from the key, which holds the PR number.
    #[serde(default)]
    pub issue: Option<u64>,
    /// Set once this worker's completion has been counted for the session
    #[serde(default)]
    pub counted: bool,
}

impl WorkerEntry {
    pub fn load_class(&self) -> LoadClass {
        LoadClass::of(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub pr: u64,
    #[serde(default)]
    pub issue: Option<u64>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub merged: bool,
}

/// Completed review of a PR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub pr: u64,
    #[serde(default)]
    pub issue: Option<u64>,
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// An issue parked for human intervention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitlItem {
    pub issue: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pr: Option<u64>,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub status: String,
}

fn enabled_default() -> bool {
    true
}

/// Health of one long-running background loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundWorker {
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    #[serde(default)]
    pub last_run: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

/// Lifetime statistics and rate summaries reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub lifetime: BTreeMap<String, u64>,
    pub rates: BTreeMap<String, f64>,
}

/// An issue as classified by the backend's pipeline query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineIssue {
    pub issue: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentStatus {
    /// Submitted, no pipeline event seen yet
    #[default]
    Pending,
    /// A stage event for the intent's issue has arrived
    Active,
}

/// A request typed into the dashboard that has not entered the pipeline yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub text: String,
    #[serde(default)]
    pub issue: Option<u64>,
    #[serde(default)]
    pub status: IntentStatus,
    #[serde(default)]
    pub submitted_at: Option<Timestamp>,
}
