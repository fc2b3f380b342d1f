// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inputs to the reducer: live stream envelopes and locally synthesized
//! control messages.

use crate::registry::{BackgroundWorker, HitlItem, Metrics, PipelineIssue, PullRequest};
use hydra_core::{EventEnvelope, Stage, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Messages built from REST responses or connection-state changes rather
/// than received on the event stream.
///
/// Serializes as `{"type": "EXISTING_PRS", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Control {
    /// Full snapshot of open PRs; replaces the PR registry
    #[serde(rename = "EXISTING_PRS")]
    ExistingPrs(Vec<PullRequest>),

    #[serde(rename = "BACKFILL_EVENTS")]
    BackfillEvents(Vec<EventEnvelope>),

    #[serde(rename = "BACKGROUND_WORKERS")]
    BackgroundWorkers(Vec<BackgroundWorker>),

    #[serde(rename = "METRICS")]
    Metrics(Metrics),

    #[serde(rename = "HITL_ITEMS")]
    HitlItems(Vec<HitlItem>),

    /// Open questions for a human, keyed by issue number
    #[serde(
        rename = "HUMAN_INPUT_REQUESTS",
        deserialize_with = "deserialize_issue_map"
    )]
    HumanInputRequests(BTreeMap<u64, String>),

    #[serde(rename = "HUMAN_INPUT_SUBMITTED")]
    HumanInputSubmitted { issue: u64 },

    #[serde(rename = "INTENT_SUBMITTED")]
    IntentSubmitted {
        text: String,
        #[serde(default)]
        issue: Option<u64>,
        #[serde(default)]
        timestamp: Option<Timestamp>,
    },

    /// Per-stage issue lists as classified by the backend
    #[serde(rename = "PIPELINE_SNAPSHOT")]
    PipelineSnapshot(BTreeMap<Stage, Vec<PipelineIssue>>),

    #[serde(rename = "CONNECTED")]
    Connected,

    #[serde(rename = "DISCONNECTED")]
    Disconnected,
}

/// JSON object keys are strings; parse them back into issue numbers.
fn deserialize_issue_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<u64, String>, D::Error> {
    BTreeMap::<String, String>::deserialize(deserializer)?
        .into_iter()
        .map(|(issue, question)| {
            issue
                .trim()
                .parse::<u64>()
                .map(|n| (n, question))
                .map_err(|_| serde::de::Error::custom(format!("invalid issue number {issue:?}")))
        })
        .collect()
}

impl Control {
    pub const KINDS: [&'static str; 11] = [
        "EXISTING_PRS",
        "BACKFILL_EVENTS",
        "BACKGROUND_WORKERS",
        "METRICS",
        "HITL_ITEMS",
        "HUMAN_INPUT_REQUESTS",
        "HUMAN_INPUT_SUBMITTED",
        "INTENT_SUBMITTED",
        "PIPELINE_SNAPSHOT",
        "CONNECTED",
        "DISCONNECTED",
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            Control::ExistingPrs(_) => "EXISTING_PRS",
            Control::BackfillEvents(_) => "BACKFILL_EVENTS",
            Control::BackgroundWorkers(_) => "BACKGROUND_WORKERS",
            Control::Metrics(_) => "METRICS",
            Control::HitlItems(_) => "HITL_ITEMS",
            Control::HumanInputRequests(_) => "HUMAN_INPUT_REQUESTS",
            Control::HumanInputSubmitted { .. } => "HUMAN_INPUT_SUBMITTED",
            Control::IntentSubmitted { .. } => "INTENT_SUBMITTED",
            Control::PipelineSnapshot(_) => "PIPELINE_SNAPSHOT",
            Control::Connected => "CONNECTED",
            Control::Disconnected => "DISCONNECTED",
        }
    }

    pub fn log_summary(&self) -> String {
        let t = self.kind();
        match self {
            Control::ExistingPrs(prs) => format!("{t} prs={}", prs.len()),
            Control::BackfillEvents(events) => format!("{t} events={}", events.len()),
            Control::BackgroundWorkers(workers) => format!("{t} workers={}", workers.len()),
            Control::HitlItems(items) => format!("{t} items={}", items.len()),
            Control::HumanInputRequests(requests) => format!("{t} requests={}", requests.len()),
            Control::HumanInputSubmitted { issue } => format!("{t} issue={issue}"),
            Control::IntentSubmitted { issue: Some(n), .. } => format!("{t} issue={n}"),
            Control::PipelineSnapshot(stages) => {
                let issues: usize = stages.values().map(Vec::len).sum();
                format!("{t} issues={issues}")
            }
            Control::Metrics(_)
            | Control::IntentSubmitted { .. }
            | Control::Connected
            | Control::Disconnected => t.to_string(),
        }
    }
}

/// Everything the reducer accepts, through one entry point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Action {
    Event(EventEnvelope),
    Control(Control),
}

impl Action {
    pub fn log_summary(&self) -> String {
        match self {
            Action::Event(envelope) => envelope.log_summary(),
            Action::Control(control) => control.log_summary(),
        }
    }
}

impl From<EventEnvelope> for Action {
    fn from(envelope: EventEnvelope) -> Self {
        Action::Event(envelope)
    }
}

impl From<Control> for Action {
    fn from(control: Control) -> Self {
        Action::Control(control)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_control = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|kind| Control::KINDS.contains(&kind));
        if is_control {
            Control::deserialize(value)
                .map(Action::Control)
                .map_err(serde::de::Error::custom)
        } else {
            EventEnvelope::deserialize(value)
                .map(Action::Event)
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
