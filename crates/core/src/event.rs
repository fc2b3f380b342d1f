// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline event kinds and their payloads.

use crate::stage::{Stage, WorkerKey};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Payload shared by `triage_update` and `planner_update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<u64>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Payload of `worker_update` (implementer stage).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<u64>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Slot index of the implementer in the worker pool
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr: Option<u64>,
}

/// Payload of `review_update`. Reviews are keyed by PR number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<u64>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    /// Review wall time in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<u64>,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrCreated {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<u64>,
    pub url: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub draft: bool,
}

/// One line of agent output, routed to a stage by `source`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr: Option<u64>,
    pub source: String,
    pub line: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitlUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr: Option<u64>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundWorkerStatus {
    #[serde(alias = "worker")]
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(alias = "phase")]
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorStatus {
    pub status: String,
}

/// Events emitted by the pipeline backend.
///
/// Decoded from the envelope's `type` and `data`. A type that is not listed
/// here, or whose data does not fit its payload, becomes `Unknown`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TriageUpdate(IssueUpdate),
    PlannerUpdate(IssueUpdate),
    WorkerUpdate(WorkerUpdate),
    ReviewUpdate(ReviewUpdate),
    MergeUpdate(MergeUpdate),
    PrCreated(PrCreated),
    TranscriptLine(TranscriptLine),
    HitlUpdate(HitlUpdate),
    BackgroundWorkerStatus(BackgroundWorkerStatus),
    PhaseChange(PhaseChange),
    OrchestratorStatus(OrchestratorStatus),
    Unknown {
        kind: String,
        data: serde_json::Value,
    },
}

fn decode<T: DeserializeOwned>(kind: &str, data: &serde_json::Value) -> Option<T> {
    match T::deserialize(data) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::debug!(kind, error = %e, "event payload did not decode, keeping as unknown");
            None
        }
    }
}

impl Event {
    /// Build an event from its wire type name and data object.
    pub fn from_wire(kind: &str, data: serde_json::Value) -> Self {
        let decoded = match kind {
            "triage_update" => decode(kind, &data).map(Event::TriageUpdate),
            "planner_update" => decode(kind, &data).map(Event::PlannerUpdate),
            "worker_update" => decode(kind, &data).map(Event::WorkerUpdate),
            "review_update" => decode(kind, &data).map(Event::ReviewUpdate),
            "merge_update" => decode(kind, &data).map(Event::MergeUpdate),
            "pr_created" => decode(kind, &data).map(Event::PrCreated),
            "transcript_line" => decode(kind, &data).map(Event::TranscriptLine),
            "hitl_update" => decode(kind, &data).map(Event::HitlUpdate),
            "background_worker_status" => decode(kind, &data).map(Event::BackgroundWorkerStatus),
            "phase_change" => decode(kind, &data).map(Event::PhaseChange),
            "orchestrator_status" => decode(kind, &data).map(Event::OrchestratorStatus),
            _ => None,
        };
        decoded.unwrap_or_else(|| Event::Unknown {
            kind: kind.to_string(),
            data,
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            Event::TriageUpdate(_) => "triage_update",
            Event::PlannerUpdate(_) => "planner_update",
            Event::WorkerUpdate(_) => "worker_update",
            Event::ReviewUpdate(_) => "review_update",
            Event::MergeUpdate(_) => "merge_update",
            Event::PrCreated(_) => "pr_created",
            Event::TranscriptLine(_) => "transcript_line",
            Event::HitlUpdate(_) => "hitl_update",
            Event::BackgroundWorkerStatus(_) => "background_worker_status",
            Event::PhaseChange(_) => "phase_change",
            Event::OrchestratorStatus(_) => "orchestrator_status",
            Event::Unknown { kind, .. } => kind,
        }
    }

    /// The `data` object as it appears on the wire.
    pub fn data(&self) -> serde_json::Value {
        let encoded = match self {
            Event::TriageUpdate(p) | Event::PlannerUpdate(p) => serde_json::to_value(p),
            Event::WorkerUpdate(p) => serde_json::to_value(p),
            Event::ReviewUpdate(p) => serde_json::to_value(p),
            Event::MergeUpdate(p) => serde_json::to_value(p),
            Event::PrCreated(p) => serde_json::to_value(p),
            Event::TranscriptLine(p) => serde_json::to_value(p),
            Event::HitlUpdate(p) => serde_json::to_value(p),
            Event::BackgroundWorkerStatus(p) => serde_json::to_value(p),
            Event::PhaseChange(p) => serde_json::to_value(p),
            Event::OrchestratorStatus(p) => serde_json::to_value(p),
            Event::Unknown { data, .. } => return data.clone(),
        };
        encoded.unwrap_or_default()
    }

    /// Issue number the event is about, when it names one directly.
    pub fn issue(&self) -> Option<u64> {
        match self {
            Event::TriageUpdate(p) | Event::PlannerUpdate(p) => p.issue,
            Event::WorkerUpdate(p) => p.issue,
            Event::ReviewUpdate(p) => p.issue,
            Event::MergeUpdate(p) => p.issue,
            Event::PrCreated(p) => p.issue,
            Event::TranscriptLine(p) => p.issue,
            Event::HitlUpdate(p) => p.issue,
            _ => None,
        }
    }

    /// Registry key of the stage worker this event updates.
    ///
    /// `None` when the event is not a worker event or its subject is missing.
    pub fn worker_key(&self) -> Option<WorkerKey> {
        match self {
            Event::TriageUpdate(p) => p.issue.map(|n| WorkerKey::new(Stage::Triage, n)),
            Event::PlannerUpdate(p) => p.issue.map(|n| WorkerKey::new(Stage::Plan, n)),
            Event::WorkerUpdate(p) => p.issue.map(|n| WorkerKey::new(Stage::Implement, n)),
            Event::ReviewUpdate(p) => p.pr.map(|n| WorkerKey::new(Stage::Review, n)),
            Event::TranscriptLine(p) => match Stage::from_source(&p.source)? {
                Stage::Review => p.pr.map(|n| WorkerKey::new(Stage::Review, n)),
                Stage::Merged => None,
                stage => p.issue.map(|n| WorkerKey::new(stage, n)),
            },
            _ => None,
        }
    }

    pub fn log_summary(&self) -> String {
        let t = self.kind();
        let opt = |v: Option<u64>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
        match self {
            Event::TriageUpdate(p) | Event::PlannerUpdate(p) => {
                format!("{t} issue={} status={}", opt(p.issue), p.status)
            }
            Event::WorkerUpdate(p) => format!("{t} issue={} status={}", opt(p.issue), p.status),
            Event::ReviewUpdate(p) => {
                format!("{t} pr={} issue={} status={}", opt(p.pr), opt(p.issue), p.status)
            }
            Event::MergeUpdate(p) => format!("{t} pr={} status={}", opt(p.pr), p.status),
            Event::PrCreated(p) => format!("{t} pr={} issue={}", opt(p.pr), opt(p.issue)),
            Event::TranscriptLine(p) => match p.pr {
                Some(pr) => format!("{t} source={} pr={pr}", p.source),
                None => format!("{t} source={} issue={}", p.source, opt(p.issue)),
            },
            Event::HitlUpdate(p) => format!("{t} issue={} status={}", opt(p.issue), p.status),
            Event::BackgroundWorkerStatus(p) => {
                format!("{t} worker={} status={}", p.name, p.status)
            }
            Event::PhaseChange(p) => match &p.from {
                Some(from) => format!("{t} {from}->{}", p.to),
                None => format!("{t} ->{}", p.to),
            },
            Event::OrchestratorStatus(p) => format!("{t} status={}", p.status),
            Event::Unknown { .. } => t.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
