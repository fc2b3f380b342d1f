// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline stages and the typed key of a stage worker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One phase of the issue pipeline, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Triage,
    Plan,
    Implement,
    Review,
    Merged,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Triage,
        Stage::Plan,
        Stage::Implement,
        Stage::Review,
        Stage::Merged,
    ];

    /// Stages that run a worker. `Merged` has no actor of its own.
    pub const WORKER_STAGES: [Stage; 4] =
        [Stage::Triage, Stage::Plan, Stage::Implement, Stage::Review];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Triage => "triage",
            Stage::Plan => "plan",
            Stage::Implement => "implement",
            Stage::Review => "review",
            Stage::Merged => "merged",
        }
    }

    /// Name of the background loop that drives this stage.
    pub fn background_worker(self) -> Option<&'static str> {
        match self {
            Stage::Merged => None,
            stage => Some(stage.name()),
        }
    }

    /// Map a transcript `source` discriminator to its stage.
    pub fn from_source(source: &str) -> Option<Stage> {
        match source {
            "triage" | "triager" => Some(Stage::Triage),
            "plan" | "planner" => Some(Stage::Plan),
            "implement" | "implementer" | "worker" | "agent" => Some(Stage::Implement),
            "review" | "reviewer" => Some(Stage::Review),
            "merge" | "merged" => Some(Stage::Merged),
            _ => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid worker key: {0:?}")]
pub struct ParseWorkerKeyError(pub String);

/// Registry key of one stage worker: the stage plus its subject, which is
/// the issue number for triage/plan/implement and the PR number for review.
///
/// Serialized in the legacy composite form (`triage-5`, `plan-5`, `5`,
/// `review-30`, `merge-30`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerKey {
    pub stage: Stage,
    pub subject: u64,
}

impl WorkerKey {
    pub fn new(stage: Stage, subject: u64) -> Self {
        Self { stage, subject }
    }
}

impl fmt::Display for WorkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Stage::Triage => write!(f, "triage-{}", self.subject),
            Stage::Plan => write!(f, "plan-{}", self.subject),
            Stage::Implement => write!(f, "{}", self.subject),
            Stage::Review => write!(f, "review-{}", self.subject),
            Stage::Merged => write!(f, "merge-{}", self.subject),
        }
    }
}

impl FromStr for WorkerKey {
    type Err = ParseWorkerKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stage, subject) = match s.split_once('-') {
            Some(("triage", n)) => (Stage::Triage, n),
            Some(("plan", n)) => (Stage::Plan, n),
            Some(("review", n)) => (Stage::Review, n),
            Some(("merge", n)) => (Stage::Merged, n),
            Some(_) => return Err(ParseWorkerKeyError(s.to_string())),
            None => (Stage::Implement, s),
        };
        subject
            .parse::<u64>()
            .map(|n| WorkerKey::new(stage, n))
            .map_err(|_| ParseWorkerKeyError(s.to_string()))
    }
}

impl Serialize for WorkerKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WorkerKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
