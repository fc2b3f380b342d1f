// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-stage aggregate counts and the overall workload summary.

use crate::counters::SessionCounters;
use crate::registry::{BackgroundWorker, PipelineIssue, WorkerEntry};
use crate::state::DashboardState;
use hydra_core::{LoadClass, Stage, WorkerKey};
use serde::Serialize;
use std::collections::BTreeMap;

const PIPELINE_ACTIVE: &str = "active";
const PIPELINE_QUEUED: &str = "queued";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageStatus {
    pub issue_count: usize,
    pub active_count: usize,
    pub queued_count: usize,
    /// Registry workers in this stage that are still running
    pub worker_count: usize,
    pub enabled: bool,
    pub session_count: u64,
}

/// Totals across every worker in the registry, whatever its stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Workload {
    pub total: usize,
    pub active: usize,
    pub done: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageStatusMap {
    pub stages: BTreeMap<Stage, StageStatus>,
    pub workload: Workload,
}

impl StageStatusMap {
    pub fn get(&self, stage: Stage) -> StageStatus {
        self.stages.get(&stage).copied().unwrap_or_default()
    }
}

fn stage_enabled(stage: Stage, background_workers: &[BackgroundWorker]) -> bool {
    let Some(name) = stage.background_worker() else {
        return true;
    };
    background_workers
        .iter()
        .find(|w| w.name == name)
        .map_or(true, |w| w.enabled)
}

pub fn derive_stage_status(
    pipeline_issues: &BTreeMap<Stage, Vec<PipelineIssue>>,
    workers: &BTreeMap<WorkerKey, WorkerEntry>,
    background_workers: &[BackgroundWorker],
    counters: &SessionCounters,
) -> StageStatusMap {
    let stages = Stage::ALL
        .into_iter()
        .map(|stage| {
            let issues = pipeline_issues.get(&stage).map(Vec::as_slice).unwrap_or(&[]);
            let count_status = |s: &str| issues.iter().filter(|i| i.status == s).count();
            let worker_count = match stage {
                Stage::Merged => 0,
                _ => workers
                    .values()
                    .filter(|w| w.role == stage && w.load_class() == LoadClass::Active)
                    .count(),
            };
            let status = StageStatus {
                issue_count: issues.len(),
                active_count: count_status(PIPELINE_ACTIVE),
                queued_count: count_status(PIPELINE_QUEUED),
                worker_count,
                enabled: stage_enabled(stage, background_workers),
                session_count: counters.for_stage(stage),
            };
            (stage, status)
        })
        .collect();

    let mut workload = Workload {
        total: workers.len(),
        ..Workload::default()
    };
    for entry in workers.values() {
        match entry.load_class() {
            LoadClass::Active => workload.active += 1,
            LoadClass::Done => workload.done += 1,
            LoadClass::Failed => workload.failed += 1,
            LoadClass::Queued => {}
        }
    }

    StageStatusMap { stages, workload }
}

impl DashboardState {
    pub fn stage_status(&self) -> StageStatusMap {
        derive_stage_status(
            &self.pipeline_issues,
            &self.workers,
            &self.background_workers,
            &self.counters,
        )
    }
}

#[cfg(test)]
#[path = "stage_status_tests.rs"]
mod tests;
