// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run completion counters.

use hydra_core::Stage;
use serde::{Deserialize, Serialize};

/// Counts of subjects that reached their terminal state during the current
/// run. Only a session reset lowers them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionCounters {
    pub triaged: u64,
    pub planned: u64,
    pub implemented: u64,
    pub reviewed: u64,
    pub merged: u64,
    pub prs: u64,
}

impl SessionCounters {
    pub fn for_stage(&self, stage: Stage) -> u64 {
        match stage {
            Stage::Triage => self.triaged,
            Stage::Plan => self.planned,
            Stage::Implement => self.implemented,
            Stage::Review => self.reviewed,
            Stage::Merged => self.merged,
        }
    }

    pub(crate) fn record(&mut self, stage: Stage) {
        let slot = match stage {
            Stage::Triage => &mut self.triaged,
            Stage::Plan => &mut self.planned,
            Stage::Implement => &mut self.implemented,
            Stage::Review => &mut self.reviewed,
            Stage::Merged => &mut self.merged,
        };
        *slot += 1;
    }

    pub(crate) fn record_pr(&mut self) {
        self.prs += 1;
    }
}
