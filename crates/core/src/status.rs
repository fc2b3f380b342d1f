// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker status vocabulary.
//!
//! Statuses are stored verbatim as the backend sends them. Timelines read
//! them through [`StatusClass`]. Worker and workload counts use the literal
//! [`LoadClass`], where any status other than `queued`, `done` or `failed`
//! is in-progress work.

use serde::{Deserialize, Serialize};

pub const DONE: &str = "done";
pub const FAILED: &str = "failed";
pub const QUEUED: &str = "queued";
pub const ESCALATED: &str = "escalated";
pub const MERGED: &str = "merged";
pub const RESOLVED: &str = "resolved";

/// Coarse classification of a verbatim worker status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Queued,
    Active,
    Done,
    Failed,
    Hitl,
}

impl StatusClass {
    pub fn of(status: &str) -> Self {
        match status {
            "done" | "merged" | "success" | "completed" => StatusClass::Done,
            "failed" | "error" => StatusClass::Failed,
            "escalated" | "hitl" => StatusClass::Hitl,
            "" | "queued" | "pending" => StatusClass::Queued,
            _ => StatusClass::Active,
        }
    }

    pub fn is_active(self) -> bool {
        self == StatusClass::Active
    }
}

/// Literal bucket of a worker status for load counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadClass {
    Queued,
    Active,
    Done,
    Failed,
}

impl LoadClass {
    pub fn of(status: &str) -> Self {
        match status {
            DONE => LoadClass::Done,
            FAILED => LoadClass::Failed,
            QUEUED => LoadClass::Queued,
            _ => LoadClass::Active,
        }
    }
}

/// Whether this status is the terminal success that counts towards the
/// session counters.
pub fn is_done(status: &str) -> bool {
    status == DONE
}

/// Whether a merge status marks the PR as merged.
pub fn is_merged(status: &str) -> bool {
    matches!(status, MERGED | DONE)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
