// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    BackgroundWorkerStatus, Event, EventEnvelope, EventId, HitlUpdate, IssueUpdate, MergeUpdate,
    OrchestratorStatus, PhaseChange, PrCreated, ReviewUpdate, Timestamp, TranscriptLine,
    WorkerUpdate,
};

// ── Timestamps ──────────────────────────────────────────────────────────────

/// Timestamp `secs` seconds after a fixed base instant.
pub fn ts(secs: i64) -> Timestamp {
    Timestamp::from_epoch_ms(1_767_225_600_000 + secs * 1000)
}

// ── Envelope wrappers ───────────────────────────────────────────────────────

/// Envelope with an id, stamped `id` seconds after the base instant.
pub fn with_id(id: u64, event: Event) -> EventEnvelope {
    EventEnvelope::new(Some(EventId(id)), ts(id as i64), event)
}

/// Envelope without an id at the given offset.
pub fn anonymous(secs: i64, event: Event) -> EventEnvelope {
    EventEnvelope::new(None, ts(secs), event)
}

pub fn at(id: u64, secs: i64, event: Event) -> EventEnvelope {
    EventEnvelope::new(Some(EventId(id)), ts(secs), event)
}

// ── Event factory functions ─────────────────────────────────────────────────

pub fn triage(issue: u64, status: &str) -> Event {
    Event::TriageUpdate(IssueUpdate {
        issue: Some(issue),
        status: status.to_string(),
        title: None,
    })
}

pub fn planner(issue: u64, status: &str) -> Event {
    Event::PlannerUpdate(IssueUpdate {
        issue: Some(issue),
        status: status.to_string(),
        title: None,
    })
}

pub fn worker(issue: u64, status: &str) -> Event {
    Event::WorkerUpdate(WorkerUpdate {
        issue: Some(issue),
        status: status.to_string(),
        branch: Some(format!("agent/issue-{issue}")),
        ..WorkerUpdate::default()
    })
}

pub fn review(pr: u64, issue: u64, status: &str) -> Event {
    Event::ReviewUpdate(ReviewUpdate {
        pr: Some(pr),
        issue: Some(issue),
        status: status.to_string(),
        ..ReviewUpdate::default()
    })
}

pub fn merge(pr: u64, issue: Option<u64>, status: &str) -> Event {
    Event::MergeUpdate(MergeUpdate {
        pr: Some(pr),
        issue,
        status: status.to_string(),
    })
}

pub fn pr_created(pr: u64, issue: u64) -> Event {
    Event::PrCreated(PrCreated {
        pr: Some(pr),
        issue: Some(issue),
        url: format!("https://example.test/pull/{pr}"),
        branch: format!("agent/issue-{issue}"),
        title: None,
        draft: false,
    })
}

pub fn transcript(source: &str, issue: Option<u64>, pr: Option<u64>, line: &str) -> Event {
    Event::TranscriptLine(TranscriptLine {
        issue,
        pr,
        source: source.to_string(),
        line: line.to_string(),
    })
}

pub fn hitl(issue: u64, status: &str) -> Event {
    Event::HitlUpdate(HitlUpdate {
        issue: Some(issue),
        pr: None,
        status: status.to_string(),
        cause: Some("needs a human".to_string()),
    })
}

pub fn background_worker(name: &str, status: &str) -> Event {
    Event::BackgroundWorkerStatus(BackgroundWorkerStatus {
        name: name.to_string(),
        status: status.to_string(),
        last_run: None,
        details: serde_json::Value::Null,
    })
}

pub fn phase(from: Option<&str>, to: &str) -> Event {
    Event::PhaseChange(PhaseChange {
        from: from.map(String::from),
        to: to.to_string(),
    })
}

pub fn orchestrator(status: &str) -> Event {
    Event::OrchestratorStatus(OrchestratorStatus {
        status: status.to_string(),
    })
}

pub fn unknown(kind: &str) -> Event {
    Event::Unknown {
        kind: kind.to_string(),
        data: serde_json::json!({}),
    }
}
