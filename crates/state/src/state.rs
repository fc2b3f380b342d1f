// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dashboard state reconstructed from the event feed

use crate::action::{Action, Control};
use crate::counters::SessionCounters;
use crate::event_log::EventLog;
use crate::registry::{
    BackgroundWorker, HitlItem, Intent, IntentStatus, Metrics, PipelineIssue, PullRequest,
    ReviewRecord, TranscriptEntry, WorkerEntry, MAX_TRANSCRIPT_LINES,
};
use hydra_core::status::{self, DONE};
use hydra_core::{
    BackgroundWorkerStatus, Event, EventEnvelope, EventId, MergeUpdate, OrchestratorStatus,
    PhaseChange, PrCreated, ReviewUpdate, Stage, TranscriptLine, WorkerKey,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, trace};

/// Phase that opens a new run when entered from an idle or finished one
const FIRST_ACTIVE_PHASE: &str = "plan";

/// Fields carried into a replaced worker entry
struct WorkerFields {
    status: String,
    title: String,
    branch: String,
    pr: Option<u64>,
    issue: Option<u64>,
}

fn is_rest_phase(phase: &str) -> bool {
    matches!(phase, "" | "idle" | "done")
}

fn is_stopped_status(status: &str) -> bool {
    matches!(status, "idle" | "done" | "stopping")
}

/// Everything the dashboard knows, rebuilt one action at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardState {
    pub events: EventLog,
    /// Highest event id processed; `None` sorts below every id
    pub last_seen_id: Option<EventId>,
    pub connected: bool,
    pub phase: String,
    pub orchestrator_status: String,
    pub workers: BTreeMap<WorkerKey, WorkerEntry>,
    pub prs: Vec<PullRequest>,
    pub reviews: Vec<ReviewRecord>,
    pub hitl_items: Vec<HitlItem>,
    pub human_input_requests: BTreeMap<u64, String>,
    pub background_workers: Vec<BackgroundWorker>,
    pub metrics: Option<Metrics>,
    pub intents: Vec<Intent>,
    pub pipeline_issues: BTreeMap<Stage, Vec<PipelineIssue>>,
    pub counters: SessionCounters,
    pub max_transcript_lines: usize,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            events: EventLog::default(),
            last_seen_id: None,
            connected: false,
            phase: "idle".to_string(),
            orchestrator_status: "idle".to_string(),
            workers: BTreeMap::new(),
            prs: Vec::new(),
            reviews: Vec::new(),
            hitl_items: Vec::new(),
            human_input_requests: BTreeMap::new(),
            background_workers: Vec::new(),
            metrics: None,
            intents: Vec::new(),
            pipeline_issues: BTreeMap::new(),
            counters: SessionCounters::default(),
            max_transcript_lines: MAX_TRANSCRIPT_LINES,
        }
    }
}

/// Pure transition: the state after applying `action` to `state`.
pub fn reduce(state: &DashboardState, action: &Action) -> DashboardState {
    let mut next = state.clone();
    next.apply(action);
    next
}

impl DashboardState {
    /// Empty state with custom bounds on the event log and transcripts.
    pub fn with_limits(max_events: usize, max_transcript_lines: usize) -> Self {
        Self {
            events: EventLog::bounded(max_events),
            max_transcript_lines,
            ..Self::default()
        }
    }

    /// Re-bound a restored state, trimming the log and transcripts to fit.
    pub fn set_limits(&mut self, max_events: usize, max_transcript_lines: usize) {
        self.events.set_capacity(max_events);
        self.max_transcript_lines = max_transcript_lines;
        for entry in self.workers.values_mut() {
            let excess = entry.transcript.len().saturating_sub(max_transcript_lines);
            entry.transcript.drain(..excess);
        }
    }

    pub fn pull_request(&self, pr: u64) -> Option<&PullRequest> {
        self.prs.iter().find(|p| p.pr == pr)
    }

    /// Issue a PR belongs to, from the PR registry or its reviewer entry.
    pub fn issue_for_pr(&self, pr: u64) -> Option<u64> {
        self.pull_request(pr)
            .and_then(|p| p.issue)
            .or_else(|| {
                self.workers
                    .get(&WorkerKey::new(Stage::Review, pr))
                    .and_then(|w| w.issue)
            })
    }

    /// Apply one action in place.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Event(envelope) => self.apply_envelope(envelope),
            Action::Control(control) => self.apply_control(control),
        }
    }

    fn apply_envelope(&mut self, envelope: &EventEnvelope) {
        if let Some(id) = envelope.id {
            if self.last_seen_id.is_some_and(|last| id <= last) {
                trace!(id = %id, kind = envelope.event.kind(), "skipping replayed event");
                return;
            }
            self.last_seen_id = Some(id);
        }
        debug!("apply {}", envelope.log_summary());
        // A live copy of a backfilled event is processed but logged once
        if envelope.id.is_some() && self.events.contains(envelope) {
            trace!(kind = envelope.event.kind(), "event already logged by backfill");
        } else {
            self.events.push(envelope.clone());
        }
        self.apply_event(envelope);
    }

    fn apply_event(&mut self, envelope: &EventEnvelope) {
        match &envelope.event {
            Event::TriageUpdate(p) | Event::PlannerUpdate(p) => {
                let Some(key) = envelope.event.worker_key() else {
                    return;
                };
                self.upsert_worker(
                    key,
                    WorkerFields {
                        status: p.status.clone(),
                        title: p.title.clone().unwrap_or_else(|| issue_title(key.subject)),
                        branch: String::new(),
                        pr: None,
                        issue: p.issue,
                    },
                );
            }
            Event::WorkerUpdate(p) => {
                let Some(key) = envelope.event.worker_key() else {
                    return;
                };
                self.upsert_worker(
                    key,
                    WorkerFields {
                        status: p.status.clone(),
                        title: p.title.clone().unwrap_or_else(|| issue_title(key.subject)),
                        branch: p.branch.clone().unwrap_or_default(),
                        pr: p.pr,
                        issue: p.issue,
                    },
                );
            }
            Event::ReviewUpdate(p) => self.apply_review(p),
            Event::MergeUpdate(p) => self.apply_merge(p),
            Event::PrCreated(p) => self.apply_pr_created(p),
            Event::TranscriptLine(p) => self.apply_transcript(envelope, p),
            Event::BackgroundWorkerStatus(p) => self.apply_background_status(envelope, p),
            Event::PhaseChange(p) => self.apply_phase_change(p),
            Event::OrchestratorStatus(p) => self.apply_orchestrator_status(p),
            // Logged only
            Event::HitlUpdate(_) | Event::Unknown { .. } => {}
        }
    }

    /// Replace a worker entry wholesale, carrying over its transcript and
    /// counted flag, and count a first completion.
    fn upsert_worker(&mut self, key: WorkerKey, fields: WorkerFields) {
        let (transcript, mut counted) = match self.workers.remove(&key) {
            Some(prev) => (prev.transcript, prev.counted),
            None => (Vec::new(), false),
        };
        if status::is_done(&fields.status) && !counted {
            self.counters.record(key.stage);
            counted = true;
        }
        if let Some(issue) = fields.issue {
            self.activate_intent(issue);
        }
        self.workers.insert(
            key,
            WorkerEntry {
                status: fields.status,
                role: key.stage,
                title: fields.title,
                branch: fields.branch,
                transcript,
                pr: fields.pr,
                issue: fields.issue,
                counted,
            },
        );
    }

    fn apply_review(&mut self, p: &ReviewUpdate) {
        let Some(pr) = p.pr else {
            return;
        };
        let issue = p.issue.or_else(|| self.issue_for_pr(pr));
        self.upsert_worker(
            WorkerKey::new(Stage::Review, pr),
            WorkerFields {
                status: p.status.clone(),
                title: p.title.clone().unwrap_or_else(|| format!("PR #{pr}")),
                branch: p.branch.clone().unwrap_or_default(),
                pr: Some(pr),
                issue,
            },
        );
        if status::is_done(&p.status) {
            let record = ReviewRecord {
                pr,
                issue,
                verdict: p.verdict.clone().unwrap_or_default(),
                duration: p.duration,
            };
            match self.reviews.iter_mut().find(|r| r.pr == pr) {
                Some(existing) => *existing = record,
                None => self.reviews.push(record),
            }
        }
    }

    fn apply_merge(&mut self, p: &MergeUpdate) {
        let Some(pr) = p.pr else {
            return;
        };
        if !status::is_merged(&p.status) {
            return;
        }
        match self.prs.iter_mut().find(|existing| existing.pr == pr) {
            Some(existing) if existing.merged => {}
            Some(existing) => {
                existing.merged = true;
                if existing.issue.is_none() {
                    existing.issue = p.issue;
                }
                self.counters.record(Stage::Merged);
            }
            None => {
                self.prs.push(PullRequest {
                    pr,
                    issue: p.issue,
                    url: String::new(),
                    branch: String::new(),
                    title: String::new(),
                    draft: false,
                    merged: true,
                });
                self.counters.record(Stage::Merged);
            }
        }
    }

    fn apply_pr_created(&mut self, p: &PrCreated) {
        let Some(pr) = p.pr else {
            return;
        };
        if self.pull_request(pr).is_some() {
            return;
        }
        self.prs.push(PullRequest {
            pr,
            issue: p.issue,
            url: p.url.clone(),
            branch: p.branch.clone(),
            title: p.title.clone().unwrap_or_default(),
            draft: p.draft,
            merged: false,
        });
        self.counters.record_pr();
    }

    fn apply_transcript(&mut self, envelope: &EventEnvelope, p: &TranscriptLine) {
        let Some(key) = envelope.event.worker_key() else {
            return;
        };
        let limit = self.max_transcript_lines;
        let Some(entry) = self.workers.get_mut(&key) else {
            trace!(key = %key, "transcript line for unknown worker");
            return;
        };
        if envelope.id.is_some() && entry.transcript.iter().any(|l| l.id == envelope.id) {
            return;
        }
        entry.transcript.push(TranscriptEntry {
            id: envelope.id,
            line: p.line.clone(),
        });
        if entry.transcript.len() > limit {
            let excess = entry.transcript.len() - limit;
            entry.transcript.drain(..excess);
        }
    }

    fn apply_background_status(&mut self, envelope: &EventEnvelope, p: &BackgroundWorkerStatus) {
        if p.name.is_empty() {
            return;
        }
        let last_run = p
            .last_run
            .clone()
            .or_else(|| Some(envelope.timestamp.to_string()));
        match self.background_workers.iter_mut().find(|w| w.name == p.name) {
            Some(existing) => {
                existing.status = p.status.clone();
                existing.last_run = last_run;
                existing.details = p.details.clone();
            }
            None => self.background_workers.push(BackgroundWorker {
                name: p.name.clone(),
                status: p.status.clone(),
                enabled: true,
                last_run,
                details: p.details.clone(),
            }),
        }
    }

    fn apply_phase_change(&mut self, p: &PhaseChange) {
        let from = p.from.as_deref().unwrap_or(&self.phase);
        if is_rest_phase(from) && p.to == FIRST_ACTIVE_PHASE {
            debug!(from, to = %p.to, "new run, resetting session state");
            self.reset_session();
        }
        self.phase = p.to.clone();
    }

    fn apply_orchestrator_status(&mut self, p: &OrchestratorStatus) {
        let previous = std::mem::replace(&mut self.orchestrator_status, p.status.clone());
        if previous == p.status {
            return;
        }
        if is_stopped_status(&p.status) {
            self.workers.clear();
            self.counters = SessionCounters::default();
        } else if p.status == "running" && matches!(previous.as_str(), "idle" | DONE) {
            self.workers.clear();
            self.counters = SessionCounters::default();
            self.clear_work_lists();
        }
    }

    fn clear_work_lists(&mut self) {
        self.prs.clear();
        self.reviews.clear();
        self.hitl_items.clear();
    }

    /// Drop everything scoped to one run. Background worker health and
    /// lifetime metrics belong to the process and survive.
    fn reset_session(&mut self) {
        self.workers.clear();
        self.clear_work_lists();
        self.counters = SessionCounters::default();
        self.last_seen_id = None;
    }

    fn activate_intent(&mut self, issue: u64) {
        for intent in &mut self.intents {
            if intent.issue == Some(issue) {
                intent.status = IntentStatus::Active;
            }
        }
    }

    fn apply_control(&mut self, control: &Control) {
        debug!("apply {}", control.log_summary());
        match control {
            Control::ExistingPrs(prs) => {
                let mut seen = HashSet::new();
                self.prs = prs.iter().filter(|p| seen.insert(p.pr)).cloned().collect();
            }
            Control::BackfillEvents(batch) => {
                let added = self.events.merge_backfill(batch);
                debug!(added, total = self.events.len(), "merged backfill");
            }
            Control::BackgroundWorkers(workers) => self.background_workers = workers.clone(),
            Control::Metrics(metrics) => self.metrics = Some(metrics.clone()),
            Control::HitlItems(items) => self.hitl_items = items.clone(),
            Control::HumanInputRequests(requests) => self.human_input_requests = requests.clone(),
            Control::HumanInputSubmitted { issue } => {
                self.human_input_requests.remove(issue);
            }
            Control::IntentSubmitted {
                text,
                issue,
                timestamp,
            } => {
                let intent = Intent {
                    text: text.clone(),
                    issue: *issue,
                    status: IntentStatus::Pending,
                    submitted_at: timestamp.clone(),
                };
                match self
                    .intents
                    .iter_mut()
                    .find(|i| issue.is_some() && i.issue == *issue)
                {
                    Some(existing) => *existing = intent,
                    None => self.intents.push(intent),
                }
            }
            Control::PipelineSnapshot(stages) => self.pipeline_issues = stages.clone(),
            Control::Connected => self.connected = true,
            Control::Disconnected => self.connected = false,
        }
    }
}

fn issue_title(issue: u64) -> String {
    format!("Issue #{issue}")
}

#[cfg(test)]
#[path = "state_tests/mod.rs"]
mod tests;
