// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-issue lifecycle timelines projected from the event log and the live
//! worker registry.
//!
//! The projection is rebuilt from scratch on every call. The log supplies
//! history and timing; the registry supplies in-flight status for work whose
//! events have not reached (or have already fallen out of) the log.

use crate::registry::{PullRequest, TranscriptEntry, WorkerEntry};
use crate::state::DashboardState;
use hydra_core::status::{self, RESOLVED};
use hydra_core::{Event, EventEnvelope, Stage, StatusClass, Timestamp, WorkerKey};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Transcript lines kept per stage in a timeline
pub const TIMELINE_TRANSCRIPT_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageState {
    #[default]
    Pending,
    Active,
    Done,
    Failed,
    Hitl,
}

impl StageState {
    pub fn from_status(status: &str) -> Self {
        match StatusClass::of(status) {
            StatusClass::Queued => StageState::Pending,
            StatusClass::Active => StageState::Active,
            StatusClass::Done => StageState::Done,
            StatusClass::Failed => StageState::Failed,
            StatusClass::Hitl => StageState::Hitl,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StageState::Pending => "pending",
            StageState::Active => "active",
            StageState::Done => "done",
            StageState::Failed => "failed",
            StageState::Hitl => "hitl",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, StageState::Done | StageState::Failed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StageRecord {
    pub status: StageState,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub transcript: Vec<TranscriptEntry>,
}

impl StageRecord {
    fn advance(&mut self, state: StageState, at: &Timestamp) {
        if state != StageState::Pending && self.start_time.is_none() {
            self.start_time = Some(at.clone());
        }
        self.end_time = state.is_terminal().then(|| at.clone());
        self.status = state;
    }

    /// Move to `state` from a source that carries no timestamp of its own,
    /// stamping with the issue's latest event time when there is one.
    fn settle(&mut self, state: StageState, latest: Option<&Timestamp>) {
        if state == self.status {
            return;
        }
        match latest {
            Some(at) => self.advance(state, at),
            None => self.status = state,
        }
    }

    fn push_line(&mut self, entry: TranscriptEntry) {
        if entry.id.is_some() && self.transcript.iter().any(|l| l.id == entry.id) {
            return;
        }
        self.transcript.push(entry);
        if self.transcript.len() > TIMELINE_TRANSCRIPT_WINDOW {
            let excess = self.transcript.len() - TIMELINE_TRANSCRIPT_WINDOW;
            self.transcript.drain(..excess);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StageMap {
    pub triage: StageRecord,
    pub plan: StageRecord,
    pub implement: StageRecord,
    pub review: StageRecord,
    pub merged: StageRecord,
}

impl StageMap {
    pub fn get(&self, stage: Stage) -> &StageRecord {
        match stage {
            Stage::Triage => &self.triage,
            Stage::Plan => &self.plan,
            Stage::Implement => &self.implement,
            Stage::Review => &self.review,
            Stage::Merged => &self.merged,
        }
    }

    pub fn get_mut(&mut self, stage: Stage) -> &mut StageRecord {
        match stage {
            Stage::Triage => &mut self.triage,
            Stage::Plan => &mut self.plan,
            Stage::Implement => &mut self.implement,
            Stage::Review => &mut self.review,
            Stage::Merged => &mut self.merged,
        }
    }

    /// Furthest stage along the pipeline that has left `pending`.
    pub fn most_advanced(&self) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .rev()
            .find(|s| self.get(*s).status != StageState::Pending)
    }

    fn any(&self, state: StageState) -> bool {
        Stage::ALL.into_iter().any(|s| self.get(s).status == state)
    }
}

/// Lifecycle view of one issue across all five stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueTimeline {
    pub issue: u64,
    pub title: Option<String>,
    pub branch: Option<String>,
    pub pr: Option<u64>,
    /// Earliest event timestamp seen for this issue
    pub start_time: Option<Timestamp>,
    pub current_stage: Option<Stage>,
    pub overall_status: StageState,
    pub stages: StageMap,
}

impl IssueTimeline {
    fn new(issue: u64) -> Self {
        Self {
            issue,
            ..Self::default()
        }
    }

    fn touch(&mut self, at: &Timestamp) {
        if self.start_time.as_ref().map_or(true, |t| at < t) {
            self.start_time = Some(at.clone());
        }
    }

    fn finish(&mut self) {
        self.current_stage = self.stages.most_advanced();
        self.overall_status = if self.stages.any(StageState::Failed) {
            StageState::Failed
        } else if self.stages.any(StageState::Hitl) {
            StageState::Hitl
        } else if self.stages.merged.status == StageState::Done {
            StageState::Done
        } else if self.current_stage.is_some() {
            StageState::Active
        } else {
            StageState::Pending
        };
    }
}

/// PR number to issue number, from every source that carries both.
fn pr_issue_index(
    events: &[&EventEnvelope],
    workers: &BTreeMap<WorkerKey, WorkerEntry>,
    prs: &[PullRequest],
) -> HashMap<u64, u64> {
    let mut index = HashMap::new();
    for envelope in events {
        let pair = match &envelope.event {
            Event::PrCreated(p) => p.pr.zip(p.issue),
            Event::ReviewUpdate(p) => p.pr.zip(p.issue),
            Event::MergeUpdate(p) => p.pr.zip(p.issue),
            Event::WorkerUpdate(p) => p.pr.zip(p.issue),
            _ => None,
        };
        if let Some((pr, issue)) = pair {
            index.insert(pr, issue);
        }
    }
    for (key, entry) in workers {
        if let (Stage::Review, Some(issue)) = (key.stage, entry.issue) {
            index.insert(key.subject, issue);
        }
    }
    for pr in prs {
        if let Some(issue) = pr.issue {
            index.insert(pr.pr, issue);
        }
    }
    index
}

struct Folder {
    issues: BTreeMap<u64, IssueTimeline>,
    pr_issue: HashMap<u64, u64>,
    /// Newest event timestamp per issue
    latest: HashMap<u64, Timestamp>,
}

impl Folder {
    fn issue_of(&self, issue: Option<u64>, pr: Option<u64>) -> Option<u64> {
        issue.or_else(|| pr.and_then(|n| self.pr_issue.get(&n).copied()))
    }

    fn timeline(&mut self, issue: u64, at: &Timestamp) -> &mut IssueTimeline {
        let latest = self.latest.entry(issue).or_insert_with(|| at.clone());
        if *at > *latest {
            *latest = at.clone();
        }
        let timeline = self
            .issues
            .entry(issue)
            .or_insert_with(|| IssueTimeline::new(issue));
        timeline.touch(at);
        timeline
    }

    fn fold(&mut self, envelope: &EventEnvelope) {
        let at = &envelope.timestamp;
        match &envelope.event {
            Event::TriageUpdate(p) | Event::PlannerUpdate(p) => {
                let Some(issue) = p.issue else { return };
                let stage = match envelope.event {
                    Event::TriageUpdate(_) => Stage::Triage,
                    _ => Stage::Plan,
                };
                let timeline = self.timeline(issue, at);
                if timeline.title.is_none() {
                    timeline.title.clone_from(&p.title);
                }
                timeline
                    .stages
                    .get_mut(stage)
                    .advance(StageState::from_status(&p.status), at);
            }
            Event::WorkerUpdate(p) => {
                let Some(issue) = p.issue else { return };
                let timeline = self.timeline(issue, at);
                if p.branch.is_some() {
                    timeline.branch.clone_from(&p.branch);
                }
                if timeline.title.is_none() {
                    timeline.title.clone_from(&p.title);
                }
                timeline.pr = timeline.pr.or(p.pr);
                timeline
                    .stages
                    .implement
                    .advance(StageState::from_status(&p.status), at);
            }
            Event::ReviewUpdate(p) => {
                let Some(issue) = self.issue_of(p.issue, p.pr) else {
                    return;
                };
                let timeline = self.timeline(issue, at);
                timeline.pr = timeline.pr.or(p.pr);
                timeline
                    .stages
                    .review
                    .advance(StageState::from_status(&p.status), at);
            }
            Event::MergeUpdate(p) => {
                let Some(issue) = self.issue_of(p.issue, p.pr) else {
                    return;
                };
                let state = if status::is_merged(&p.status) {
                    StageState::Done
                } else {
                    StageState::from_status(&p.status)
                };
                let timeline = self.timeline(issue, at);
                timeline.pr = timeline.pr.or(p.pr);
                timeline.stages.merged.advance(state, at);
            }
            Event::PrCreated(p) => {
                let Some(issue) = p.issue else { return };
                let timeline = self.timeline(issue, at);
                timeline.pr = timeline.pr.or(p.pr);
                if timeline.branch.is_none() && !p.branch.is_empty() {
                    timeline.branch = Some(p.branch.clone());
                }
            }
            Event::TranscriptLine(p) => {
                let Some(stage) = Stage::from_source(&p.source) else {
                    return;
                };
                let Some(issue) = self.issue_of(p.issue, p.pr) else {
                    return;
                };
                self.timeline(issue, at)
                    .stages
                    .get_mut(stage)
                    .push_line(TranscriptEntry {
                        id: envelope.id,
                        line: p.line.clone(),
                    });
            }
            Event::HitlUpdate(p) => {
                let Some(issue) = self.issue_of(p.issue, p.pr) else {
                    return;
                };
                let timeline = self.timeline(issue, at);
                if p.status == RESOLVED {
                    for stage in Stage::ALL {
                        let record = timeline.stages.get_mut(stage);
                        if record.status == StageState::Hitl {
                            record.status = StageState::Active;
                        }
                    }
                } else {
                    let stage = timeline.stages.most_advanced().unwrap_or(Stage::Implement);
                    let record = timeline.stages.get_mut(stage);
                    if record.status != StageState::Failed {
                        record.advance(StageState::Hitl, at);
                    }
                }
            }
            _ => {}
        }
    }

    /// Overlay live worker status. Never pulls a stage out of `hitl` or
    /// `failed`, and a queued worker never resets a started stage.
    fn augment(&mut self, key: &WorkerKey, entry: &WorkerEntry) {
        let issue = match key.stage {
            Stage::Merged => return,
            Stage::Review => match self.issue_of(entry.issue, Some(key.subject)) {
                Some(issue) => issue,
                None => return,
            },
            _ => key.subject,
        };
        let timeline = self
            .issues
            .entry(issue)
            .or_insert_with(|| IssueTimeline::new(issue));
        if timeline.title.is_none() && !entry.title.is_empty() && key.stage != Stage::Review {
            timeline.title = Some(entry.title.clone());
        }
        if timeline.branch.is_none() && !entry.branch.is_empty() {
            timeline.branch = Some(entry.branch.clone());
        }
        if key.stage == Stage::Review {
            timeline.pr = timeline.pr.or(Some(key.subject));
        }
        timeline.pr = timeline.pr.or(entry.pr);

        let record = timeline.stages.get_mut(key.stage);
        let live = StageState::from_status(&entry.status);
        let locked = matches!(record.status, StageState::Hitl | StageState::Failed);
        let would_reset = live == StageState::Pending && record.status != StageState::Pending;
        if !locked && !would_reset {
            record.settle(live, self.latest.get(&issue));
        }
        if record.transcript.is_empty() {
            let skip = entry
                .transcript
                .len()
                .saturating_sub(TIMELINE_TRANSCRIPT_WINDOW);
            record.transcript = entry.transcript[skip..].to_vec();
        }
    }

    fn apply_prs(&mut self, prs: &[PullRequest]) {
        for pr in prs {
            let Some(issue) = pr.issue else { continue };
            let Some(timeline) = self.issues.get_mut(&issue) else {
                continue;
            };
            timeline.pr = timeline.pr.or(Some(pr.pr));
            if timeline.branch.is_none() && !pr.branch.is_empty() {
                timeline.branch = Some(pr.branch.clone());
            }
            if pr.merged && timeline.stages.merged.status != StageState::Failed {
                timeline
                    .stages
                    .merged
                    .settle(StageState::Done, self.latest.get(&issue));
            }
        }
    }
}

/// Build one timeline per issue seen in `events` or `workers`.
///
/// Events may be given in any order. The result is sorted newest issue
/// first; issues known only from live workers (no timestamps) lead.
pub fn derive_issue_timelines<'a>(
    events: impl IntoIterator<Item = &'a EventEnvelope>,
    workers: &BTreeMap<WorkerKey, WorkerEntry>,
    prs: &[PullRequest],
) -> Vec<IssueTimeline> {
    let mut ordered: Vec<&EventEnvelope> = events.into_iter().collect();
    ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));

    let mut folder = Folder {
        issues: BTreeMap::new(),
        pr_issue: pr_issue_index(&ordered, workers, prs),
        latest: HashMap::new(),
    };
    for envelope in &ordered {
        folder.fold(envelope);
    }
    for (key, entry) in workers {
        folder.augment(key, entry);
    }
    folder.apply_prs(prs);

    let mut timelines: Vec<IssueTimeline> = folder
        .issues
        .into_values()
        .map(|mut t| {
            t.finish();
            t
        })
        .collect();
    timelines.sort_by(|a, b| match (&a.start_time, &b.start_time) {
        (None, None) => b.issue.cmp(&a.issue),
        (None, Some(_)) => std::cmp::Ordering::Less,
        (Some(_), None) => std::cmp::Ordering::Greater,
        (Some(x), Some(y)) => y.cmp(x).then(b.issue.cmp(&a.issue)),
    });
    timelines
}

impl DashboardState {
    pub fn issue_timelines(&self) -> Vec<IssueTimeline> {
        derive_issue_timelines(self.events.iter(), &self.workers, &self.prs)
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
