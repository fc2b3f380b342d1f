// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hydra_core::test_support::*;
use serde_json::json;

#[test]
fn stream_envelope_decodes_as_event() {
    let action: Action = serde_json::from_value(json!({
        "id": "12",
        "type": "triage_update",
        "timestamp": "2026-01-01T00:00:00Z",
        "data": {"issue": 5, "status": "running"}
    }))
    .unwrap();

    let Action::Event(envelope) = action else {
        panic!("expected an event");
    };
    assert_eq!(envelope.id.map(|id| id.get()), Some(12));
    assert_eq!(envelope.event, triage(5, "running"));
}

#[test]
fn unknown_type_is_an_event_not_an_error() {
    let action: Action =
        serde_json::from_value(json!({"type": "agent_thought", "data": {"x": 1}})).unwrap();
    assert!(matches!(action, Action::Event(ref e) if e.event.kind() == "agent_thought"));
}

#[yare::parameterized(
    connected = { json!({"type": "CONNECTED"}), "CONNECTED" },
    disconnected = { json!({"type": "DISCONNECTED"}), "DISCONNECTED" },
    existing_prs = { json!({"type": "EXISTING_PRS", "data": [{"pr": 1}, {"pr": 2, "issue": 4}]}), "EXISTING_PRS prs=2" },
    submitted = { json!({"type": "HUMAN_INPUT_SUBMITTED", "data": {"issue": 4}}), "HUMAN_INPUT_SUBMITTED issue=4" },
    requests = { json!({"type": "HUMAN_INPUT_REQUESTS", "data": {"4": "which db?"}}), "HUMAN_INPUT_REQUESTS requests=1" },
    intent = { json!({"type": "INTENT_SUBMITTED", "data": {"text": "dark mode"}}), "INTENT_SUBMITTED" },
    pipeline = { json!({"type": "PIPELINE_SNAPSHOT", "data": {"plan": [{"issue": 4, "status": "active"}]}}), "PIPELINE_SNAPSHOT issues=1" },
    backfill = { json!({"type": "BACKFILL_EVENTS", "data": [{"id": 1, "type": "phase_change", "data": {"to": "plan"}}]}), "BACKFILL_EVENTS events=1" },
)]
fn control_messages_decode(value: serde_json::Value, summary: &str) {
    let action: Action = serde_json::from_value(value).unwrap();
    assert!(matches!(action, Action::Control(_)));
    assert_eq!(action.log_summary(), summary);
}

#[test]
fn malformed_control_is_an_error() {
    let result = serde_json::from_value::<Action>(json!({"type": "EXISTING_PRS", "data": 7}));
    assert!(result.is_err());
}

#[test]
fn action_survives_journal_encoding() {
    let actions: Vec<Action> = vec![
        with_id(3, review(30, 7, "done")).into(),
        Control::HumanInputSubmitted { issue: 4 }.into(),
        Control::Connected.into(),
    ];
    for action in actions {
        let line = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&line).unwrap();
        assert_eq!(back, action);
    }
}

#[test]
fn every_kind_is_listed() {
    let controls = [
        Control::ExistingPrs(Vec::new()),
        Control::BackfillEvents(Vec::new()),
        Control::BackgroundWorkers(Vec::new()),
        Control::Metrics(Metrics::default()),
        Control::HitlItems(Vec::new()),
        Control::HumanInputRequests(BTreeMap::new()),
        Control::HumanInputSubmitted { issue: 1 },
        Control::IntentSubmitted {
            text: String::new(),
            issue: None,
            timestamp: None,
        },
        Control::PipelineSnapshot(BTreeMap::new()),
        Control::Connected,
        Control::Disconnected,
    ];
    for control in &controls {
        assert!(Control::KINDS.contains(&control.kind()), "{}", control.kind());
    }
    assert_eq!(controls.len(), Control::KINDS.len());
}
