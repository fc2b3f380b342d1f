// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

fn status() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["queued", "running", "quality_fix", "done", "failed", "escalated"])
}

/// Stage events only; no phase or orchestrator transitions, so nothing
/// resets the session mid-sequence.
fn stage_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (1u64..6, status()).prop_map(|(i, s)| triage(i, s)),
        (1u64..6, status()).prop_map(|(i, s)| planner(i, s)),
        (1u64..6, status()).prop_map(|(i, s)| worker(i, s)),
        (30u64..36, 1u64..6, status()).prop_map(|(p, i, s)| review(p, i, s)),
        (30u64..36, 1u64..6).prop_map(|(p, i)| pr_created(p, i)),
        (30u64..36).prop_map(|p| merge(p, None, "merged")),
        (1u64..6).prop_map(|i| transcript("implementer", Some(i), None, "line")),
        Just(unknown("agent_thought")),
    ]
}

fn envelope() -> impl Strategy<Value = EventEnvelope> {
    (proptest::option::of(1u64..200), 0i64..500, stage_event()).prop_map(|(id, secs, event)| {
        EventEnvelope::new(id.map(EventId), ts(secs), event)
    })
}

fn identified_envelope() -> impl Strategy<Value = EventEnvelope> {
    (1u64..200, 0i64..500, stage_event()).prop_map(|(id, secs, event)| at(id, secs, event))
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => envelope().prop_map(Action::Event),
        1 => prop::collection::vec(envelope(), 0..40)
            .prop_map(|batch| Control::BackfillEvents(batch).into()),
    ]
}

fn newest_first(state: &DashboardState) -> bool {
    let stamps: Vec<_> = state.events.iter().map(|e| &e.timestamp).collect();
    stamps.windows(2).all(|w| w[0] >= w[1])
}

proptest! {
    #[test]
    fn log_stays_bounded_and_ordered(actions in prop::collection::vec(action(), 0..120)) {
        let mut state = DashboardState::with_limits(25, MAX_TRANSCRIPT_LINES);
        for action in &actions {
            state.apply(action);
            prop_assert!(state.events.len() <= 25);
            prop_assert!(newest_first(&state));
        }
    }

    #[test]
    fn pr_numbers_stay_unique(actions in prop::collection::vec(action(), 0..80)) {
        let mut state = DashboardState::default();
        for action in &actions {
            state.apply(action);
        }
        let mut numbers: Vec<u64> = state.prs.iter().map(|p| p.pr).collect();
        numbers.sort_unstable();
        numbers.dedup();
        prop_assert_eq!(numbers.len(), state.prs.len());
    }

    #[test]
    fn reapplying_an_identified_event_changes_nothing(
        prefix in prop::collection::vec(envelope(), 0..30),
        event in identified_envelope(),
    ) {
        let base = state_after(prefix);
        let action = Action::Event(event);
        let once = reduce(&base, &action);
        let twice = reduce(&once, &action);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn replaying_a_processed_sequence_changes_nothing(
        events in prop::collection::vec(identified_envelope(), 1..60),
    ) {
        let first = state_after(events.clone());
        let mut replayed = first.clone();
        apply_all(&mut replayed, events);
        prop_assert_eq!(replayed.events.len(), first.events.len());
        prop_assert_eq!(replayed.counters, first.counters);
        prop_assert_eq!(replayed, first);
    }

    #[test]
    fn counters_never_decrease_without_reset(events in prop::collection::vec(envelope(), 0..80)) {
        let mut state = DashboardState::default();
        for event in events {
            let before = state.counters;
            state.apply(&Action::Event(event));
            for stage in Stage::ALL {
                let (old, new) = (before.for_stage(stage), state.counters.for_stage(stage));
                prop_assert!(new == old || new == old + 1);
            }
            prop_assert!(state.counters.prs >= before.prs);
        }
    }
}
