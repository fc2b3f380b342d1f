// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hydra_core::test_support::*;
use serial_test::serial;
use yare::parameterized;

fn log() -> EventLog {
    let mut log = EventLog::bounded(10);
    log.push(with_id(1, triage(5, "running")));
    log.push(with_id(2, worker(5, "running")));
    log.push(anonymous(3, background_worker("triage", "ok")));
    log.push(with_id(4, worker(6, "failed")));
    log
}

fn ids(events: &[&EventEnvelope]) -> Vec<Option<u64>> {
    events.iter().map(|e| e.id.map(|id| id.get())).collect()
}

#[parameterized(
    all = { None, 10, vec![Some(4), None, Some(2), Some(1)] },
    newest_two = { None, 2, vec![Some(4), None] },
    workers_only = { Some("worker_update"), 10, vec![Some(4), Some(2)] },
    no_match = { Some("merge_update"), 10, vec![] },
    zero_limit = { None, 0, vec![] },
)]
fn select_filters_then_limits(kind: Option<&str>, limit: usize, expected: Vec<Option<u64>>) {
    assert_eq!(ids(&select(&log(), kind, limit)), expected);
}

#[test]
#[serial]
fn table_shows_id_time_and_summary() {
    std::env::set_var("NO_COLOR", "1");
    let log = log();
    let events = select(&log, None, 2);
    let mut buf = Vec::new();
    events_table(&events).render(&mut buf);
    let out = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(
        lines,
        vec![
            "ID  TIME                      EVENT",
            " 4  2026-01-01T00:00:04.000Z  worker_update issue=6 status=failed",
            " -  2026-01-01T00:00:03.000Z  background_worker_status worker=triage status=ok",
        ]
    );
}
