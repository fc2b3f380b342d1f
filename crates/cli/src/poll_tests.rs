// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use super::*;
use yare::parameterized;

#[tokio::test]
async fn tick_is_ready_before_deadline() {
    let mut poller =
        Poller::new(Duration::from_millis(10)).with_timeout(Some(Duration::from_secs(5)));
    assert_eq!(poller.tick().await, Tick::Ready);
    assert_eq!(poller.ticks(), 1);
}

#[tokio::test]
async fn deadline_inside_the_interval_cuts_the_sleep_short() {
    let mut poller =
        Poller::new(Duration::from_secs(30)).with_timeout(Some(Duration::from_millis(5)));
    let started = Instant::now();

    assert_eq!(poller.tick().await, Tick::Timeout);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(poller.ticks(), 0);
}

#[tokio::test]
async fn expired_deadline_times_out_immediately() {
    let mut poller = Poller::new(Duration::from_millis(10)).with_timeout(Some(Duration::ZERO));
    assert_eq!(poller.tick().await, Tick::Timeout);
}

#[tokio::test]
async fn without_timeout_ticks_keep_coming() {
    let mut poller = Poller::new(Duration::from_millis(5));
    for _ in 0..4 {
        assert_eq!(poller.tick().await, Tick::Ready);
    }
    assert_eq!(poller.ticks(), 4);
}

#[parameterized(
    millis = { "1500ms", Duration::from_millis(1500) },
    seconds = { "30s", Duration::from_secs(30) },
    bare = { "7", Duration::from_secs(7) },
    minutes = { "5m", Duration::from_secs(300) },
    hours = { "2h", Duration::from_secs(7200) },
    padded = { "  10 s ", Duration::from_secs(10) },
)]
fn parses_durations(input: &str, expected: Duration) {
    assert_eq!(parse_duration(input), Ok(expected));
}

#[parameterized(
    empty = { "" },
    no_digits = { "s" },
    bad_unit = { "3 weeks" },
    negative = { "-5s" },
)]
fn rejects_bad_durations(input: &str) {
    assert!(parse_duration(input).is_err(), "{input:?} should not parse");
}
