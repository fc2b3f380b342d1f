// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    zero_seconds     = { 0,      "0s" },
    max_seconds      = { 59,     "59s" },
    one_minute       = { 60,     "1m" },
    max_minutes      = { 3599,   "59m" },
    one_hour         = { 3600,   "1h" },
    hour_and_minutes = { 3660,   "1h1m" },
    almost_a_day     = { 86399,  "23h59m" },
    two_days         = { 172800, "2d" },
)]
fn elapsed(secs: u64, expected: &str) {
    assert_eq!(format_elapsed(secs), expected);
}

#[test]
fn span_between_parsed_timestamps() {
    let start = Timestamp::parse("2026-01-01T10:00:00Z");
    let end = Timestamp::parse("2026-01-01T10:03:30Z");
    assert_eq!(format_span(&start, &end).as_deref(), Some("3m"));
}

#[test]
fn span_respects_offsets() {
    let start = Timestamp::parse("2026-01-01T10:00:00+02:00");
    let end = Timestamp::parse("2026-01-01T08:00:45Z");
    assert_eq!(format_span(&start, &end).as_deref(), Some("45s"));
}

#[test]
fn span_is_none_when_reversed_or_unparseable() {
    let start = Timestamp::parse("2026-01-01T10:00:00Z");
    let end = Timestamp::parse("2026-01-01T09:00:00Z");
    assert_eq!(format_span(&start, &end), None);
    assert_eq!(format_span(&start, &Timestamp::parse("later")), None);
}
