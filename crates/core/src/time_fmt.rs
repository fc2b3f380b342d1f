// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable durations for stage spans.

use crate::envelope::Timestamp;

/// Format seconds compactly: `"5s"`, `"2m"`, `"1h30m"`, `"3d"`.
pub fn format_elapsed(secs: u64) -> String {
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3599 => format!("{}m", secs / 60),
        3600..=86399 => match (secs / 3600, (secs % 3600) / 60) {
            (h, 0) => format!("{h}h"),
            (h, m) => format!("{h}h{m}m"),
        },
        _ => format!("{}d", secs / 86400),
    }
}

/// Duration between two timestamps, or `None` when either does not parse
/// or `end` precedes `start`.
pub fn format_span(start: &Timestamp, end: &Timestamp) -> Option<String> {
    let ms = end.epoch_ms()?.checked_sub(start.epoch_ms()?)?;
    let ms = u64::try_from(ms).ok()?;
    Some(format_elapsed(ms / 1000))
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
