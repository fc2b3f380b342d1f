// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;
use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

// --- Logging ---

/// Tracing filter directive: HYDRA_LOG > "warn"
pub fn log_filter() -> String {
    std::env::var("HYDRA_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

pub fn log_file() -> Option<PathBuf> {
    std::env::var("HYDRA_LOG_FILE")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// --- Config overrides ---

pub fn max_events() -> Option<usize> {
    std::env::var("HYDRA_MAX_EVENTS")
        .ok()
        .and_then(|s| s.parse().ok())
}

pub fn follow_poll_ms() -> Option<Duration> {
    parse_duration_ms("HYDRA_FOLLOW_POLL_MS")
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}
