// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interval loop driving `hydra follow`.
//!
//! Wakes every `interval` until an optional deadline passes or Ctrl+C is
//! pressed, whichever comes first.

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

/// Outcome of waiting for the next wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time to check the journal again.
    Ready,
    /// The deadline was reached.
    Timeout,
    /// Ctrl+C was pressed.
    Interrupted,
}

pub struct Poller {
    interval: Duration,
    deadline: Option<Instant>,
    ctrl_c: Pin<Box<dyn Future<Output = std::io::Result<()>>>>,
    ticks: u64,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
            ctrl_c: Box::pin(tokio::signal::ctrl_c()),
            ticks: 0,
        }
    }

    /// Stop with [`Tick::Timeout`] once `timeout` has elapsed from now.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.deadline = timeout.map(|t| Instant::now() + t);
        self
    }

    /// Number of [`Tick::Ready`] results handed out so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Sleep one interval, cut short by the deadline or Ctrl+C.
    pub async fn tick(&mut self) -> Tick {
        if self.expired() {
            return Tick::Timeout;
        }
        let sleep = match self.deadline {
            Some(deadline) => self
                .interval
                .min(deadline.saturating_duration_since(Instant::now())),
            None => self.interval,
        };

        tokio::select! {
            _ = &mut self.ctrl_c => Tick::Interrupted,
            _ = tokio::time::sleep(sleep) => {
                if self.expired() {
                    Tick::Timeout
                } else {
                    self.ticks += 1;
                    Tick::Ready
                }
            }
        }
    }
}

/// Parse `"500ms"`, `"30s"`, `"5m"`, `"1h"` or a bare number of seconds.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    let n: u64 = digits
        .parse()
        .map_err(|_| format!("invalid number in duration: {s}"))?;

    let secs = match unit.trim() {
        "ms" => return Ok(Duration::from_millis(n)),
        "" | "s" | "sec" | "secs" => n,
        "m" | "min" | "mins" => n * 60,
        "h" | "hr" | "hrs" => n * 3600,
        other => return Err(format!("unknown duration unit: {other}")),
    };
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
