// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `hydra.toml` settings with environment overrides.

use hydra_state::{DashboardState, MAX_EVENTS, MAX_TRANSCRIPT_LINES};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given
const DEFAULT_CONFIG_FILE: &str = "hydra.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Capacity of the event log
    pub max_events: usize,
    /// Transcript lines kept per worker
    pub max_transcript_lines: usize,
    /// How often `follow` checks the journal for new lines
    pub follow_poll_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_events: MAX_EVENTS,
            max_transcript_lines: MAX_TRANSCRIPT_LINES,
            follow_poll_ms: 500,
        }
    }
}

impl Config {
    /// Load from `path`, or from `./hydra.toml` if it exists, then apply
    /// `HYDRA_MAX_EVENTS` and `HYDRA_FOLLOW_POLL_MS`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::read(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        if let Some(max_events) = crate::env::max_events() {
            config.max_events = max_events;
        }
        if let Some(poll) = crate::env::follow_poll_ms() {
            config.follow_poll_ms = u64::try_from(poll.as_millis()).unwrap_or(u64::MAX);
        }
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_events == 0 {
            return Err(ConfigError::Zero("max_events"));
        }
        if self.max_transcript_lines == 0 {
            return Err(ConfigError::Zero("max_transcript_lines"));
        }
        if self.follow_poll_ms == 0 {
            return Err(ConfigError::Zero("follow_poll_ms"));
        }
        Ok(())
    }

    pub fn follow_poll(&self) -> Duration {
        Duration::from_millis(self.follow_poll_ms)
    }

    /// Empty dashboard state sized by this config.
    pub fn new_state(&self) -> DashboardState {
        DashboardState::with_limits(self.max_events, self.max_transcript_lines)
    }

    /// Size a restored state by this config.
    pub fn bound(&self, mut state: DashboardState) -> DashboardState {
        state.set_limits(self.max_events, self.max_transcript_lines);
        state
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
