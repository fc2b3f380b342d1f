// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dashboard state persisted between runs.
//!
//! A snapshot carries the whole state, including `last_seen_id`, so a
//! restarted consumer resumes exactly like a reconnect: replayed history is
//! skipped and backfill merges idempotently.

use crate::state::DashboardState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Bumped whenever the serialized state layout changes incompatibly
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub state: DashboardState,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(state: DashboardState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            state,
            created_at: Utc::now(),
        }
    }

    /// Save atomically: write to `.tmp`, sync, then rename over `path`.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, self)?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Load a snapshot if one exists.
    ///
    /// A file that does not decode, or that was written by another layout
    /// version, is moved aside to `.bak` and `Ok(None)` is returned so the
    /// caller starts from an empty state.
    pub fn load(path: &Path) -> Result<Option<Self>, SnapshotError> {
        if !path.exists() {
            return Ok(None);
        }

        let reader = BufReader::new(File::open(path)?);
        let reason = match serde_json::from_reader::<_, Snapshot>(reader) {
            Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => return Ok(Some(snapshot)),
            Ok(snapshot) => format!("unsupported version {}", snapshot.version),
            Err(e) => e.to_string(),
        };

        let bak_path = rotate_bak_path(path);
        warn!(
            error = %reason,
            path = %path.display(),
            bak = %bak_path.display(),
            "unusable snapshot, moving to .bak and starting fresh",
        );
        fs::rename(path, &bak_path)?;
        Ok(None)
    }
}

const MAX_BAK_FILES: u32 = 3;

/// Pick the next `.bak` path, shifting older backups to `.bak.2` and
/// `.bak.3`. The oldest backup is removed at the limit.
pub(crate) fn rotate_bak_path(path: &Path) -> PathBuf {
    let bak = |n: u32| {
        if n == 1 {
            path.with_extension("bak")
        } else {
            path.with_extension(format!("bak.{n}"))
        }
    };

    let oldest = bak(MAX_BAK_FILES);
    if oldest.exists() {
        let _ = fs::remove_file(&oldest);
    }
    for n in (1..MAX_BAK_FILES).rev() {
        let src = bak(n);
        if src.exists() {
            let _ = fs::rename(&src, bak(n + 1));
        }
    }
    bak(1)
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
