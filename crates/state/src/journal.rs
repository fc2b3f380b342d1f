// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSONL recording of the feed.
//!
//! One action per line: either a wire envelope `{"id":1,"type":...}` or a
//! control message `{"type":"EXISTING_PRS","data":[...]}`. Lines that do not
//! decode are skipped and counted, never fatal.

use crate::action::Action;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of one read pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalRead {
    pub actions: Vec<Action>,
    /// Non-blank lines that failed to decode
    pub skipped: usize,
    /// Byte offset just past the last complete line consumed
    pub offset: u64,
}

#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> JournalError {
        JournalError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Read the whole journal.
    pub fn read(&self) -> Result<JournalRead, JournalError> {
        self.read_from(0)
    }

    /// Read complete lines starting at byte `offset`.
    ///
    /// A trailing line without a newline is left unread so a writer that is
    /// mid-append is picked up whole on the next call.
    pub fn read_from(&self, offset: u64) -> Result<JournalRead, JournalError> {
        let mut file = File::open(&self.path).map_err(|e| self.io_err(e))?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| self.io_err(e))?;
        let mut reader = BufReader::new(file);

        let mut read = JournalRead {
            offset,
            ..JournalRead::default()
        };
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| self.io_err(e))?;
            if n == 0 || buf.last() != Some(&b'\n') {
                break;
            }
            let line_offset = read.offset;
            read.offset += n as u64;

            let line = String::from_utf8_lossy(&buf);
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Action>(trimmed) {
                Ok(action) => read.actions.push(action),
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        offset = line_offset,
                        error = %e,
                        "skipping corrupt journal line",
                    );
                    read.skipped += 1;
                }
            }
        }
        Ok(read)
    }

    /// Append actions, one JSON line each, creating the file if needed.
    pub fn append<'a>(
        &self,
        actions: impl IntoIterator<Item = &'a Action>,
    ) -> Result<(), JournalError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_err(e))?;
        let mut out = Vec::new();
        for action in actions {
            serde_json::to_writer(&mut out, action)?;
            out.push(b'\n');
        }
        file.write_all(&out).map_err(|e| self.io_err(e))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
