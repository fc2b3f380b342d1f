//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the hydra binary against a recorded feed.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns the path to a binary, checking the llvm-cov target directory
/// first, then the standard target directory, then the directory of the
/// running test binary.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    assert_cmd::cargo::cargo_bin(name)
}

pub fn hydra_cmd() -> Command {
    Command::new(binary_path("hydra"))
}

/// Create a CLI builder for hydra commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: vec![("NO_COLOR".into(), "1".into())],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = hydra_cmd();
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        // Keep the caller's overrides out of the run
        for var in [
            "HYDRA_LOG",
            "HYDRA_LOG_FILE",
            "HYDRA_MAX_EVENTS",
            "HYDRA_FOLLOW_POLL_MS",
            "COLOR",
        ] {
            cmd.env_remove(var);
        }

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as one JSON document.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).expect("stdout should be JSON")
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring.
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}

// =============================================================================
// Feed
// =============================================================================

/// A short run of the pipeline: issue 5 is triaged and picked up by an
/// implementer that opens PR #30, then issue 8 enters triage. The ninth line
/// replays an already seen id and the last line is garbage.
pub const FEED: &str = r#"{"type":"CONNECTED"}
{"id":1,"type":"phase_change","timestamp":"2026-01-01T00:00:00Z","data":{"from":"idle","to":"plan"}}
{"id":2,"type":"orchestrator_status","timestamp":"2026-01-01T00:00:01Z","data":{"status":"running"}}
{"id":3,"type":"triage_update","timestamp":"2026-01-01T00:00:10Z","data":{"issue":5,"status":"running","title":"Fix login"}}
{"id":4,"type":"triage_update","timestamp":"2026-01-01T00:00:40Z","data":{"issue":5,"status":"done","title":"Fix login"}}
{"id":5,"type":"worker_update","timestamp":"2026-01-01T00:01:00Z","data":{"issue":5,"status":"running","branch":"agent/issue-5"}}
{"id":6,"type":"pr_created","timestamp":"2026-01-01T00:03:00Z","data":{"pr":30,"issue":5,"url":"https://example.test/pull/30","branch":"agent/issue-5"}}
{"id":7,"type":"triage_update","timestamp":"2026-01-01T00:04:00Z","data":{"issue":8,"status":"running","title":"Add dark mode"}}
{"id":4,"type":"triage_update","timestamp":"2026-01-01T00:00:40Z","data":{"issue":5,"status":"done","title":"Fix login"}}
this line is not json
"#;

/// Temporary working directory holding a journal.
pub struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Workspace with [`FEED`] written to `feed.jsonl`.
    pub fn with_feed() -> Self {
        let ws = Self::empty();
        ws.file("feed.jsonl", FEED);
        ws
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Run hydra with this workspace as the working directory
    pub fn hydra(&self) -> CliBuilder {
        cli().pwd(self.path())
    }
}
