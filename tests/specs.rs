//! Behavioral specifications for the hydra CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/config.rs"]
mod cli_config;
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// feed/
#[path = "specs/feed/events.rs"]
mod feed_events;
#[path = "specs/feed/follow.rs"]
mod feed_follow;
#[path = "specs/feed/replay.rs"]
mod feed_replay;
#[path = "specs/feed/stages.rs"]
mod feed_stages;
#[path = "specs/feed/timeline.rs"]
mod feed_timeline;
