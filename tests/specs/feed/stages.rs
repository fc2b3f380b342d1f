//! `hydra stages` specs

use crate::prelude::*;

#[test]
fn stages_table_and_workload() {
    let ws = Workspace::with_feed();
    ws.hydra().args(&["stages", "feed.jsonl"]).passes().stdout_eq(
        "\
STAGE      ISSUES  ACTIVE  QUEUED  WORKERS  ENABLED  SESSION
triage          0       0       0        1  on             1
plan            0       0       0        0  on             0
implement       0       0       0        1  on             0
review          0       0       0        0  on             0
merged          0       0       0        0  on             0

Workload: 3 workers, 2 active, 1 done, 0 failed
",
    );
}

#[test]
fn pipeline_snapshot_and_loop_status_feed_the_counts() {
    let ws = Workspace::empty();
    ws.file(
        "feed.jsonl",
        r#"{"type":"PIPELINE_SNAPSHOT","data":{"review":[{"issue":1,"status":"active"},{"issue":2,"status":"queued"}]}}
{"type":"BACKGROUND_WORKERS","data":[{"name":"review","status":"ok","enabled":false}]}
"#,
    );
    let json = ws
        .hydra()
        .args(&["-o", "json", "stages", "feed.jsonl"])
        .passes()
        .json();

    let review = &json["stages"]["review"];
    assert_eq!(review["issue_count"], 2);
    assert_eq!(review["active_count"], 1);
    assert_eq!(review["queued_count"], 1);
    assert_eq!(review["enabled"], false);
    assert_eq!(json["stages"]["triage"]["enabled"], true);
}
