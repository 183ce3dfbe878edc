use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tracker-{nanos}-{file_name}"))
}

fn write_store(path: &Path, records: &[serde_json::Value]) {
    let mut content =
        String::from("{\"schema_version\": 1, \"saved_at\": \"2024-06-01T00:00:00Z\"}\n");
    for record in records {
        content.push_str(&record.to_string());
        content.push('\n');
    }
    std::fs::write(path, content).unwrap();
}

fn read_records(path: &Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn run(store_path: &Path, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_tracker");
    Command::new(exe)
        .args(args)
        .env("TRACKER_STORE_PATH", store_path)
        .output()
        .expect("failed to run tracker")
}

#[test]
fn mark_command_sets_done_and_persists() {
    let store_path = temp_path("cli-mark.jsonl");
    write_store(
        &store_path,
        &[serde_json::json!({"kind": "T", "done": false, "description": "read book"})],
    );

    let output = run(&store_path, &["mark", "1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Marked as done:"));
    assert!(stdout.contains("[T][X] read book"));

    let records = read_records(&store_path);
    std::fs::remove_file(&store_path).ok();
    assert_eq!(records[0]["done"], true);
}

#[test]
fn unmark_command_clears_done_and_persists() {
    let store_path = temp_path("cli-unmark.jsonl");
    write_store(
        &store_path,
        &[serde_json::json!({"kind": "T", "done": true, "description": "read book"})],
    );

    let output = run(&store_path, &["unmark", "1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Marked as not done:"));
    assert!(stdout.contains("[T][ ] read book"));

    let records = read_records(&store_path);
    std::fs::remove_file(&store_path).ok();
    assert_eq!(records[0]["done"], false);
}

#[test]
fn mark_out_of_range_fails_and_leaves_store_unchanged() {
    let store_path = temp_path("cli-mark-range.jsonl");
    write_store(
        &store_path,
        &[serde_json::json!({"kind": "T", "done": false, "description": "read book"})],
    );
    let before = std::fs::read_to_string(&store_path).unwrap();

    let output = run(&store_path, &["mark", "5"]);
    let after = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: index_out_of_range"));
    assert_eq!(before, after);
}

#[test]
fn mark_position_zero_is_rejected() {
    let store_path = temp_path("cli-mark-zero.jsonl");
    write_store(
        &store_path,
        &[serde_json::json!({"kind": "T", "done": false, "description": "read book"})],
    );

    let output = run(&store_path, &["mark", "0"]);
    std::fs::remove_file(&store_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: index_out_of_range"));
}

#[test]
fn mark_twice_is_idempotent() {
    let store_path = temp_path("cli-mark-twice.jsonl");
    write_store(
        &store_path,
        &[serde_json::json!({"kind": "T", "done": false, "description": "read book"})],
    );

    assert!(run(&store_path, &["mark", "1"]).status.success());
    let output = run(&store_path, &["mark", "1"]);

    assert!(output.status.success());
    let records = read_records(&store_path);
    std::fs::remove_file(&store_path).ok();
    assert_eq!(records[0]["done"], true);
}

#[test]
fn mark_json_outputs_updated_record() {
    let store_path = temp_path("cli-mark-json.jsonl");
    write_store(
        &store_path,
        &[serde_json::json!({
            "kind": "D", "done": false,
            "description": "submit report", "field1": "2024-06-01"
        })],
    );

    let output = run(&store_path, &["--json", "mark", "1"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");

    assert_eq!(parsed["kind"], "D");
    assert_eq!(parsed["done"], true);
    assert_eq!(parsed["field1"], "2024-06-01");
}
