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

fn run(store_path: &Path, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_tracker");
    Command::new(exe)
        .args(args)
        .env("TRACKER_STORE_PATH", store_path)
        .output()
        .expect("failed to run tracker")
}

#[test]
fn list_on_missing_store_prints_empty_message() {
    let store_path = temp_path("cli-list-missing.jsonl");

    let output = run(&store_path, &["list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks found."));
}

#[test]
fn list_numbers_tasks_in_saved_order() {
    let store_path = temp_path("cli-list-order.jsonl");
    write_store(
        &store_path,
        &[
            serde_json::json!({"kind": "T", "done": false, "description": "read book"}),
            serde_json::json!({
                "kind": "D", "done": true,
                "description": "submit report", "field1": "2024-06-01"
            }),
        ],
    );

    let output = run(&store_path, &["list"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1. [T][ ] read book"));
    assert!(stdout.contains("2. [D][X] submit report (by: 2024-06-01)"));
}

#[test]
fn list_does_not_rewrite_the_store() {
    let store_path = temp_path("cli-list-readonly.jsonl");
    write_store(
        &store_path,
        &[serde_json::json!({"kind": "T", "done": false, "description": "read book"})],
    );
    let before = std::fs::read_to_string(&store_path).unwrap();

    let output = run(&store_path, &["list"]);
    let after = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert_eq!(before, after);
}

#[test]
fn list_warns_about_corrupt_records_and_keeps_the_rest() {
    let store_path = temp_path("cli-list-corrupt.jsonl");
    write_store(
        &store_path,
        &[
            serde_json::json!({"kind": "T", "done": false, "description": "read book"}),
            serde_json::json!({"kind": "Z", "done": false, "description": "mystery"}),
        ],
    );

    let output = run(&store_path, &["list"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("1. [T][ ] read book"));
    assert!(!stdout.contains("mystery"));
    assert!(stderr.contains("WARNING: skipped 1 corrupt record(s)"));
}

#[test]
fn list_json_outputs_record_array() {
    let store_path = temp_path("cli-list-json.jsonl");
    write_store(
        &store_path,
        &[
            serde_json::json!({"kind": "T", "done": false, "description": "read book"}),
            serde_json::json!({
                "kind": "E", "done": false, "description": "standup",
                "field1": "09:00", "field2": "09:15"
            }),
        ],
    );

    let output = run(&store_path, &["--json", "list"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    let tasks = parsed.as_array().expect("array output");

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["description"], "read book");
    assert_eq!(tasks[1]["field1"], "09:00");
    assert_eq!(tasks[1]["field2"], "09:15");
}
