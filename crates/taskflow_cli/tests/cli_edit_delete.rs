use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("taskflow-{nanos}-{file_name}"))
}

fn write_store(path: &PathBuf, tasks: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&tasks).unwrap()).unwrap();
}

fn one_task_store() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "title": "old title",
            "description": "old details",
            "completed": false,
            "created_at": "2026-01-01T09:00:00Z",
            "completed_at": null
        }
    ])
}

#[test]
fn edit_command_updates_title_and_description() {
    let exe = env!("CARGO_BIN_EXE_taskflow");
    let store_path = temp_path("cli-edit.json");
    write_store(&store_path, one_task_store());

    let output = Command::new(exe)
        .args(["edit", "1", "new title", "-d", "new details"])
        .env("TASKFLOW_STORE_PATH", &store_path)
        .output()
        .expect("failed to run edit command");

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert_eq!(stored[0]["title"], "new title");
    assert_eq!(stored[0]["description"], "new details");
}

#[test]
fn edit_command_keeps_description_when_flag_omitted() {
    let exe = env!("CARGO_BIN_EXE_taskflow");
    let store_path = temp_path("cli-edit-keep-desc.json");
    write_store(&store_path, one_task_store());

    let output = Command::new(exe)
        .args(["edit", "1", "new title"])
        .env("TASKFLOW_STORE_PATH", &store_path)
        .output()
        .expect("failed to run edit command");

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert_eq!(stored[0]["title"], "new title");
    assert_eq!(stored[0]["description"], "old details");
}

#[test]
fn edit_command_rejects_blank_title_and_leaves_store_untouched() {
    let exe = env!("CARGO_BIN_EXE_taskflow");
    let store_path = temp_path("cli-edit-blank.json");
    write_store(&store_path, one_task_store());

    let output = Command::new(exe)
        .args(["edit", "1", "   "])
        .env("TASKFLOW_STORE_PATH", &store_path)
        .output()
        .expect("failed to run edit command");

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert_eq!(stored[0]["title"], "old title");
}

#[test]
fn delete_command_removes_task() {
    let exe = env!("CARGO_BIN_EXE_taskflow");
    let store_path = temp_path("cli-delete.json");
    write_store(&store_path, one_task_store());

    let output = Command::new(exe)
        .args(["delete", "1"])
        .env("TASKFLOW_STORE_PATH", &store_path)
        .output()
        .expect("failed to run delete command");

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted task: old title (#1)"));
    assert_eq!(stored.as_array().unwrap().len(), 0);
}

#[test]
fn delete_command_rejects_unknown_id() {
    let exe = env!("CARGO_BIN_EXE_taskflow");
    let store_path = temp_path("cli-delete-missing.json");
    write_store(&store_path, one_task_store());

    let output = Command::new(exe)
        .args(["delete", "999"])
        .env("TASKFLOW_STORE_PATH", &store_path)
        .output()
        .expect("failed to run delete command");

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    std::fs::remove_file(&store_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - task not found"));
    assert_eq!(stored.as_array().unwrap().len(), 1);
}
