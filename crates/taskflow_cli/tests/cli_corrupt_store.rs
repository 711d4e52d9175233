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

#[test]
fn corrupt_store_warns_backs_up_and_continues_empty() {
    let exe = env!("CARGO_BIN_EXE_taskflow");
    let store_path = temp_path("cli-corrupt.json");
    std::fs::write(&store_path, "definitely not json").unwrap();

    let output = Command::new(exe)
        .args(["list"])
        .env("TASKFLOW_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    let backup = store_path.with_extension("bak");
    let backup_content = std::fs::read_to_string(&backup).unwrap();
    std::fs::remove_file(&store_path).ok();
    std::fs::remove_file(&backup).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("No tasks to show."));
    assert!(stderr.contains("WARNING: could not load"));
    assert_eq!(backup_content, "definitely not json");
}

#[test]
fn mutation_after_corrupt_load_overwrites_store_but_keeps_backup() {
    let exe = env!("CARGO_BIN_EXE_taskflow");
    let store_path = temp_path("cli-corrupt-add.json");
    std::fs::write(&store_path, "{ broken").unwrap();

    let output = Command::new(exe)
        .args(["add", "fresh start"])
        .env("TASKFLOW_STORE_PATH", &store_path)
        .output()
        .expect("failed to run add command");

    let backup = store_path.with_extension("bak");
    let backup_content = std::fs::read_to_string(&backup).unwrap();
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store_path).unwrap()).unwrap();
    std::fs::remove_file(&store_path).ok();
    std::fs::remove_file(&backup).ok();

    assert!(output.status.success());
    assert_eq!(backup_content, "{ broken");
    assert_eq!(stored[0]["id"], 1);
    assert_eq!(stored[0]["title"], "fresh start");
}
