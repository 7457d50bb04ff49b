use assert_cmd::cargo_bin;
use std::process::Command;

mod common;

#[test]
fn test_generate_simple_csv() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("test_generated.csv");
    common::generate_csv(&output_path, 5).expect("Failed to generate CSV");

    let content = std::fs::read_to_string(&output_path).expect("Failed to read file");
    // Header + 5 creates + 5 chats = 11 lines
    assert_eq!(content.lines().count(), 11);
}

#[test]
fn test_generated_csv_replays() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("replay.csv");
    common::generate_csv(&output_path, 200).expect("Failed to generate CSV");

    let output = Command::new(cargo_bin!("cipherpay"))
        .arg("run")
        .arg(&output_path)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Header + one row per payment
    assert_eq!(stdout.lines().count(), 201);
    assert!(stdout.lines().skip(1).all(|line| line.ends_with(",1")));
}
