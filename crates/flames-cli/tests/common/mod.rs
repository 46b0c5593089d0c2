//! Common utilities for CLI E2E tests.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

pub const QUESTIONS: &str = r#"{
    "cute": [
        { "image": "c1.jpg", "question": "Favourite snack?", "options": ["Chips", "Fruit"], "correctIndex": 0 },
        { "image": "c2.jpg", "question": "Cats or dogs?", "options": ["Cats", "Dogs"], "correctIndex": 1 }
    ],
    "memory": [
        { "image": "m1.jpg", "question": "Where did we meet?", "options": ["Park", "Cafe"], "correctIndex": 1 }
    ]
}"#;

pub const CONFIG: &str = r#"{
    "names": { "gfName": "Ada", "yourName": "Bo" },
    "sample": { "cute": 2, "memory": 1 },
    "shuffleFinalOrder": true,
    "paths": { "questionImageBase": "assets/img/q/" }
}"#;

/// Write both data documents under `root`.
pub fn write_site(root: &Path, questions: &str, config: &str) {
    let data = root.join("assets/data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("questions.json"), questions).unwrap();
    std::fs::write(data.join("quiz_config.json"), config).unwrap();
}

/// Invoke the CLI with `stdin` piped in and return (stdout, stderr, code).
pub fn run_cli_with_input(args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_flames"))
        .args(args)
        .env_remove("FLAMES_ASSETS")
        .env_remove("FLAMES_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    // The binary may exit before reading its input.
    if let Some(mut pipe) = child.stdin.take() {
        let _ = pipe.write_all(stdin.as_bytes());
    }
    let output = child.wait_with_output().expect("Failed to wait for CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Invoke a CLI command and return the output.
pub fn run_cli(args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(args, "")
}

/// Invoke a CLI command and expect success.
pub fn run_cli_success(args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(args);
    if code != 0 && !stderr.is_empty() {
        eprintln!("CLI error output: {}", stderr);
    }
    assert_eq!(code, 0, "CLI command failed with code {}: {:?}", code, args);
    stdout
}

/// Invoke a CLI command and expect failure.
pub fn run_cli_failure(args: &[&str]) -> (String, String, i32) {
    let (stdout, stderr, code) = run_cli(args);
    assert!(code != 0, "CLI command unexpectedly succeeded: {:?}", args);
    (stdout, stderr, code)
}

/// Parse JSON output from CLI.
pub fn parse_json<T: for<'de> serde::Deserialize<'de>>(json: &str) -> T {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}
