//! Integration tests for the procpool CLI

use std::process::Command;

/// Command with an empty config file so the user's own config is ignored
fn procpool(config_dir: &tempfile::TempDir) -> Command {
    let config = config_dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_procpool"));
    cmd.arg("--config").arg(config).arg("--color").arg("never");
    for var in [
        "PROCPOOL_CAPACITY",
        "PROCPOOL_DRY_RUN",
        "PROCPOOL_POLL_INTERVAL_MS",
        "PROCPOOL_RECLAIM",
        "PROCPOOL_SHELL",
        "PROCPOOL_OUTPUT",
        "PROCPOOL_COLOR",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_procpool"))
        .arg("--version")
        .output()
        .expect("Failed to execute procpool");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("procpool"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_procpool"))
        .arg("--help")
        .output()
        .expect("Failed to execute procpool");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Run shell commands with bounded concurrency"));
    assert!(stdout.contains("run"));
    assert!(stdout.contains("expand"));
}

#[test]
fn test_run_without_commands_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = procpool(&dir).arg("run").output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no commands given"));
}

#[test]
fn test_zero_capacity_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = procpool(&dir)
        .args(["-j", "0", "run", "true"])
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn test_dry_run_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("should-not-exist");
    let touch = format!("touch {}", marker.display());

    let output = procpool(&dir)
        .args(["--json", "--dry-run", "-j", "2", "run", "echo a", &touch, "echo c"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(!marker.exists());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["capacity"], 2);
    assert_eq!(report["stats"]["dry_run"], 3);
    assert_eq!(report["results"].as_array().unwrap().len(), 0);
}

#[cfg(unix)]
#[test]
fn test_failed_command_sets_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    let output = procpool(&dir)
        .args(["--json", "--poll-interval-ms", "10", "run", "true", "exit 4"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["stats"]["completed"], 2);
    assert_eq!(report["stats"]["failed"], 1);
    let codes: Vec<i64> = report["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["exit_code"].as_i64().unwrap())
        .collect();
    assert!(codes.contains(&4));
    assert!(codes.contains(&0));
}

#[cfg(unix)]
#[test]
fn test_json_report_survives_printing_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = procpool(&dir)
        .args([
            "--json",
            "--poll-interval-ms",
            "10",
            "run",
            "echo hello",
            "printf '{not json'",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["stats"]["completed"], 2);
    assert_eq!(report["stats"]["failed"], 0);

    // Child output still reaches the user, on stderr
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hello"));
    assert!(stderr.contains("{not json"));
}

#[cfg(unix)]
#[test]
fn test_commands_from_file_plain_output() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("commands.txt");
    std::fs::write(&list, "# two quick ones\ntrue\n\necho hi >/dev/null\n").unwrap();

    let output = procpool(&dir)
        .env("PROCPOOL_OUTPUT", "plain")
        .args(["--poll-interval-ms", "10", "run", "--file"])
        .arg(&list)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 succeeded, 0 failed, 2 total"));
}

#[test]
fn test_expand_dry_run_renders_template() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("a.csv"), "").unwrap();
    std::fs::write(data.join("b.csv"), "").unwrap();
    std::fs::write(data.join("skip.txt"), "").unwrap();

    let output = procpool(&dir)
        .args(["--dry-run", "expand", "--template", "gzip {name}", "--root"])
        .arg(&data)
        .arg("*.csv")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("would run gzip a.csv"));
    assert!(stderr.contains("would run gzip b.csv"));
    assert!(!stderr.contains("skip.txt"));
}
