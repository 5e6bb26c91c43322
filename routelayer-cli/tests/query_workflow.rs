//! Integration tests for the query CLI.
//!
//! Each test writes a config file into a temporary directory so logs land
//! there too, then runs the built binary end to end.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Writes a config that points logging (and optionally the dataset) into `root`.
fn write_config(root: &Path, dataset: Option<&Path>) -> PathBuf {
    let dataset = dataset
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content = format!(
        "[engine]\ndataset = {}\n\n[dispatcher]\nworker_threads = 2\n\n[logging]\ndirectory = {}\nfile = test.log\n",
        dataset,
        root.join("logs").display()
    );
    let path = root.join("config.ini");
    fs::write(&path, content).expect("Failed to write config");
    path
}

/// Run a CLI command and capture output.
fn run_cli(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_routelayer"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute CLI command")
}

/// Assert a command succeeded.
fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        panic!(
            "{} failed:\nstdout: {}\nstderr: {}",
            context,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

#[test]
fn test_route_prints_payload() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp.path(), None);

    let output = run_cli(
        &config,
        &["route", r#"{"coordinates": [[1.0, 2.0], [3.0, 4.0]]}"#],
    );
    assert_success(&output, "route");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let body: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(body["service"], "viaroute");
    assert_eq!(body["dataset"], "shared-memory");
    assert!(temp.path().join("logs").join("test.log").exists());
}

#[test]
fn test_dataset_from_config() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let dataset = temp.path().join("berlin.osrm");
    fs::write(&dataset, b"").unwrap();
    let config = write_config(temp.path(), Some(&dataset));

    let output = run_cli(&config, &["nearest", "[52.4224, 13.333086]"]);
    assert_success(&output, "nearest");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let body: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(body["dataset"], dataset.to_string_lossy().as_ref());
}

#[test]
fn test_validation_error_exits_nonzero() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp.path(), None);

    let output = run_cli(&config, &["route", r#"{"coordinates": [[1.0, 2.0]]}"#]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least two coordinates must be provided"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_engine_error_exits_nonzero() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp.path(), None);

    let output = run_cli(&config, &["locate", "[91.0, 0.0]"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Query failed: coordinate (91.000000, 0.000000) is outside the dataset bounds"));
}

#[test]
fn test_missing_dataset_reports_construction_error() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config = write_config(temp.path(), None);
    let missing = temp.path().join("missing.osrm");

    let output = run_cli(
        &config,
        &["--dataset", missing.to_str().unwrap(), "locate", "[1.0, 2.0]"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dataset not found"));
}
