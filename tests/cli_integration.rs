//! Integration tests for the geoip-provider binary
//!
//! Runs the compiled binary against a JSON range database.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const DATABASE: &str = r#"{
    "ranges": [
        {
            "start": "8.8.8.0", "end": "8.8.8.255",
            "country_code": "US", "region": "CA", "city": "Mountain View",
            "latitude": 37.4192, "longitude": -122.0574,
            "country_name": "United States"
        }
    ]
}"#;

fn run(db_path: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_geoip-provider"))
        .args(args)
        .env("GEOIP_BACKEND", "json")
        .env("GEOIP_DB_PATH", db_path)
        .env_remove("GEOIP_REGIONS_PATH")
        .env_remove("DEBUG")
        .output()
        .unwrap()
}

fn database_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DATABASE.as_bytes()).unwrap();
    file
}

#[test]
fn test_cli_resolves_address() {
    let file = database_file();
    let output = run(file.path().to_str().unwrap(), &["8.8.8.8"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(records[0]["countryCode"], "US");
    assert_eq!(records[0]["region"], "California");
    assert_eq!(records[0]["timezone"], "America/Los_Angeles");
}

#[test]
fn test_cli_reports_failures_per_address() {
    let file = database_file();
    let output = run(file.path().to_str().unwrap(), &["127.0.0.1", "not-an-ip"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);

    let localhost: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(localhost[0]["locality"], "localhost");

    let failure: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(failure["address"], "not-an-ip");
    assert!(failure["error"].as_str().unwrap().contains("unsupported input"));
}

#[test]
fn test_cli_missing_database_fails() {
    let output = run("/nonexistent/ranges.json", &["8.8.8.8"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cli_requires_addresses() {
    let file = database_file();
    let output = run(file.path().to_str().unwrap(), &[]);

    assert!(!output.status.success());
}
