//! End-to-end CLI tests for the clowder binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn clowder(host: &str) -> Command {
    let mut cmd = Command::cargo_bin("clowder").unwrap();
    cmd.env_remove("RUST_LOG")
        .args(["--host", host, "--key", "abc"]);
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("clowder").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clowder files API"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("clowder").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("clowder"));
}

/// Test that a missing key is rejected before any request.
#[test]
fn test_binary_missing_key_returns_error() {
    let mut cmd = Command::cargo_bin("clowder").unwrap();
    cmd.env_remove("CLOWDER_KEY")
        .args(["--host", "https://x.org/", "download", "--file-id", "f1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--key"));
}

/// Test that an unusable host fails with a readable error.
#[test]
fn test_binary_invalid_host_returns_error() {
    clowder("not a host")
        .args(["download", "--file-id", "f1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid Clowder host"));
}

#[tokio::test]
async fn test_binary_download_prints_temp_path() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files/f2"))
        .and(query_param("key", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;
    let temp_dir = tempfile::TempDir::new().unwrap();

    let mut cmd = clowder(&mock_server.uri());
    cmd.env("TMPDIR", temp_dir.path()).args([
        "download",
        "--file-id",
        "f1",
        "--transfer-file-id",
        "f2",
        "--extension",
        ".tif",
    ]);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let downloaded = std::path::PathBuf::from(stdout.trim());
    assert!(downloaded.to_str().unwrap().ends_with(".tif"));
    assert_eq!(std::fs::read(&downloaded).unwrap(), b"hello");
    std::fs::remove_file(&downloaded).ok();
}

#[tokio::test]
async fn test_binary_upload_metadata_from_file() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/files/f1/metadata.jsonld"))
        .and(body_json(json!({"pages": 3})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    let temp_dir = tempfile::TempDir::new().unwrap();
    let metadata = temp_dir.path().join("metadata.json");
    std::fs::write(&metadata, r#"{"pages": 3}"#).unwrap();

    let mut cmd = clowder(&mock_server.uri());
    cmd.args(["upload-metadata", "--file-id", "f1"]).arg(&metadata);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_binary_upload_thumbnail_prints_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fileThumbnail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "T9"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/files/f1/thumbnails/T9"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    let temp_dir = tempfile::TempDir::new().unwrap();
    let thumbnail = temp_dir.path().join("t.png");
    std::fs::write(&thumbnail, b"png").unwrap();

    let mut cmd = clowder(&mock_server.uri());
    cmd.args(["upload-thumbnail", "--file-id", "f1"]).arg(&thumbnail);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "T9");
}

#[tokio::test]
async fn test_binary_http_failure_exits_non_zero_without_key() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    let temp_dir = tempfile::TempDir::new().unwrap();
    let metadata = temp_dir.path().join("metadata.json");
    std::fs::write(&metadata, "{}").unwrap();

    let mut cmd = Command::cargo_bin("clowder").unwrap();
    cmd.env_remove("RUST_LOG")
        .args(["--host", &mock_server.uri(), "--key", "s3cr3t-value"])
        .args(["upload-metadata", "--file-id", "f1"])
        .arg(&metadata);
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("503"), "stderr: {stderr}");
    assert!(!stderr.contains("s3cr3t-value"), "key leaked: {stderr}");
}
