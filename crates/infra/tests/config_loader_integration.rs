//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading a session configuration from
//! files and handing it to a client.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use yametrika_domain::MetrikaError;
use yametrika_infra::{config, Metrika, MetrikaV1};

fn write_config(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    (temp_file, path)
}

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "client_id": "0f3b8c",
        "username": "analyst",
        "password": "s3cret",
        "user_agent": "weekly-report/1.0",
        "timeout_secs": 10,
        "endpoints": {
            "stable_host": "http://127.0.0.1:9000/"
        }
    }"#;
    let (_file, path) = write_config(json_content, "json");

    let config = config::load_from_file(Some(path.clone())).expect("config from JSON");

    assert_eq!(config.client_id, "0f3b8c");
    assert_eq!(config.username, "analyst");
    assert_eq!(config.user_agent, "weekly-report/1.0");
    assert_eq!(config.timeout_secs, 10);
    assert_eq!(config.endpoints.stable_host, "http://127.0.0.1:9000/");
    assert_eq!(config.endpoints.oauth_url, "https://oauth.yandex.ru/token");

    // The loaded config builds a stable session without touching the network
    let metrika = Metrika::new(&config).expect("session");
    assert!(metrika.token().is_none());
    assert_eq!(metrika.user_agent(), "weekly-report/1.0");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
token = "AQAAAA-token"

[endpoints]
beta_host = "http://127.0.0.1:9001"
"#;
    let (_file, path) = write_config(toml_content, "toml");

    let config = config::load_from_file(Some(path.clone())).expect("config from TOML");
    assert_eq!(config.token, "AQAAAA-token");
    assert_eq!(config.endpoints.beta_host, "http://127.0.0.1:9001");

    let beta = MetrikaV1::from_config(&config).expect("beta session");
    assert_eq!(beta.token().map(|t| t.as_str().to_string()), Some("AQAAAA-token".into()));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_without_credentials() {
    let (_file, path) = write_config(r#"{"user_agent": "nobody"}"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(matches!(result, Err(MetrikaError::Config(_))), "Should reject a config with no token or grant");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/yametrika.json".into()));

    match result {
        Err(MetrikaError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let (_file, path) = write_config(r#"{ "this is": "not valid" "#, "json");

    match config::load_from_file(Some(path.clone())) {
        Err(MetrikaError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }

    std::fs::remove_file(path).ok();
}
