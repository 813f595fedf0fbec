//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use shiftline_infra::config;
use tempfile::Builder;

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "storage": { "path": "/var/lib/shiftline/history.db", "pool_size": 8 },
        "history": { "max_entries_per_day": 40, "retention_days": 10 },
        "backend": { "base_url": "https://reports.example.com/api", "timeout_seconds": 20 },
        "clock": { "tick_interval_ms": 500, "utc_offset_minutes": 480 }
    }"#;

    let mut file = Builder::new().suffix(".json").tempfile().expect("temp file");
    file.write_all(json_content.as_bytes()).expect("write config");

    let config = config::load_from_file(Some(file.path().to_path_buf())).expect("config loaded");

    assert_eq!(config.storage.path, "/var/lib/shiftline/history.db");
    assert_eq!(config.storage.pool_size, 8);
    assert_eq!(config.history.max_entries_per_day, 40);
    assert_eq!(config.backend.timeout_seconds, 20);
    assert_eq!(config.clock.utc_offset_minutes, Some(480));
}

#[test]
fn test_load_config_from_toml_file_with_defaults() {
    let toml_content = r#"
[storage]
path = "shiftline.db"
pool_size = 2

[backend]
base_url = "http://localhost:8080/api"
timeout_seconds = 15
"#;

    let mut file = Builder::new().suffix(".toml").tempfile().expect("temp file");
    file.write_all(toml_content.as_bytes()).expect("write config");

    let config = config::load_from_file(Some(file.path().to_path_buf())).expect("config loaded");

    assert_eq!(config.storage.pool_size, 2);
    assert_eq!(config.history.max_entries_per_day, 50);
    assert_eq!(config.history.retention_days, 30);
    assert_eq!(config.clock.tick_interval_ms, 1000);
    assert_eq!(config.clock.utc_offset_minutes, None);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut file = Builder::new().suffix(".json").tempfile().expect("temp file");
    file.write_all(br#"{ "storage": { "path": "" , "pool_size": 1 } }"#).expect("write config");
    assert!(config::load_from_file(Some(file.path().to_path_buf())).is_err());

    let mut broken = Builder::new().suffix(".toml").tempfile().expect("temp file");
    broken.write_all(b"[storage\npath = ").expect("write config");
    let err = config::load_from_file(Some(broken.path().to_path_buf())).unwrap_err();
    assert!(err.to_string().contains("TOML"));
}
