//! Integration tests for configuration loading and validation
//!
//! Tests that touch ATF2CTS_* variables hold ENV_MUTEX so overrides from one
//! test do not leak into another.

use atf2cts::config::{load_config, load_config_or_default, parse_config, DEFAULT_CONFIG_PATH};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    let guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    guard
}

fn cleanup_env_vars() {
    for key in [
        "ATF2CTS_APPLICATION_LOG_LEVEL",
        "ATF2CTS_APPLICATION_WORKERS",
        "ATF2CTS_OUTPUT_DATA_ROOT",
        "ATF2CTS_OUTPUT_TEXTGROUP_URN",
        "ATF2CTS_LOGGING_LOCAL_ENABLED",
        "TEST_ATF2CTS_DATA_ROOT",
    ] {
        std::env::remove_var(key);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = lock_env();
    let temp_file = write_config(
        r#"
[application]
log_level = "debug"
workers = 6

[output]
data_root = "/srv/cts/data"
textgroup_urn = "urn:cts:cdli:letters"
textgroup_name = "Old Babylonian letters"
work_description = "Letter converted from ATF."
label_prefix = "OB"
default_language = "akk"

[logging]
local_enabled = true
local_path = "/tmp/atf2cts"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.application.workers, 6);
    assert_eq!(config.application.effective_workers(), 6);
    assert_eq!(config.output.data_root, PathBuf::from("/srv/cts/data"));
    assert_eq!(config.output.textgroup_urn, "urn:cts:cdli:letters");
    assert_eq!(config.output.textgroup_name, "Old Babylonian letters");
    assert_eq!(config.output.label_prefix, "OB");
    assert_eq!(config.output.default_language, "akk");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_config_uses_defaults() {
    let _lock = lock_env();
    let config = parse_config("").unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.application.workers, 0);
    assert!(config.application.effective_workers() >= 1);
    assert_eq!(config.output.data_root, PathBuf::from("data/test"));
    assert_eq!(config.output.textgroup_urn, "urn:cts:cdli:test");
    assert_eq!(config.output.textgroup_name, "atf2cts test examples");
    assert_eq!(config.output.default_language, "und");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = lock_env();
    std::env::set_var("TEST_ATF2CTS_DATA_ROOT", "/data/from/env");

    let config = parse_config(
        r#"
# data_root = "${NOT_SET_BUT_COMMENTED}"
[output]
data_root = "${TEST_ATF2CTS_DATA_ROOT}"
"#,
    )
    .unwrap();

    assert_eq!(config.output.data_root, PathBuf::from("/data/from/env"));
    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = lock_env();
    let err = parse_config("[output]\ndata_root = \"${TEST_ATF2CTS_DATA_ROOT}\"\n").unwrap_err();
    assert!(err.to_string().contains("TEST_ATF2CTS_DATA_ROOT"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _lock = lock_env();
    std::env::set_var("ATF2CTS_APPLICATION_WORKERS", "3");
    std::env::set_var("ATF2CTS_OUTPUT_TEXTGROUP_URN", "urn:cts:cdli:royal");

    let config = parse_config("[application]\nworkers = 9\n").unwrap();
    cleanup_env_vars();

    assert_eq!(config.application.workers, 3);
    assert_eq!(config.output.textgroup_urn, "urn:cts:cdli:royal");
}

#[test]
fn test_invalid_env_override_is_rejected() {
    let _lock = lock_env();
    std::env::set_var("ATF2CTS_APPLICATION_WORKERS", "many");

    let result = parse_config("");
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_validation_errors() {
    let _lock = lock_env();
    let cases = [
        "[application]\nlog_level = \"loud\"\n",
        "[application]\nworkers = 100000\n",
        "[output]\ntextgroup_urn = \"not-a-urn\"\n",
        "[output]\ndata_root = \"\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
    ];
    for case in cases {
        assert!(parse_config(case).is_err(), "accepted: {case}");
    }
}

#[test]
fn test_invalid_toml_fails() {
    let _lock = lock_env();
    assert!(parse_config("[output\n").is_err());
}

#[test]
fn test_named_config_must_exist() {
    let _lock = lock_env();
    assert!(load_config_or_default("definitely-missing.toml").is_err());
    if !std::path::Path::new(DEFAULT_CONFIG_PATH).exists() {
        assert!(load_config_or_default(DEFAULT_CONFIG_PATH).is_ok());
    }
}
