//! Tests for configuration loading and graceful degradation
//!
//! - Missing config file falls back to compiled defaults
//! - EXO_CONFIG points at an explicit file
//! - An explicitly requested file must exist
//!
//! Uses serial_test: tests touching EXO_CONFIG run sequentially.

use exo_common::config::{resolve_config_path, TomlConfig, CONFIG_ENV_VAR};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
#[serial]
fn test_env_var_overrides_default_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");

    env::set_var(CONFIG_ENV_VAR, &path);
    let resolved = resolve_config_path();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(resolved, Some(path));
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();

    env::set_var(CONFIG_ENV_VAR, dir.path().join("absent.toml"));
    let config = TomlConfig::load(None);
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.unwrap(), TomlConfig::default());
}

#[test]
#[serial]
fn test_env_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "port = 6100\nmax_in_flight = 4\n").unwrap();

    env::set_var(CONFIG_ENV_VAR, &path);
    let config = TomlConfig::load(None);
    env::remove_var(CONFIG_ENV_VAR);

    let config = config.unwrap();
    assert_eq!(config.port, 6100);
    assert_eq!(config.max_in_flight, 4);
}

#[test]
fn test_explicit_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "api_url = \"http://10.0.0.5:5780\"\ndatabase_path = \"/tmp/exo/ratings.db\"\n",
    )
    .unwrap();

    let config = TomlConfig::load(Some(&path)).unwrap();
    assert_eq!(config.api_url, "http://10.0.0.5:5780");
    assert_eq!(config.database_path.to_string_lossy(), "/tmp/exo/ratings.db");
    assert_eq!(config.port, 5780);
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = TomlConfig::load(Some(&dir.path().join("nope.toml")));
    assert!(result.is_err());
}
