//! Integration tests for Settings loading from a TOML file.
//!
//! These tests never touch the real global config; they pass an explicit
//! file (in a temp directory) in its place.

use std::fs;

use tempfile::TempDir;

use treedag::application::ApplicationError;
use treedag::config::Settings;
use treedag::domain::MatchStrategy;

#[test]
fn given_missing_file_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_from(Some(&dir.path().join("treedag.toml"))).expect("load settings");

    assert_eq!(settings.strategy, MatchStrategy::Linear);
    assert!(!settings.stats);
}

#[test]
fn given_file_with_scalars_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treedag.toml");
    fs::write(
        &path,
        r#"
strategy = "canonical"
stats = true
"#,
    )
    .unwrap();

    let settings = Settings::load_from(Some(&path)).expect("load settings");

    assert_eq!(settings.strategy, MatchStrategy::Canonical);
    assert!(settings.stats);
}

#[test]
fn given_file_without_strategy_when_load_then_inherits_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treedag.toml");
    fs::write(&path, "stats = true\n").unwrap();

    let settings = Settings::load_from(Some(&path)).expect("load settings");

    assert_eq!(settings.strategy, MatchStrategy::Linear);
    assert!(settings.stats);
}

#[test]
fn given_malformed_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treedag.toml");
    fs::write(&path, "strategy = \"quadratic\"\n").unwrap();

    let err = Settings::load_from(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("treedag.toml"));
}

#[test]
fn given_malformed_file_when_load_or_default_then_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("treedag.toml");
    fs::write(&path, "stats = \"yes\"\n").unwrap();

    let settings = Settings::load_or_default_from(Some(&path));

    assert_eq!(settings, Settings::default());
}
