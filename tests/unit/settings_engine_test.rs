use std::fs;

use ostap::services::settings_engine::{SettingsEngine, SettingsEngineTrait, SETTINGS_FILE_NAME};
use ostap::types::settings::ShellSettings;
use serde_json::json;
use tempfile::TempDir;

fn engine_in(dir: &TempDir) -> SettingsEngine {
    SettingsEngine::new(Some(dir.path().join(SETTINGS_FILE_NAME)))
}

#[test]
fn test_missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings, ShellSettings::default());
    assert_eq!(settings.surface.navigate_debounce_ms, 50);
    assert_eq!(settings.navigation.default_scheme, "https");
}

#[test]
fn test_set_value_persists_and_reloads() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    engine
        .set_value("navigation.search_url", json!("https://duckduckgo.com/?q="))
        .unwrap();
    assert!(engine.get_config_path().exists());

    let mut reloaded = engine_in(&dir);
    let settings = reloaded.load().unwrap();
    assert_eq!(settings.navigation.search_url, "https://duckduckgo.com/?q=");
}

#[test]
fn test_set_value_updates_shortcut_map() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    engine.set_value("shortcuts.reload", json!("F5")).unwrap();
    assert_eq!(engine.get_settings().shortcuts["reload"], "F5");
}

#[test]
fn test_set_value_rejects_empty_and_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    assert!(engine.set_value("", json!(1)).is_err());
    assert!(engine.set_value("nowhere.at_all", json!(1)).is_err());
    assert!(!engine.get_config_path().exists());
}

#[test]
fn test_partial_file_fills_missing_sections() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(SETTINGS_FILE_NAME),
        r#"{"surface":{"navigate_debounce_ms":120}}"#,
    )
    .unwrap();
    let mut engine = engine_in(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.surface.navigate_debounce_ms, 120);
    assert_eq!(settings.window, ShellSettings::default().window);
    assert_eq!(settings.shortcuts, ShellSettings::default_shortcuts());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(SETTINGS_FILE_NAME), "[1, 2").unwrap();
    let mut engine = engine_in(&dir);
    assert!(engine.load().is_err());
}

#[test]
fn test_reset_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    engine.set_value("window.width", json!(900)).unwrap();
    engine.reset().unwrap();
    let mut reloaded = engine_in(&dir);
    assert_eq!(reloaded.load().unwrap(), ShellSettings::default());
}
