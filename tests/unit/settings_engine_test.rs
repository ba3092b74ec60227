//! Integration-level tests for the SettingsEngine public API.
//!
//! Each test works on a config file inside its own temp directory.

use std::fs;

use webview_shell::services::settings_engine::{
    resolve_start_url, SettingsEngine, SettingsEngineTrait, DEFAULT_URL,
};
use webview_shell::types::errors::ConfigError;
use webview_shell::types::settings::{CacheMode, MixedContentMode, ShellSettings};
use tempfile::TempDir;

fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir.path().join("shell.json").to_string_lossy().to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_defaults_match_browser_capabilities() {
    let settings = ShellSettings::default();
    let browser = &settings.browser;

    assert!(settings.start_url.is_none());
    assert!(browser.javascript_enabled);
    assert!(browser.dom_storage_enabled && browser.database_enabled);
    assert!(browser.allow_file_access && browser.allow_content_access);
    assert!(browser.zoom_enabled);
    assert!(!browser.display_zoom_controls);
    assert!(browser.use_wide_viewport && browser.load_with_overview_mode);
    assert!(!browser.media_playback_requires_user_gesture);
    assert_eq!(browser.mixed_content, MixedContentMode::AlwaysAllow);
    assert_eq!(browser.cache_mode, CacheMode::Default);
    assert!(browser.geolocation_enabled);
    assert!(!browser.support_multiple_windows);
    assert!(!browser.javascript_can_open_windows_automatically);
    assert_eq!(browser.user_agent_suffix, "WebViewApp/1.0");
    assert!(browser.accept_cookies && browser.accept_third_party_cookies);
    assert_eq!(settings.logging.filter, "info");
}

#[test]
fn test_set_value_persists_changes() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine
            .set_value("browser.support_multiple_windows", serde_json::json!(true))
            .unwrap();
        engine.set_value("window.title", serde_json::json!("Desa")).unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert!(settings.browser.support_multiple_windows);
    assert_eq!(settings.window.title, "Desa");
}

#[test]
fn test_set_value_unknown_key() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("browser.does_not_exist", serde_json::json!(1));
    assert!(matches!(result, Err(ConfigError::InvalidKey(_))));
}

#[test]
fn test_set_value_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    let result = engine.set_value("window.width", serde_json::json!("wide"));
    assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    assert_eq!(engine.get_settings().window.width, 420);
}

#[test]
fn test_user_agent_base_can_be_set_from_null() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine
        .set_value("browser.user_agent_base", serde_json::json!("Mozilla/5.0"))
        .unwrap();
    assert_eq!(
        engine.get_settings().browser.user_agent(),
        "Mozilla/5.0 WebViewApp/1.0"
    );
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.set_value("start_url", serde_json::json!("https://desa.example")).unwrap();

    engine.reset().unwrap();

    let mut reloaded = engine_in_temp(&dir);
    assert_eq!(reloaded.load().unwrap(), ShellSettings::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let engine_path = dir.path().join("shell.json");
    fs::write(&engine_path, "{ not json").unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(matches!(engine.load(), Err(ConfigError::SerializationError(_))));
}

#[test]
fn test_invalid_start_url_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("shell.json"), r#"{"start_url":"market://details"}"#).unwrap();

    let mut engine = engine_in_temp(&dir);
    assert!(matches!(engine.load(), Err(ConfigError::InvalidUrl(_))));
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b").join("shell.json");
    let mut engine = SettingsEngine::new(Some(nested.to_string_lossy().to_string()));
    engine.load().unwrap();
    engine.save().unwrap();
    assert!(nested.exists());
}

#[test]
fn test_blank_everywhere_resolves_default() {
    assert_eq!(resolve_start_url(None, None).unwrap(), DEFAULT_URL);
    assert_eq!(resolve_start_url(Some(""), Some(" \t")).unwrap(), DEFAULT_URL);
}
