use super::data::{path_display, Config};
use super::io::{api_key_from, ConfigError};
use crate::core::constants::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::core::theme::Theme;
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.model(), DEFAULT_MODEL);
    assert_eq!(config.theme(), Theme::Obsidian);
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        model: Some("gemini-test".to_string()),
        theme: Some(Theme::CyberpunkNeon),
        temperature: Some(1.2),
        ..Default::default()
    };
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);

    let cleared = Config {
        theme: None,
        ..loaded
    };
    cleared
        .save_to_path(&config_path)
        .expect("Failed to save config");

    let reloaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(reloaded.theme, None);
    assert_eq!(reloaded.model.as_deref(), Some("gemini-test"));
}

#[test]
fn theme_is_stored_by_identifier() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");

    Config {
        theme: Some(Theme::TrustBlue),
        ..Default::default()
    }
    .save_to_path(&config_path)
    .expect("Failed to save config");

    let contents = std::fs::read_to_string(&config_path).expect("Failed to read config");
    assert!(contents.contains("theme = \"trust-blue\""));
}

#[test]
fn invalid_toml_reports_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "model = [unterminated").expect("write failed");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn unknown_theme_is_a_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "theme = \"sepia\"\n").expect("write failed");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn defaults_fill_unset_fields() {
    let config = Config::default();
    assert_eq!(config.temperature(), DEFAULT_TEMPERATURE);
    assert_eq!(
        config.step_delay_bounds(),
        (Duration::from_millis(400), Duration::from_millis(700))
    );
    assert!(config.system_instruction().contains("VIBE_OS Architect"));
}

#[test]
fn step_delay_bounds_are_ordered() {
    let config = Config {
        step_delay_min_ms: Some(900),
        step_delay_max_ms: Some(100),
        ..Default::default()
    };
    assert_eq!(
        config.step_delay_bounds(),
        (Duration::from_millis(100), Duration::from_millis(900))
    );
}

#[test]
fn api_key_lookup_respects_precedence() {
    let vars: HashMap<&str, &str> = [("GEMINI_API_KEY", "gemini"), ("API_KEY", "generic")]
        .into_iter()
        .collect();
    let key = api_key_from(|name| vars.get(name).map(|v| v.to_string()));
    assert_eq!(key.as_deref(), Some("gemini"));
}

#[test]
fn api_key_lookup_skips_blank_values() {
    let vars: HashMap<&str, &str> = [("VIBE_API_KEY", "  "), ("API_KEY", "generic")]
        .into_iter()
        .collect();
    let key = api_key_from(|name| vars.get(name).map(|v| v.to_string()));
    assert_eq!(key.as_deref(), Some("generic"));
    assert_eq!(api_key_from(|_| None), None);
}

#[test]
#[cfg(unix)]
fn path_display_abbreviates_home() {
    let Some(home) = std::env::var_os("HOME") else {
        return;
    };
    let path = std::path::PathBuf::from(home).join(".config").join("vibe");
    assert_eq!(path_display(&path), "~/.config/vibe");
}
