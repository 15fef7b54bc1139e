//! Settings management for CLI set/unset commands.
//!
//! Each configuration key has a [`SettingHandler`]; the [`SettingRegistry`]
//! looks handlers up by key and lists them in display order. Handlers edit an
//! in-memory [`Config`]; loading and saving happen in [`run_set`] and
//! [`run_unset`].

pub mod error;
pub mod handlers;
pub mod registry;

pub use error::SettingError;
pub use registry::SettingRegistry;

use crate::core::config::data::{path_display, Config};

/// Trait for handling a configuration setting.
pub trait SettingHandler {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Set the value from the words given after the key.
    ///
    /// Returns a success message to display.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the value so the default applies again.
    fn unset(&self, config: &mut Config) -> String;

    /// Format the current value for display in `vibe set` output.
    fn format(&self, config: &Config) -> String;
}

/// Keys are accepted with hyphens or underscores.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('_', "-")
}

pub fn print_settings(registry: &SettingRegistry, config: &Config) {
    println!("Current configuration:");
    for key in registry.keys_display_order() {
        if let Some(handler) = registry.get(key) {
            println!("{}", handler.format(config));
        }
    }
    if let Ok(path) = Config::config_path() {
        println!("\nConfig file: {}", path_display(path));
    }
}

fn load_config() -> Result<Config, SettingError> {
    Config::load().map_err(|err| SettingError::ConfigError(err.to_string()))
}

fn save_config(config: &Config) -> Result<(), SettingError> {
    config
        .save()
        .map_err(|err| SettingError::ConfigError(err.to_string()))
}

/// `vibe set <key> <value...>`; with no key, print every setting.
pub fn run_set(key: Option<String>, value: Vec<String>) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let mut config = load_config()?;

    let Some(key) = key else {
        print_settings(&registry, &config);
        return Ok(String::new());
    };

    let key = normalize_key(&key);
    let handler = registry
        .get(&key)
        .ok_or_else(|| SettingError::UnknownKey(key.clone()))?;
    let message = handler.set(&value, &mut config)?;
    save_config(&config)?;
    Ok(message)
}

pub fn run_unset(key: String) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let key = normalize_key(&key);
    let handler = registry
        .get(&key)
        .ok_or_else(|| SettingError::UnknownKey(key.clone()))?;

    let mut config = load_config()?;
    let message = handler.unset(&mut config);
    save_config(&config)?;
    Ok(message)
}
