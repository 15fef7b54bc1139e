//! Error types for settings operations.

use std::fmt;

/// Errors that can occur when modifying configuration settings.
#[derive(Debug)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    /// The provided theme identifier was not found.
    UnknownTheme { input: String },
    /// The temperature was not a number in 0.0..=2.0.
    InvalidTemperature(String),
    /// A millisecond value was not a non-negative integer.
    InvalidNumber { key: &'static str, input: String },
    /// Required arguments are missing.
    MissingArgs {
        hint: &'static str,
        example: &'static str,
    },
    /// An error occurred while loading or persisting the configuration.
    ConfigError(String),
}

impl SettingError {
    /// Print the error message to stderr with appropriate formatting.
    pub fn print(&self) {
        match self {
            SettingError::UnknownKey(key) => {
                eprintln!("❌ Unknown config key: {key}");
                eprintln!("   Run 'vibe set' to list the available keys.");
            }
            SettingError::UnknownTheme { input } => {
                eprintln!("❌ Unknown theme: {input}. Run 'vibe themes' to list available themes.");
            }
            SettingError::InvalidTemperature(input) => {
                eprintln!("❌ Invalid temperature: {input}");
                eprintln!("   Use a number between 0.0 and 2.0");
            }
            SettingError::InvalidNumber { key, input } => {
                eprintln!("❌ Invalid value for {key}: {input}");
                eprintln!("   Use a whole number of milliseconds");
            }
            SettingError::MissingArgs { hint, example } => {
                eprintln!("⚠️  {hint}");
                eprintln!("Example: {example}");
            }
            SettingError::ConfigError(msg) => {
                eprintln!("❌ Failed to save configuration: {msg}");
            }
        }
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::UnknownTheme { input } => write!(f, "Unknown theme: {input}"),
            SettingError::InvalidTemperature(input) => {
                write!(f, "Invalid temperature: {input}")
            }
            SettingError::InvalidNumber { key, input } => {
                write!(f, "Invalid value for {key}: {input}")
            }
            SettingError::MissingArgs { hint, .. } => write!(f, "{hint}"),
            SettingError::ConfigError(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for SettingError {}
