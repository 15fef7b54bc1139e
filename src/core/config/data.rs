use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_STEP_DELAY_MAX_MS, DEFAULT_STEP_DELAY_MIN_MS,
    DEFAULT_SYSTEM_INSTRUCTION, DEFAULT_TEMPERATURE,
};
use crate::core::theme::Theme;

/// Persisted user settings. Every field is optional in the file; the
/// accessors fill in defaults.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Model name passed to `generateContent`
    pub model: Option<String>,
    /// API root, e.g. "https://generativelanguage.googleapis.com/v1beta"
    pub base_url: Option<String>,
    /// Sampling temperature, 0.0 to 2.0
    pub temperature: Option<f32>,
    /// Theme the store starts with
    pub theme: Option<Theme>,
    pub step_delay_min_ms: Option<u64>,
    pub step_delay_max_ms: Option<u64>,
    /// Replaces the built-in system instruction
    pub system_instruction: Option<String>,
}

impl Config {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn theme(&self) -> Theme {
        self.theme.unwrap_or_default()
    }

    pub fn system_instruction(&self) -> &str {
        self.system_instruction
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_INSTRUCTION)
    }

    /// Per-stage pause bounds, normalized so `min <= max`.
    pub fn step_delay_bounds(&self) -> (Duration, Duration) {
        let min = self.step_delay_min_ms.unwrap_or(DEFAULT_STEP_DELAY_MIN_MS);
        let max = self.step_delay_max_ms.unwrap_or(DEFAULT_STEP_DELAY_MAX_MS);
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        (Duration::from_millis(min), Duration::from_millis(max))
    }
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
