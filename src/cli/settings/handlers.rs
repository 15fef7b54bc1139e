//! Handlers for each configuration key.

use super::{SettingError, SettingHandler};
use crate::core::config::data::Config;
use crate::core::constants::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_STEP_DELAY_MAX_MS, DEFAULT_STEP_DELAY_MIN_MS,
    DEFAULT_TEMPERATURE,
};
use crate::core::session::valid_temperature;
use crate::core::theme::Theme;

fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

fn success_unset(key: &str) -> String {
    format!("✅ Unset {key} (will use default)")
}

/// Truncate a string to `max_chars` characters, appending "..." if truncated.
fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    let mut chars = s.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}...")
    } else {
        truncated
    }
}

/// A free-text setting stored as `Option<String>`.
pub struct StringSetting {
    key: &'static str,
    field: fn(&mut Config) -> &mut Option<String>,
    current: fn(&Config) -> Option<&str>,
    default_display: &'static str,
    example: &'static str,
}

impl SettingHandler for StringSetting {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let value = args.join(" ");
        if value.trim().is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "Provide a value after the key:",
                example: self.example,
            });
        }
        let display = truncate_with_ellipsis(&value.replace('\n', " "), 50);
        *(self.field)(config) = Some(value);
        Ok(success_set(self.key, &display))
    }

    fn unset(&self, config: &mut Config) -> String {
        *(self.field)(config) = None;
        success_unset(self.key)
    }

    fn format(&self, config: &Config) -> String {
        match (self.current)(config) {
            Some(value) => format!(
                "  {}: {}",
                self.key,
                truncate_with_ellipsis(&value.replace('\n', " "), 50)
            ),
            None => format!("  {}: (unset, default: {})", self.key, self.default_display),
        }
    }
}

pub fn model_handler() -> StringSetting {
    StringSetting {
        key: "model",
        field: |config| &mut config.model,
        current: |config| config.model.as_deref(),
        default_display: DEFAULT_MODEL,
        example: "vibe set model gemini-2.5-flash",
    }
}

pub fn base_url_handler() -> StringSetting {
    StringSetting {
        key: "base-url",
        field: |config| &mut config.base_url,
        current: |config| config.base_url.as_deref(),
        default_display: DEFAULT_BASE_URL,
        example: "vibe set base-url https://generativelanguage.googleapis.com/v1beta",
    }
}

pub fn system_instruction_handler() -> StringSetting {
    StringSetting {
        key: "system-instruction",
        field: |config| &mut config.system_instruction,
        current: |config| config.system_instruction.as_deref(),
        default_display: "built-in",
        example: "vibe set system-instruction \"Responda sempre em JSON\"",
    }
}

/// A millisecond bound for the simulated step pacing.
pub struct MillisSetting {
    key: &'static str,
    field: fn(&mut Config) -> &mut Option<u64>,
    current: fn(&Config) -> Option<u64>,
    default_ms: u64,
}

impl SettingHandler for MillisSetting {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let input = args.join(" ");
        if input.trim().is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "Provide a number of milliseconds:",
                example: "vibe set step-delay-max 900",
            });
        }
        let value = input
            .trim()
            .parse::<u64>()
            .map_err(|_| SettingError::InvalidNumber {
                key: self.key,
                input: input.clone(),
            })?;
        *(self.field)(config) = Some(value);
        Ok(success_set(self.key, &format!("{value} ms")))
    }

    fn unset(&self, config: &mut Config) -> String {
        *(self.field)(config) = None;
        success_unset(self.key)
    }

    fn format(&self, config: &Config) -> String {
        match (self.current)(config) {
            Some(value) => format!("  {}: {value} ms", self.key),
            None => format!("  {}: (unset, default: {} ms)", self.key, self.default_ms),
        }
    }
}

pub fn step_delay_min_handler() -> MillisSetting {
    MillisSetting {
        key: "step-delay-min",
        field: |config| &mut config.step_delay_min_ms,
        current: |config| config.step_delay_min_ms,
        default_ms: DEFAULT_STEP_DELAY_MIN_MS,
    }
}

pub fn step_delay_max_handler() -> MillisSetting {
    MillisSetting {
        key: "step-delay-max",
        field: |config| &mut config.step_delay_max_ms,
        current: |config| config.step_delay_max_ms,
        default_ms: DEFAULT_STEP_DELAY_MAX_MS,
    }
}

/// Handler for the `temperature` setting.
pub struct TemperatureHandler;

impl SettingHandler for TemperatureHandler {
    fn key(&self) -> &'static str {
        "temperature"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "Provide a temperature between 0.0 and 2.0:",
                example: "vibe set temperature 0.4",
            });
        };
        let value = input
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|value| valid_temperature(*value))
            .ok_or_else(|| SettingError::InvalidTemperature(input.clone()))?;
        config.temperature = Some(value);
        Ok(success_set("temperature", &value.to_string()))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.temperature = None;
        success_unset("temperature")
    }

    fn format(&self, config: &Config) -> String {
        match config.temperature {
            Some(value) => format!("  temperature: {value}"),
            None => format!("  temperature: (unset, default: {DEFAULT_TEMPERATURE})"),
        }
    }
}

/// Handler for the `theme` setting.
pub struct ThemeHandler;

impl SettingHandler for ThemeHandler {
    fn key(&self) -> &'static str {
        "theme"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "Provide a theme id:",
                example: "vibe set theme cyberpunk-neon",
            });
        };
        let theme = Theme::try_from(input.as_str()).map_err(|_| SettingError::UnknownTheme {
            input: input.clone(),
        })?;
        config.theme = Some(theme);
        Ok(success_set("theme", theme.as_str()))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.theme = None;
        success_unset("theme")
    }

    fn format(&self, config: &Config) -> String {
        match config.theme {
            Some(theme) => format!("  theme: {}", theme.as_str()),
            None => format!("  theme: (unset, default: {})", Theme::default().as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn string_setting_joins_words() {
        let mut config = Config::default();
        let message = system_instruction_handler()
            .set(&args(&["Seja", "breve"]), &mut config)
            .expect("set");
        assert_eq!(config.system_instruction.as_deref(), Some("Seja breve"));
        assert_eq!(message, "✅ Set system-instruction to: Seja breve");
    }

    #[test]
    fn string_setting_requires_a_value() {
        let mut config = Config::default();
        let err = model_handler()
            .set(&[], &mut config)
            .expect_err("missing");
        assert!(matches!(err, SettingError::MissingArgs { .. }));
    }

    #[test]
    fn temperature_is_range_checked() {
        let mut config = Config::default();
        TemperatureHandler
            .set(&args(&["1.25"]), &mut config)
            .expect("valid");
        assert_eq!(config.temperature, Some(1.25));

        for bad in ["2.5", "-0.1", "warm"] {
            let err = TemperatureHandler
                .set(&args(&[bad]), &mut config)
                .expect_err("invalid");
            assert!(matches!(err, SettingError::InvalidTemperature(_)));
        }
        assert_eq!(config.temperature, Some(1.25));
    }

    #[test]
    fn theme_rejects_unknown_ids() {
        let mut config = Config::default();
        ThemeHandler
            .set(&args(&["Trust-Blue"]), &mut config)
            .expect("valid");
        assert_eq!(config.theme, Some(Theme::TrustBlue));

        let err = ThemeHandler
            .set(&args(&["sepia"]), &mut config)
            .expect_err("invalid");
        assert!(matches!(err, SettingError::UnknownTheme { .. }));
    }

    #[test]
    fn millis_setting_parses_integers() {
        let mut config = Config::default();
        step_delay_max_handler()
            .set(&args(&["900"]), &mut config)
            .expect("valid");
        assert_eq!(config.step_delay_max_ms, Some(900));

        let err = step_delay_min_handler()
            .set(&args(&["fast"]), &mut config)
            .expect_err("invalid");
        assert!(matches!(err, SettingError::InvalidNumber { .. }));
    }

    #[test]
    fn unset_restores_default_display() {
        let mut config = Config {
            theme: Some(Theme::GlassWhite),
            ..Default::default()
        };
        assert_eq!(ThemeHandler.format(&config), "  theme: glass-white");
        ThemeHandler.unset(&mut config);
        assert_eq!(config.theme, None);
        assert_eq!(
            ThemeHandler.format(&config),
            "  theme: (unset, default: obsidian)"
        );
    }
}
