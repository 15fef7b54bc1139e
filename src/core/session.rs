//! Wiring from resolved settings to a ready [`Orchestrator`].

use std::error::Error as StdError;
use std::fmt;

use crate::core::config::io::api_key_from_env;
use crate::core::config::Config;
use crate::core::constants::API_KEY_ENV_VARS;
use crate::core::conversation::Conversation;
use crate::core::generation::GeminiClient;
use crate::core::orchestrator::{JitterPacer, Orchestrator};
use crate::core::store::VibeStore;

pub type Session = Orchestrator<GeminiClient, JitterPacer>;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct SessionOverrides {
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

#[derive(Debug)]
pub enum SessionError {
    MissingApiKey,
    InvalidTemperature(f32),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::MissingApiKey => write!(
                f,
                "No API key found. Set one of: {}",
                API_KEY_ENV_VARS.join(", ")
            ),
            SessionError::InvalidTemperature(value) => {
                write!(f, "Temperature {value} is outside 0.0..=2.0")
            }
        }
    }
}

impl StdError for SessionError {}

pub fn valid_temperature(value: f32) -> bool {
    (0.0..=2.0).contains(&value)
}

pub fn build_session(
    config: &Config,
    overrides: &SessionOverrides,
    conversation: Conversation,
) -> Result<Session, SessionError> {
    let api_key = api_key_from_env().ok_or(SessionError::MissingApiKey)?;
    build_session_with_key(config, overrides, conversation, api_key)
}

pub fn build_session_with_key(
    config: &Config,
    overrides: &SessionOverrides,
    conversation: Conversation,
    api_key: String,
) -> Result<Session, SessionError> {
    let temperature = overrides.temperature.unwrap_or(config.temperature());
    if !valid_temperature(temperature) {
        return Err(SessionError::InvalidTemperature(temperature));
    }
    let model = overrides
        .model
        .clone()
        .unwrap_or_else(|| config.model().to_string());

    let client = GeminiClient::new(
        config.base_url(),
        model,
        api_key,
        config.system_instruction(),
        temperature,
    );
    let (min, max) = config.step_delay_bounds();
    let store = VibeStore::new(config.theme());

    Ok(Orchestrator::new(
        store,
        conversation,
        client,
        JitterPacer::new(min, max),
    ))
}
