//! Registry of setting handlers.

use std::collections::HashMap;

use super::handlers::{
    base_url_handler, model_handler, step_delay_max_handler, step_delay_min_handler,
    system_instruction_handler, TemperatureHandler, ThemeHandler,
};
use super::SettingHandler;

/// Registry of all available setting handlers.
pub struct SettingRegistry {
    handlers: HashMap<&'static str, Box<dyn SettingHandler>>,
    /// Keys in display order for `vibe set` output.
    display_order: Vec<&'static str>,
}

impl SettingRegistry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            display_order: Vec::new(),
        };

        registry.register(Box::new(model_handler()));
        registry.register(Box::new(base_url_handler()));
        registry.register(Box::new(TemperatureHandler));
        registry.register(Box::new(ThemeHandler));
        registry.register(Box::new(step_delay_min_handler()));
        registry.register(Box::new(step_delay_max_handler()));
        registry.register(Box::new(system_instruction_handler()));

        registry
    }

    fn register(&mut self, handler: Box<dyn SettingHandler>) {
        let key = handler.key();
        self.display_order.push(key);
        self.handlers.insert(key, handler);
    }

    /// Get a handler by key.
    pub fn get(&self, key: &str) -> Option<&dyn SettingHandler> {
        self.handlers.get(key).map(|h| h.as_ref())
    }

    /// Get all keys in display order.
    pub fn keys_display_order(&self) -> &[&'static str] {
        &self.display_order
    }
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;

    #[test]
    fn every_key_is_reachable() {
        let registry = SettingRegistry::new();
        assert_eq!(registry.keys_display_order().len(), 7);
        for key in registry.keys_display_order() {
            let handler = registry.get(key).expect("registered");
            assert_eq!(handler.key(), *key);
            assert!(handler.format(&Config::default()).contains(key));
        }
    }

    #[test]
    fn unknown_keys_are_absent() {
        assert!(SettingRegistry::new().get("default-provider").is_none());
    }
}
