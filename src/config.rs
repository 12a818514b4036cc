// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;
use std::path::PathBuf;

use crate::core::suggest::SUGGESTION_LIMIT;

pub const DEFAULT_TAGS_DIR: &str = "tags";
pub const DEFAULT_STATE_FILE: &str = "config.json";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub keybindings: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Int(i64),
    String(String),
}

impl Config {
    /// Bind a key name to a command
    pub fn bind(&mut self, key: &str, command: &str) {
        self.keybindings
            .insert(key.to_string(), command.to_string());
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    /// Get integer setting
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    /// Get string setting
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Directory holding the tag source files
    pub fn tags_dir(&self) -> PathBuf {
        PathBuf::from(self.get_string("tags_dir").unwrap_or(DEFAULT_TAGS_DIR))
    }

    /// Suggestion cap; anything below 1 falls back to the default
    pub fn max_suggestions(&self) -> usize {
        self.get_int("max_suggestions")
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n >= 1)
            .unwrap_or(SUGGESTION_LIMIT)
    }

    /// Where remembered application state lives
    pub fn state_file(&self) -> PathBuf {
        PathBuf::from(self.get_string("state_file").unwrap_or(DEFAULT_STATE_FILE))
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.keybindings.is_empty());
        assert!(config.settings.is_empty());
        assert_eq!(config.tags_dir(), PathBuf::from("tags"));
        assert_eq!(config.max_suggestions(), 50);
        assert_eq!(config.state_file(), PathBuf::from("config.json"));
    }

    #[test]
    fn test_bind_key() {
        let mut config = Config::default();
        config.bind("Tab", "cycle-suggestion");
        assert_eq!(
            config.keybindings.get("Tab"),
            Some(&"cycle-suggestion".to_string())
        );
    }

    #[test]
    fn test_set_get_settings() {
        let mut config = Config::default();

        config.set("int_setting", 42);
        assert_eq!(config.get_int("int_setting"), Some(42));

        config.set("string_setting", "hello");
        assert_eq!(config.get_string("string_setting"), Some("hello"));
    }

    #[test]
    fn test_type_mismatch() {
        let mut config = Config::default();
        config.set("val", 10);
        // Should return None if type doesn't match
        assert_eq!(config.get_string("val"), None);
        config.set("val", "ten");
        assert_eq!(config.get_int("val"), None);
    }

    #[test]
    fn test_max_suggestions_bounds() {
        let mut config = Config::default();
        config.set("max_suggestions", 0);
        assert_eq!(config.max_suggestions(), 50);
        config.set("max_suggestions", -3);
        assert_eq!(config.max_suggestions(), 50);
        config.set("max_suggestions", 12);
        assert_eq!(config.max_suggestions(), 12);
        config.set("max_suggestions", "many");
        assert_eq!(config.max_suggestions(), 50);
    }

    #[test]
    fn test_typed_overrides() {
        let mut config = Config::default();
        config.set("tags_dir", "/srv/tags");
        config.set("state_file", String::from("state.json"));
        assert_eq!(config.tags_dir(), PathBuf::from("/srv/tags"));
        assert_eq!(config.state_file(), PathBuf::from("state.json"));
    }
}
