//! Configuration module for handling environment variables and .env files

use crate::client::{VoatClient, VoatError, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use dotenv::dotenv;
use log::info;
use std::env;

/// Application configuration derived from environment variables and .env file
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Voat API credentials
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,

    // Voat API settings
    pub base_url: String,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            username: None,
            password: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn load() -> Self {
        // Try to load .env file, but continue even if it doesn't exist
        match dotenv() {
            Ok(_) => info!("Loaded environment from .env file"),
            Err(_) => info!("No .env file found, using system environment variables only"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup, falling back to defaults
    /// for settings that are absent or blank.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: lookup("VOAT_API_KEY"),
            username: lookup("VOAT_USERNAME"),
            password: lookup("VOAT_PASSWORD"),
            base_url: lookup("VOAT_BASE_URL").unwrap_or(defaults.base_url),
            user_agent: lookup("VOAT_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    pub fn require_api_key(&self) -> Result<String, VoatError> {
        self.api_key
            .clone()
            .ok_or(VoatError::MissingConfig("VOAT_API_KEY"))
    }

    pub fn require_username(&self) -> Result<String, VoatError> {
        self.username
            .clone()
            .ok_or(VoatError::MissingConfig("VOAT_USERNAME"))
    }

    pub fn require_password(&self) -> Result<String, VoatError> {
        self.password
            .clone()
            .ok_or(VoatError::MissingConfig("VOAT_PASSWORD"))
    }

    /// Create a VoatClient from this configuration
    pub fn create_client(&self) -> Result<VoatClient, VoatError> {
        VoatClient::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_settings_use_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(matches!(
            config.require_api_key(),
            Err(VoatError::MissingConfig("VOAT_API_KEY"))
        ));
        assert!(config.create_client().is_err());
    }

    #[test]
    fn reads_all_settings() {
        let config = config_from(&[
            ("VOAT_API_KEY", "key"),
            ("VOAT_USERNAME", "alice"),
            ("VOAT_PASSWORD", "hunter2"),
            ("VOAT_BASE_URL", "http://localhost:9000"),
            ("VOAT_USER_AGENT", "tests/1.0"),
        ]);
        assert_eq!(config.require_api_key().unwrap(), "key");
        assert_eq!(config.require_username().unwrap(), "alice");
        assert_eq!(config.require_password().unwrap(), "hunter2");

        let client = config.create_client().unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:9000/");
        assert_eq!(client.user_agent, "tests/1.0");
    }

    #[test]
    fn blank_values_count_as_missing() {
        let config = config_from(&[("VOAT_API_KEY", "  "), ("VOAT_BASE_URL", "")]);
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
