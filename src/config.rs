//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::provider::{DEFAULT_TIMEOUT_SECS, DEFAULT_TRANSLATION};
use crate::constants::reader::DEFAULT_START_REFERENCE;
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application version
    app_version: String,
    /// Edge function endpoint that serves passage text
    pub api_url: Option<String>,
    /// Backend anon key sent with each request
    pub api_key: Option<String>,
    /// Translation code forwarded to the provider (e.g. "RVR1960")
    pub translation: String,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
    /// JSON catalogue overriding the built-in book list
    pub catalogue_path: Option<PathBuf>,
    /// Reference opened when the reader starts
    pub start_reference: String,
}

impl Config {
    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            api_url: None,
            api_key: None,
            translation: DEFAULT_TRANSLATION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            catalogue_path: None,
            start_reference: DEFAULT_START_REFERENCE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Fails when `LAMPARA_TIMEOUT_SECS` is set but is not a positive integer.
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        config.api_url = non_empty_var("LAMPARA_API_URL");
        config.api_key = non_empty_var("LAMPARA_API_KEY");

        if let Some(translation) = non_empty_var("LAMPARA_TRANSLATION") {
            config.translation = translation;
        }

        if let Some(secs) = non_empty_var("LAMPARA_TIMEOUT_SECS") {
            config.timeout_secs = parse_timeout(&secs)?;
        }

        if let Some(start) = non_empty_var("LAMPARA_START") {
            config.start_reference = start;
        }

        // Catalogue: env var override, or default <config dir>/lampara/catalogue.json
        config.catalogue_path = env::var("LAMPARA_CATALOGUE").ok().map_or_else(
            || {
                dirs::config_dir()
                    .map(|d| d.join("lampara").join("catalogue.json"))
                    .filter(|p| p.is_file())
            },
            |path| Some(PathBuf::from(shellexpand::tilde(&path).to_string())),
        );

        Ok(config)
    }

    /// Check if a text provider endpoint is configured
    pub const fn has_text_provider(&self) -> bool {
        self.api_url.is_some()
    }
}

fn parse_timeout(value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(Error::config(
            format!("LAMPARA_TIMEOUT_SECS must be a positive number of seconds, got '{value}'"),
            "Set LAMPARA_TIMEOUT_SECS to e.g. 30, or unset it",
        )),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn defaults_have_no_provider() {
        let config = Config::default();
        assert!(!config.has_text_provider());
        assert_eq!(config.translation, "RVR1960");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.start_reference, "Juan 1");
    }

    #[test]
    fn provider_detected_from_url() {
        let config = Config {
            api_url: Some("https://example.test/functions/v1/bible".to_string()),
            ..Config::default()
        };
        assert!(config.has_text_provider());
    }

    #[test]
    fn timeout_must_be_positive_integer() {
        assert_eq!(parse_timeout("45").unwrap(), 45);

        for bad in ["0", "-3", "ten", "1.5"] {
            let err = parse_timeout(bad).unwrap_err();
            assert!(matches!(err, Error::Config { .. }), "{bad} should be rejected");
            assert!(err.to_string().contains("LAMPARA_TIMEOUT_SECS"));
        }
    }
}
