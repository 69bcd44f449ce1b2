#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OutputFormat};

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_positive_number, validate_url, Validate};
use std::time::Duration;
use toml_config::{TomlConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECONDS, LOG_LEVELS};

/// Effective settings after merging the optional TOML file with
/// command-line overrides. Flags win over the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    pub accept_invalid_certs: bool,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            accept_invalid_certs: false,
            log_level: None,
            log_json: false,
        }
    }
}

/// Values given on the command line; `None`/`false` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub accept_invalid_certs: bool,
}

impl Settings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: &Overrides) -> Self {
        let mut settings = match file {
            Some(file) => Settings {
                api_base_url: file.store.base_url.clone(),
                timeout_seconds: file.timeout_seconds(),
                accept_invalid_certs: file.accept_invalid_certs(),
                log_level: file.log_level().map(str::to_string),
                log_json: file.log_json(),
            },
            None => Settings::default(),
        };

        if let Some(url) = &overrides.api_base_url {
            settings.api_base_url = url.clone();
        }
        if let Some(timeout) = overrides.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        settings.accept_invalid_certs |= overrides.accept_invalid_certs;

        settings
    }
}

impl ConfigProvider for Settings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        if let Some(level) = &self.log_level {
            validate_one_of("log_level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}
