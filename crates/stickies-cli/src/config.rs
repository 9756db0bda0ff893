//! Persistent CLI configuration and API URL resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stickies_core::util::normalize_text_option;
use stickies_core::ClientConfig;

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";
pub const API_URL_ENV: &str = "STICKIES_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfigFile {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub filter_debounce_ms: Option<u64>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    dirs::config_dir()
        .map(|dir| dir.join("stickies").join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve config directory".to_string()))
}

impl CliConfigFile {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from_path(&default_config_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!(
                "Failed to read config at {}: {}",
                path.display(),
                error
            ))
        })?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!(
                "Failed to parse config at {}: {}",
                path.display(),
                error
            ))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = default_config_path()?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                CliError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                ))
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)?;
        std::fs::write(path, serialized).map_err(|error| {
            CliError::Config(format!(
                "Failed to write config at {}: {}",
                path.display(),
                error
            ))
        })
    }

    fn normalize(&mut self) {
        self.version = default_config_version();
        self.api_url = normalize_text_option(self.api_url.take());
    }
}

/// Pick the API URL by precedence: flag, then environment, then config file.
pub fn resolve_api_url(
    flag: Option<String>,
    env: Option<String>,
    file: &CliConfigFile,
) -> Option<String> {
    normalize_text_option(flag)
        .or_else(|| normalize_text_option(env))
        .or_else(|| file.api_url.clone())
}

/// Build the client configuration from every source.
pub fn resolve_client_config(
    flag: Option<String>,
    env: Option<String>,
    file: &CliConfigFile,
) -> Result<ClientConfig, CliError> {
    let api_url = resolve_api_url(flag, env, file).ok_or(CliError::MissingApiUrl)?;
    let mut config = ClientConfig::new(api_url)?;
    if let Some(seconds) = file.request_timeout_secs {
        config = config.with_request_timeout_secs(seconds);
    }
    if let Some(millis) = file.filter_debounce_ms {
        config = config.with_filter_debounce_ms(millis);
    }
    Ok(config)
}
