use std::env;

use serde::Serialize;
use stickies_core::config::{normalize_base_url, MIN_FILTER_DEBOUNCE_MS};
use stickies_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config::{
    default_config_path, resolve_api_url, resolve_client_config, CliConfigFile, API_URL_ENV,
};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ResolvedConfig {
    config_path: String,
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    filter_debounce_ms: u64,
}

pub fn run_config(command: ConfigCommands, global_api_url: Option<String>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_url,
            timeout_secs,
            filter_debounce_ms,
        } => run_config_init(api_url.or(global_api_url), timeout_secs, filter_debounce_ms),
        ConfigCommands::Show => run_config_show(global_api_url),
    }
}

pub fn run_config_init(
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    filter_debounce_ms: Option<u64>,
) -> Result<(), CliError> {
    let mut config = CliConfigFile::load()?;

    if let Some(url) = normalize_text_option(api_url) {
        config.api_url = Some(normalize_base_url(&url)?);
    }
    if timeout_secs.is_some() {
        config.request_timeout_secs = timeout_secs;
    }
    if filter_debounce_ms.is_some() {
        config.filter_debounce_ms = filter_debounce_ms;
    }
    if config.api_url.is_none() {
        return Err(CliError::Config(
            "An API URL is required. Pass --api-url <URL>".to_string(),
        ));
    }

    let path = config.save()?;
    println!("Saved config to {}", path.display());
    Ok(())
}

pub fn run_config_show(global_api_url: Option<String>) -> Result<(), CliError> {
    let path = default_config_path()?;
    let file = CliConfigFile::load_from_path(&path)?;
    let env_url = env::var(API_URL_ENV).ok();

    let resolved = if resolve_api_url(global_api_url.clone(), env_url.clone(), &file).is_some() {
        let client = resolve_client_config(global_api_url, env_url, &file)?;
        ResolvedConfig {
            config_path: path.display().to_string(),
            api_url: Some(client.base_url),
            request_timeout_secs: client.request_timeout_secs,
            filter_debounce_ms: client.filter_debounce_ms,
        }
    } else {
        ResolvedConfig {
            config_path: path.display().to_string(),
            api_url: None,
            request_timeout_secs: file.request_timeout_secs,
            filter_debounce_ms: file
                .filter_debounce_ms
                .map_or(MIN_FILTER_DEBOUNCE_MS, |millis| millis.max(MIN_FILTER_DEBOUNCE_MS)),
        }
    };

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
