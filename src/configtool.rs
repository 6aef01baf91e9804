//  _  __           ____            __ _
// | |/ /___ _   _ / ___|_ __ __ _ / _| |_
// | ' // _ \ | | | |   | '__/ _` | |_| __|
// | . \  __/ |_| | |___| | | (_| |  _| |_
// |_|\_\___|\__, |\____|_|  \__,_|_|  \__|
//           |___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2026-10-19
// Version : 0.1.0
// License : Mulan PSL v2
//
// Config Tools

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::passgen::Mode;

pub const DEFAULT_WORDS_ENDPOINT: &str = "https://wordsapiv1.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "wordsapiv1.p.rapidapi.com";

pub const ENV_API_KEY: &str = "KEYCRAFT_API_KEY";
pub const ENV_WORDS_ENDPOINT: &str = "KEYCRAFT_WORDS_ENDPOINT";
pub const ENV_API_HOST: &str = "KEYCRAFT_API_HOST";
pub const ENV_CLIPBOARD_CLEAR: &str = "KEYCRAFT_CLIPBOARD_CLEAR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config directory error: {0}")]
    ConfigDirError(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Runtime configuration. Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub words_endpoint: String,
    pub api_host: String,
    pub api_key: Option<String>,
    /// Zero disables the request timeout.
    pub request_timeout_secs: u64,
    /// Zero keeps copied values on the clipboard.
    pub clipboard_clear_secs: u64,
    pub default_length: usize,
    pub default_mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words_endpoint: DEFAULT_WORDS_ENDPOINT.to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
            api_key: None,
            request_timeout_secs: 10,
            clipboard_clear_secs: 20,
            default_length: 12,
            default_mode: Mode::Alphanumeric,
        }
    }
}

impl Config {
    /// Applies overrides from `lookup`, which is `std::env::var` in
    /// production.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(endpoint) = lookup(ENV_WORDS_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.words_endpoint = endpoint;
        }
        if let Some(host) = lookup(ENV_API_HOST).filter(|v| !v.trim().is_empty()) {
            self.api_host = host;
        }
        if let Some(raw) = lookup(ENV_CLIPBOARD_CLEAR) {
            self.clipboard_clear_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_CLIPBOARD_CLEAR.to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }
}

/// 获取配置目录
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let base = config_dir()
        .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
    Ok(base.join("keycraft"))
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    Ok(get_config_dir()?.join("config.json"))
}

/// Reads the file at `path`; a missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        log::debug!("No config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Loads the user's config file and applies environment overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = get_config_path()?;
    load_config_from(&path)?.apply_env(|key| env::var(key).ok())
}
