use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::conversation::{
    DEFAULT_MAX_RETRIES, DEFAULT_TEMPERATURE, GenerationConfig, validate_model,
    validate_temperature,
};
use crate::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::paths;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Defaults in the `[chat]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatDefaults {
    /// Default model name.
    pub model: Option<String>,
    /// Default sampling temperature.
    pub temperature: Option<f64>,
    /// Delivery attempts per message.
    pub max_retries: Option<u32>,
    /// API root, for proxies.
    pub endpoint: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/gemini-chat/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub chat: ChatDefaults,
}

/// CLI overrides. These take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_retries: Option<u32>,
}

/// Resolved configuration after merging CLI arguments, config file and
/// built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub generation: GenerationConfig,
    pub max_retries: u32,
    pub endpoint: String,
}

/// Resolves configuration. Priority: CLI option, then config file, then
/// built-in default.
///
/// # Errors
///
/// Returns an error if the temperature or model is invalid, or if
/// `max_retries` is zero.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let defaults = &config_file.chat;

    let model = options
        .model
        .as_deref()
        .or(defaults.model.as_deref())
        .unwrap_or(DEFAULT_MODEL);
    validate_model(model)?;

    let temperature = options
        .temperature
        .or(defaults.temperature)
        .unwrap_or(DEFAULT_TEMPERATURE);
    validate_temperature(temperature)?;

    let max_retries = options
        .max_retries
        .or(defaults.max_retries)
        .unwrap_or(DEFAULT_MAX_RETRIES);
    if max_retries == 0 {
        bail!("Invalid configuration: max_retries must be at least 1");
    }

    let endpoint = defaults
        .endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    Ok(ResolvedConfig {
        generation: GenerationConfig::new(temperature, model)?,
        max_retries,
        endpoint,
    })
}

/// Returned when no API key is available at startup.
#[derive(Debug, thiserror::Error)]
#[error(
    "API key not found!\n\n\
     Please create a .env file in the working directory with:\n  \
     GOOGLE_API_KEY=your_api_key_here\n\n\
     Or export it:\n  \
     export GOOGLE_API_KEY=\"your_api_key_here\"\n\n\
     Get an API key from: https://aistudio.google.com/app/apikey"
)]
pub struct MissingApiKey;

/// Reads the API key from the environment. An empty value counts as missing.
pub fn load_api_key() -> Result<String, MissingApiKey> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(MissingApiKey),
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/gemini-chat/config.toml`
    /// or `~/.config/gemini-chat/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
