use crate::error::CligptError;
use anyhow::{Result, anyhow};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    100
}

fn default_loglevel() -> String {
    "info".to_string()
}

/// Sampling temperature used when the config file does not set one.
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

/// Temperature for the completion-only entry point when unconfigured; low so
/// shell-completion output stays predictable.
pub const COMPLETE_MODE_TEMPERATURE: f32 = 0.1;

/// Per-call-kind token limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxTokens {
    #[serde(default = "default_max_tokens")]
    pub command: u32,
    #[serde(default = "default_max_tokens")]
    pub explanation: u32,
}

impl Default for MaxTokens {
    fn default() -> Self {
        Self {
            command: default_max_tokens(),
            explanation: default_max_tokens(),
        }
    }
}

/// Per-call-kind sampling temperatures.
///
/// Unset fields stay `None` so entry points can apply their own default
/// (interactive mode wants 0.9, complete mode wants 0.1).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(default)]
    pub command: Option<f32>,
    #[serde(default)]
    pub explanation: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub max_tokens: MaxTokens,
    #[serde(default)]
    pub temperature: Temperature,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            max_tokens: MaxTokens::default(),
            temperature: Temperature::default(),
            loglevel: default_loglevel(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment variables, or defaults.
    pub fn load() -> Result<Self> {
        let mut config = match Self::get_config_path() {
            Ok(path) => Self::load_from_path(&path).unwrap_or_else(|_| {
                info!("No config file found, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        // Environment variables override config file
        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            config.openai_api_key = Some(api_key);
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            info!("Loaded config from: {}", path.display());
            Ok(config)
        } else {
            Err(anyhow!("Config file not found"))
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        info!("Saved config to: {}", config_path.display());
        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let home = home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        Ok(home.join(".cligpt").join("config.toml"))
    }

    /// Set API key and save config.
    pub fn set_api_key(&mut self, api_key: String) -> Result<()> {
        self.openai_api_key = Some(api_key);
        self.save()?;
        info!("API key saved to config file");
        Ok(())
    }

    /// Returns the API key, failing fast before any network call when absent.
    pub fn api_key(&self) -> Result<&str> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| CligptError::MissingCredential.into())
    }

    /// Temperature for "command" completions, defaulted when unconfigured.
    pub fn command_temperature(&self) -> f32 {
        self.temperature.command.unwrap_or(DEFAULT_TEMPERATURE)
    }

    /// Temperature for "explanation" completions, defaulted when unconfigured.
    pub fn explanation_temperature(&self) -> f32 {
        self.temperature.explanation.unwrap_or(DEFAULT_TEMPERATURE)
    }

    pub fn show_config_info() -> Result<()> {
        let config_path = Self::get_config_path()?;
        println!("Configuration file: {}", config_path.display());

        if config_path.exists() {
            println!("Status: Found");
            let config = Self::load_from_path(&config_path)?;
            println!(
                "API key: {}",
                if config.openai_api_key.is_some() { "Set" } else { "Not set" }
            );
            println!("Model: {}", config.model);
            println!(
                "Max tokens: command={} explanation={}",
                config.max_tokens.command, config.max_tokens.explanation
            );
            println!(
                "Temperature: command={} explanation={}",
                config.command_temperature(),
                config.explanation_temperature()
            );
            println!("Log level: {}", config.loglevel);
        } else {
            println!("Status: Not found (using defaults)");
        }

        println!("\nTo set API key:");
        println!("  cligpt --set-api-key <your-key>");
        println!("\nOr set environment variable:");
        println!("  export OPENAI_API_KEY=<your-key>");

        Ok(())
    }
}
