//! Configuration module for loading TOML config files.
//!
//! The config file only tunes generation and the endpoint. The API key always
//! comes from the environment.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::CoachError;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variables checked, in order, for the API base URL.
pub const API_BASE_VARS: [&str; 2] = ["OPENAI_API_BASE", "OPENAI_BASE_URL"];

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 700;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub generation: GenerationSettings,
}

/// Endpoint configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Parameters applied to every completion request.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Command-line overrides, applied on top of the environment and the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_base: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CoachError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| CoachError::ConfigError(format!("Failed to read config: {}", e)))?;

        Self::from_str(&content)
    }

    /// Load configuration from string content.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, CoachError> {
        let config: Config = toml::from_str(content)
            .map_err(|e| CoachError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment and command-line overrides.
    ///
    /// Priority, highest first: command line, environment, file, defaults.
    /// `lookup` resolves environment variables.
    pub fn resolve<F>(mut self, overrides: &Overrides, lookup: F) -> Result<Self, CoachError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = API_BASE_VARS
            .iter()
            .filter_map(|var| lookup(var))
            .find(|value| !value.trim().is_empty())
        {
            self.api.base = base;
        }

        if let Some(base) = &overrides.api_base {
            self.api.base = base.clone();
        }
        if let Some(model) = &overrides.model {
            self.generation.model = model.clone();
        }
        if let Some(max_tokens) = overrides.max_tokens {
            self.generation.max_tokens = max_tokens;
        }
        if let Some(temperature) = overrides.temperature {
            self.generation.temperature = temperature;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), CoachError> {
        if self.generation.model.trim().is_empty() {
            return Err(CoachError::ConfigError("Model name cannot be empty".to_string()));
        }
        if self.generation.max_tokens == 0 {
            return Err(CoachError::ConfigError(
                "max_tokens must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(CoachError::ConfigError(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.generation.temperature
            )));
        }
        Ok(())
    }
}

/// Read the API key. A missing or blank key is fatal at startup.
pub fn api_key_from<F>(lookup: F) -> Result<String, CoachError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(API_KEY_VAR)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or_else(|| CoachError::MissingApiKey {
            var: API_KEY_VAR.to_string(),
        })
}

/// Default configuration embedded in the binary.
pub fn default_config() -> Config {
    Config::default()
}
