//! Configuration for the reagent binary.
//!
//! Configuration can be set via environment variables:
//! - `API_KEY` - Required. API key for the generation service.
//! - `BASE_URL` - Required. Base URL of an OpenAI-compatible API.
//! - `MODEL_ID` - Required. Model identifier.
//! - `TIMEOUT` - Optional. Whole-request timeout in seconds. Defaults to `60`.
//! - `MAX_STEPS` - Optional. Step bound for the agent loop. Defaults to `5`.
//! - `PROMPT_TEMPLATE` - Optional. Path to a prompt template file. Defaults
//!   to the built-in template.
//!
//! The env loader exists for the binary entry point; the agent core only
//! ever receives explicit values.

use std::path::PathBuf;
use thiserror::Error;

use crate::agent::DEFAULT_MAX_STEPS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the generation service
    pub api_key: String,

    /// Base URL of an OpenAI-compatible API
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Step bound for the agent loop
    pub max_steps: usize,

    /// Optional prompt template file
    pub prompt_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `API_KEY`, `BASE_URL` or
    /// `MODEL_ID` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = require_env("API_KEY")?;
        let base_url = require_env("BASE_URL")?;
        let model = require_env("MODEL_ID")?;

        let timeout_secs = std::env::var("TIMEOUT")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("TIMEOUT".to_string(), format!("{}", e)))?;

        let max_steps = std::env::var("MAX_STEPS")
            .unwrap_or_else(|_| DEFAULT_MAX_STEPS.to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_STEPS".to_string(), format!("{}", e)))?;

        let prompt_path = std::env::var("PROMPT_TEMPLATE").ok().map(PathBuf::from);

        Ok(Self {
            api_key,
            base_url,
            model,
            timeout_secs,
            max_steps,
            prompt_path,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            api_key,
            base_url,
            model,
            timeout_secs: 60,
            max_steps: DEFAULT_MAX_STEPS,
            prompt_path: None,
        }
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}
