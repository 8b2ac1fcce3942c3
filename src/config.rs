//! Configuration management for toolchat.
//!
//! Configuration can be set via environment variables:
//! - `OLLAMA_BASE_URL` - Optional. Base URL of the Ollama server. Defaults to `http://ollama:11434`.
//! - `MODEL_NAME` - Optional. The model to use for completions. Defaults to `llama3`.
//! - `HOST` - Optional. Server host. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Server port. Defaults to `5000`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations; must be at
//!   least 1. Defaults to `2`.
//! - `MATCH_THRESHOLD` - Optional. Minimum fuzzy-match score (0-100) for
//!   resolving a model-proposed tool name. Defaults to `80`.
//! - `ORACLE_TIMEOUT_SECS` - Optional. Wall-clock timeout per completion
//!   call. Defaults to `120`.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Ollama server
    pub ollama_base_url: String,

    /// Model identifier passed to Ollama
    pub model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,

    /// Minimum similarity score (0-100) for accepting a fuzzy tool-name match
    pub match_threshold: u8,

    /// Wall-clock timeout for a single completion call
    pub oracle_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let ollama_base_url = std::env::var("OLLAMA_BASE_URL")
            .unwrap_or_else(|_| "http://ollama:11434".to_string());

        let model = std::env::var("MODEL_NAME").unwrap_or_else(|_| "llama3".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_iterations: usize = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "2".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e))
            })?;
        if max_iterations == 0 {
            // A zero bound would skip the loop entirely and reply with an
            // empty fallback string.
            return Err(ConfigError::InvalidValue(
                "MAX_ITERATIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let match_threshold = std::env::var("MATCH_THRESHOLD")
            .unwrap_or_else(|_| "80".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("MATCH_THRESHOLD".to_string(), format!("{}", e))
            })?;

        let oracle_timeout_secs: u64 = std::env::var("ORACLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("ORACLE_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            ollama_base_url,
            model,
            host,
            port,
            max_iterations,
            match_threshold,
            oracle_timeout: Duration::from_secs(oracle_timeout_secs),
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(ollama_base_url: String, model: String) -> Self {
        Self {
            ollama_base_url,
            model,
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_iterations: 2,
            match_threshold: 80,
            oracle_timeout: Duration::from_secs(120),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = Config::new("http://localhost:11434".to_string(), "llama3".to_string());
        assert_eq!(config.max_iterations, 2);
        assert_eq!(config.match_threshold, 80);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_zero_max_iterations_rejected() {
        std::env::set_var("MAX_ITERATIONS", "0");
        let err = Config::from_env().unwrap_err();
        std::env::remove_var("MAX_ITERATIONS");
        assert!(
            matches!(err, ConfigError::InvalidValue(var, _) if var == "MAX_ITERATIONS"),
        );
    }
}
