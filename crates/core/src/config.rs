//! Configuration management for the Tributary pipeline.
//!
//! Everything is supplied through environment variables (with a `.env` file
//! loaded by the CLI before this runs). Service endpoints that are absent are
//! represented as `None`; the pipeline degrades rather than refusing to start,
//! so a partially configured environment still answers what it can.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Default chat model when none is configured.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Default TTL for cached answers, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Default per-source record limit passed to connectors.
pub const DEFAULT_FETCH_LIMIT: usize = 3;

/// Main pipeline configuration.
///
/// Holds service endpoints for the data sources, the cache, and the LLM
/// provider, plus global CLI behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// PostgreSQL connection string (users and projects sources)
    pub database_url: Option<String>,

    /// MongoDB connection string (design documents source)
    pub mongo_uri: Option<String>,

    /// MongoDB database name
    pub mongo_db: String,

    /// Redis connection string for the answer cache.
    /// When absent the pipeline falls back to an in-process cache.
    pub redis_url: Option<String>,

    /// Base URL of the REST countries API
    pub countries_api_url: String,

    /// LLM provider identifier ("ollama", "openai", "mock")
    pub provider: String,

    /// Chat model identifier
    pub model: String,

    /// Custom LLM endpoint URL
    pub llm_endpoint: Option<String>,

    /// API key for providers that require one
    pub api_key: Option<String>,

    /// TTL for cached answers, in seconds
    pub cache_ttl_secs: u64,

    /// Per-source record limit passed to connectors
    pub fetch_limit: usize,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            mongo_uri: None,
            mongo_db: "tributary".to_string(),
            redis_url: None,
            countries_api_url: "https://restcountries.com/v3.1".to_string(),
            provider: "ollama".to_string(), // Local-first default
            model: DEFAULT_MODEL.to_string(),
            llm_endpoint: None,
            api_key: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            fetch_limit: DEFAULT_FETCH_LIMIT,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `DATABASE_URL`: PostgreSQL connection string
    /// - `MONGO_URI` / `MONGO_DB_NAME`: MongoDB connection and database
    /// - `REDIS_URL`: Redis connection string for the answer cache
    /// - `COUNTRIES_API_URL`: REST countries API base URL
    /// - `TRIBUTARY_PROVIDER` / `TRIBUTARY_MODEL`: LLM provider and model
    /// - `TRIBUTARY_LLM_ENDPOINT` / `TRIBUTARY_API_KEY`: provider overrides
    /// - `TRIBUTARY_CACHE_TTL`: answer TTL in seconds
    /// - `TRIBUTARY_FETCH_LIMIT`: per-source record limit
    /// - `RUST_LOG` / `NO_COLOR`: logging behavior
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        config.database_url = std::env::var("DATABASE_URL").ok();
        config.mongo_uri = std::env::var("MONGO_URI").ok();
        if let Ok(db) = std::env::var("MONGO_DB_NAME") {
            config.mongo_db = db;
        }
        config.redis_url = std::env::var("REDIS_URL").ok();
        if let Ok(url) = std::env::var("COUNTRIES_API_URL") {
            config.countries_api_url = url;
        }

        if let Ok(provider) = std::env::var("TRIBUTARY_PROVIDER") {
            config.provider = provider;
        }
        if let Ok(model) = std::env::var("TRIBUTARY_MODEL") {
            config.model = model;
        }
        config.llm_endpoint = std::env::var("TRIBUTARY_LLM_ENDPOINT").ok();
        config.api_key = std::env::var("TRIBUTARY_API_KEY").ok();

        if let Ok(ttl) = std::env::var("TRIBUTARY_CACHE_TTL") {
            config.cache_ttl_secs = ttl
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid TRIBUTARY_CACHE_TTL: {}", ttl)))?;
        }
        if let Ok(limit) = std::env::var("TRIBUTARY_FETCH_LIMIT") {
            config.fetch_limit = limit
                .parse()
                .map_err(|_| AppError::Config(format!("Invalid TRIBUTARY_FETCH_LIMIT: {}", limit)))?;
        }

        config.log_level = std::env::var("RUST_LOG").ok();
        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables.
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["ollama", "openai", "mock"];

        if !known_providers.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        if self.provider == "openai" && self.api_key.is_none() {
            return Err(AppError::Config(
                "openai provider requires TRIBUTARY_API_KEY".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.fetch_limit, 3);
        assert!(config.database_url.is_none());
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_with_overrides() {
        let config = PipelineConfig::default().with_overrides(
            Some("mock".to_string()),
            Some("test-model".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(config.provider, "mock");
        assert_eq!(config.model, "test-model");
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_validate_unknown_provider() {
        let mut config = PipelineConfig::default();
        config.provider = "unknown".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_openai_requires_key() {
        let mut config = PipelineConfig::default();
        config.provider = "openai".to_string();
        assert!(config.validate().is_err());

        config.api_key = Some("sk-test".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ollama() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
    }
}
