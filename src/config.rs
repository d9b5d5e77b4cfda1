use anyhow::Result;
use config::{Config, Environment};
use extract::{LlmSettings, RigAnalyst};
use moka::future::Cache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::schemas::AppState;

/// Application configuration loaded from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
    /// Number of finished analyses kept in the cache
    pub cache_capacity: u64,
    /// Cache time-to-live in seconds
    pub cache_ttl_secs: u64,
    /// Longest document slice sent to the model, in characters
    pub document_char_limit: usize,
    /// LLM provider name
    pub llm_provider: String,
    /// Chat model used for extraction and summaries
    pub llm_model: String,
    /// Environment variable holding the LLM API key
    pub llm_api_key_env: String,
    /// Sampling temperature for metrics extraction
    pub metrics_temperature: f64,
    /// Sampling temperature for summaries
    pub summary_temperature: f64,
}

impl AppConfig {
    /// Load configuration from `PLANLENS_*` environment variables on top of
    /// the built-in defaults.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("bind_address", "0.0.0.0:8000")?
            .set_default("request_timeout_secs", 120_i64)?
            .set_default("max_upload_bytes", 20 * 1024 * 1024_i64)? // 20 MiB
            .set_default("cache_capacity", 1000_i64)?
            .set_default("cache_ttl_secs", 3600_i64)? // 1 hour
            .set_default("document_char_limit", 12_000_i64)?
            .set_default("llm_provider", "openai")?
            .set_default("llm_model", "gpt-4o-mini")?
            .set_default("llm_api_key_env", "OPENAI_API_KEY")?
            .set_default("metrics_temperature", 0.0)?
            .set_default("summary_temperature", 0.7)?
            .add_source(Environment::with_prefix("PLANLENS"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// The LLM slice of the configuration.
    pub fn llm_settings(&self) -> LlmSettings {
        LlmSettings {
            provider: self.llm_provider.clone(),
            model: self.llm_model.clone(),
            api_key_env: self.llm_api_key_env.clone(),
            metrics_temperature: self.metrics_temperature,
            summary_temperature: self.summary_temperature,
            document_char_limit: self.document_char_limit,
        }
    }
}

/// Initialize application state from the loaded configuration
pub fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    tracing::info!("Initializing LLM analyst with model: {}", config.llm_model);
    let analyst = RigAnalyst::from_settings(config.llm_settings())?;

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(config.cache_capacity)
        .time_to_live(Duration::from_secs(config.cache_ttl_secs))
        .build();

    Ok(AppState {
        analyst: Arc::new(analyst),
        cache,
        config: Arc::new(config.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_field() {
        let config = AppConfig::load().expect("defaults should load");

        assert_eq!(config.bind_address, "0.0.0.0:8000");
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.llm_provider, "openai");
        assert_eq!(config.metrics_temperature, 0.0);
        assert_eq!(config.summary_temperature, 0.7);
    }

    #[test]
    fn llm_settings_mirror_the_config() {
        let config = AppConfig::load().expect("defaults should load");
        let settings = config.llm_settings();

        assert_eq!(settings.model, config.llm_model);
        assert_eq!(settings.api_key_env, config.llm_api_key_env);
        assert_eq!(settings.document_char_limit, config.document_char_limit);
    }
}
