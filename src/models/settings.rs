//! Application Settings Models
//!
//! Configuration for the plan generation engine, persisted as JSON at
//! ~/.plan-forge/config.json.

use serde::{Deserialize, Serialize};

/// Default Anthropic-compatible messages endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// Default generation model
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Default maximum output tokens for a generation call
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Base URL of the generation API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Model used for analysis and content generation
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum output tokens per generation call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key; when absent the deterministic fallback generator is used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_key: None,
        }
    }
}

impl AppConfig {
    /// Validate the configuration, returning a message on failure
    pub fn validate(&self) -> Result<(), String> {
        if self.api_base_url.trim().is_empty() {
            return Err("apiBaseUrl must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("maxTokens must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Apply a partial update in place
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(api_base_url) = update.api_base_url {
            self.api_base_url = api_base_url;
        }
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(max_tokens) = update.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(api_key) = update.api_key {
            self.api_key = if api_key.is_empty() { None } else { Some(api_key) };
        }
    }
}

/// Partial settings update; None fields are left unchanged.
/// An empty api_key string clears the stored key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}
