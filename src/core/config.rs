use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::completion::DEFAULT_MAX_ATTEMPTS;
use crate::core::cost::pricing;
use crate::core::generator::DEFAULT_CHARGE_PRICE;
use crate::core::models::request::{GenerationInput, DEFAULT_LENGTH, DEFAULT_MODEL, DEFAULT_TONE};
use crate::core::providers::openrouter::{
    AppIdentity, CHAT_COMPLETIONS_URL, DEFAULT_REFERER, DEFAULT_TIMEOUT_SECS, DEFAULT_TITLE,
};
use crate::core::providers::transport::validate_endpoint;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_format")]
    pub default_format: String,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_format() -> String {
    "text".to_string()
}
fn default_color() -> String {
    "auto".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            color: default_color(),
        }
    }
}

/// Defaults for generation options not given on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_length")]
    pub length: u32,
    #[serde(default = "default_true")]
    pub include_image_suggestions: bool,
    #[serde(default = "default_true")]
    pub seo_optimized: bool,
    #[serde(default = "default_charge_price")]
    pub charge_price: f64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}
fn default_length() -> u32 {
    DEFAULT_LENGTH
}
fn default_true() -> bool {
    true
}
fn default_charge_price() -> f64 {
    DEFAULT_CHARGE_PRICE
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            tone: default_tone(),
            length: default_length(),
            include_image_suggestions: true,
            seo_optimized: true,
            charge_price: default_charge_price(),
        }
    }
}

impl GenerationConfig {
    /// Config defaults as the lowest-priority generation input.
    pub fn as_input(&self, api_key: Option<String>) -> GenerationInput {
        GenerationInput {
            topic: None,
            keywords: None,
            tone: Some(self.tone.clone()),
            length: Some(self.length),
            include_image_suggestions: Some(self.include_image_suggestions),
            seo_optimized: Some(self.seo_optimized),
            model: Some(self.model.clone()),
            openrouter_api_key: api_key,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default = "default_referer")]
    pub referer: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    CHAT_COMPLETIONS_URL.to_string()
}
fn default_referer() -> String {
    DEFAULT_REFERER.to_string()
}
fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            referer: default_referer(),
            title: default_title(),
            max_attempts: default_max_attempts(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn identity(&self) -> AppIdentity {
        AppIdentity {
            referer: self.referer.clone(),
            title: self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl AppConfig {
    /// Get the config file path, respecting XDG_CONFIG_HOME
    pub fn config_path() -> PathBuf {
        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            });
        config_dir.join("blogsmith").join("config.toml")
    }

    /// Load config from the default path, falling back to defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Serialize and write this config to the config file path.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Validate the config
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !["text", "json"].contains(&self.settings.default_format.as_str()) {
            issues.push(format!(
                "Invalid default_format: '{}' (must be 'text' or 'json')",
                self.settings.default_format
            ));
        }
        if !["auto", "always", "never"].contains(&self.settings.color.as_str()) {
            issues.push(format!(
                "Invalid color: '{}' (must be 'auto', 'always', or 'never')",
                self.settings.color
            ));
        }

        let generation = &self.generation;
        if generation.model.trim().is_empty() {
            issues.push("generation.model must not be empty".to_string());
        }
        if generation.length == 0 {
            issues.push("generation.length must be a positive word count".to_string());
        }
        if !generation.charge_price.is_finite() || generation.charge_price <= 0.0 {
            issues.push(format!(
                "generation.charge_price must be positive, got {}",
                generation.charge_price
            ));
        }

        if let Err(e) = validate_endpoint(&self.api.endpoint) {
            issues.push(format!("api.endpoint: {}", e));
        }
        if self.api.max_attempts == 0 {
            issues.push("api.max_attempts must be at least 1".to_string());
        }
        if self.api.timeout_secs == 0 {
            issues.push("api.timeout_secs must be at least 1".to_string());
        }
        issues
    }

    /// Non-fatal observations, e.g. a model with no known pricing.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if pricing::lookup(&self.generation.model).is_none() {
            warnings.push(format!(
                "No pricing for '{}'; costs will be estimated with {} rates (known: {})",
                self.generation.model,
                DEFAULT_MODEL,
                pricing::known_models().collect::<Vec<_>>().join(", ")
            ));
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        let issues = config.validate();
        assert!(issues.is_empty(), "Default config should be valid, got: {:?}", issues);
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn default_format_is_text() {
        let settings = Settings::default();
        assert_eq!(settings.default_format, "text");
    }

    #[test]
    fn default_generation_values() {
        let generation = GenerationConfig::default();
        assert_eq!(generation.model, "openai/gpt-4o");
        assert_eq!(generation.tone, "professional");
        assert_eq!(generation.length, 1000);
        assert!(generation.include_image_suggestions);
        assert!(generation.seo_optimized);
        assert!((generation.charge_price - 1.0).abs() < 1e-12);
    }

    #[test]
    fn default_api_values() {
        let api = ApiConfig::default();
        assert_eq!(api.endpoint, "https://openrouter.ai/api/v1/chat/completions");
        assert_eq!(api.max_attempts, 3);
        assert_eq!(api.timeout_secs, 120);
        assert!(api.api_key.is_none());
    }

    #[test]
    fn validate_catches_invalid_format() {
        let mut config = AppConfig::default();
        config.settings.default_format = "xml".to_string();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("default_format")));
    }

    #[test]
    fn validate_catches_invalid_color() {
        let mut config = AppConfig::default();
        config.settings.color = "blue".to_string();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("color")));
    }

    #[test]
    fn validate_rejects_plain_http_endpoint() {
        let mut config = AppConfig::default();
        config.api.endpoint = "http://openrouter.ai/api/v1/chat/completions".to_string();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("must use HTTPS")));
    }

    #[test]
    fn validate_rejects_non_positive_charge() {
        let mut config = AppConfig::default();
        config.generation.charge_price = 0.0;
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("charge_price")));
    }

    #[test]
    fn validate_rejects_zero_attempts_and_length() {
        let mut config = AppConfig::default();
        config.api.max_attempts = 0;
        config.generation.length = 0;
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("max_attempts")));
        assert!(issues.iter().any(|i| i.contains("length")));
    }

    #[test]
    fn unpriced_model_is_a_warning_not_an_issue() {
        let mut config = AppConfig::default();
        config.generation.model = "mistralai/mistral-large".to_string();
        assert!(config.validate().is_empty());
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("mistralai/mistral-large"));
    }

    #[test]
    fn parse_minimal_toml() {
        let toml = r#"
[settings]
default_format = "json"
color = "always"
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.settings.default_format, "json");
        assert_eq!(config.settings.color, "always");
        assert_eq!(config.generation.model, "openai/gpt-4o");
    }

    #[test]
    fn parse_generation_and_api_toml() {
        let toml = r#"
[generation]
model = "anthropic/claude-3.5-sonnet"
tone = "witty"
charge_price = 2.5

[api]
api_key = "sk-or-from-config"
max_attempts = 5
"#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.generation.model, "anthropic/claude-3.5-sonnet");
        assert_eq!(config.generation.tone, "witty");
        assert_eq!(config.generation.length, 1000);
        assert!((config.generation.charge_price - 2.5).abs() < 1e-12);
        assert_eq!(config.api.api_key.as_deref(), Some("sk-or-from-config"));
        assert_eq!(config.api.max_attempts, 5);
        assert_eq!(config.api.timeout_secs, 120);
    }

    #[test]
    fn parse_empty_toml_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.settings.default_format, "text");
        assert_eq!(config.settings.color, "auto");
        assert_eq!(config.api.title, "blogsmith");
    }

    #[test]
    fn generation_defaults_as_input() {
        let input = GenerationConfig::default().as_input(Some("k".into()));
        let req = input.into_request();
        assert_eq!(req.model, "openai/gpt-4o");
        assert_eq!(req.credential.expose(), "k");
        assert!(req.topic.is_empty());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert!(parsed.validate().is_empty());
        assert_eq!(parsed.generation.model, "openai/gpt-4o");
    }

    #[test]
    fn config_path_uses_xdg_when_set() {
        std::env::set_var("XDG_CONFIG_HOME", "/tmp/test_xdg_config");
        let path = AppConfig::config_path();
        std::env::remove_var("XDG_CONFIG_HOME");
        assert_eq!(path, PathBuf::from("/tmp/test_xdg_config/blogsmith/config.toml"));
    }
}
