//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub store: StoreConfig,
    pub feed: FeedConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Record store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store (local development and tests)
    #[default]
    Memory,
    /// Hosted record-storage API over HTTP
    Http,
}

/// Record store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Base URL of the hosted record API (required for the http backend)
    pub base_url: Option<String>,
    /// Project identifier sent with every request
    pub project_id: Option<String>,
    /// API key sent with every request
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Artificial latency for the memory backend, to mimic the hosted
    /// store's cold-start behavior locally. Zero disables it.
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

/// Feed composition tuning
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Below this many following-authored posts, the feed is padded with
    /// supplemental content
    #[serde(default = "default_supplement_threshold")]
    pub supplement_threshold: usize,
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
    /// How many recent posts to pull as trending candidates
    #[serde(default = "default_trending_limit")]
    pub trending_limit: i64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            supplement_threshold: default_supplement_threshold(),
            default_page_size: default_page_size(),
            trending_limit: default_trending_limit(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "pulse".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_supplement_threshold() -> usize {
    5
}

fn default_page_size() -> i64 {
    10
}

fn default_trending_limit() -> i64 {
    20
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error when the http backend is selected but its required
    /// variables are missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = env::var("STORE_BACKEND")
            .ok()
            .map(|s| match s.to_lowercase().as_str() {
                "http" => Ok(StoreBackend::Http),
                "memory" => Ok(StoreBackend::Memory),
                other => Err(ConfigError::InvalidValue("STORE_BACKEND", other.to_string())),
            })
            .transpose()?
            .unwrap_or_default();

        let store = StoreConfig {
            backend,
            base_url: env::var("STORE_BASE_URL").ok(),
            project_id: env::var("STORE_PROJECT_ID").ok(),
            api_key: env::var("STORE_API_KEY").ok(),
            request_timeout_secs: env::var("STORE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_request_timeout_secs),
            simulated_latency_ms: env::var("STORE_SIMULATED_LATENCY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        };

        if backend == StoreBackend::Http {
            if store.base_url.is_none() {
                return Err(ConfigError::MissingVar("STORE_BASE_URL"));
            }
            if store.api_key.is_none() {
                return Err(ConfigError::MissingVar("STORE_API_KEY"));
            }
        }

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            store,
            feed: FeedConfig {
                supplement_threshold: env::var("FEED_SUPPLEMENT_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_supplement_threshold),
                default_page_size: env::var("FEED_DEFAULT_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_page_size),
                trending_limit: env::var("FEED_TRENDING_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_trending_limit),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_flags() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Development.is_production());
        assert!(Environment::Development.is_development());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "pulse");
        assert_eq!(default_supplement_threshold(), 5);
        assert_eq!(default_page_size(), 10);
        assert_eq!(default_trending_limit(), 20);
    }

    #[test]
    fn test_feed_config_default() {
        let feed = FeedConfig::default();
        assert_eq!(feed.supplement_threshold, 5);
        assert_eq!(feed.default_page_size, 10);
    }
}
