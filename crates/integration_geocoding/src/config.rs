//! Geocoding service configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of search results per query
    #[serde(default = "default_max_results")]
    pub max_results: u8,

    /// Preferred response language (`accept-language`)
    #[serde(default = "default_language")]
    pub language: String,

    /// Comma-separated ISO country codes to restrict searches to (empty = worldwide)
    #[serde(default)]
    pub country_filter: String,

    /// Cache TTL for search results in seconds (0 to disable)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Minimum spacing between requests in milliseconds (Nominatim allows 1 req/s)
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_max_results() -> u8 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

const fn default_cache_ttl_secs() -> u64 {
    600
}

const fn default_min_request_interval_ms() -> u64 {
    1000
}

fn default_user_agent() -> String {
    "Waypoint/1.0".to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            language: default_language(),
            country_filter: String::new(),
            cache_ttl_secs: default_cache_ttl_secs(),
            min_request_interval_ms: default_min_request_interval_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            cache_ttl_secs: 0,
            min_request_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_secs > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        if self.max_results > 50 {
            return Err("max_results must be 50 or less".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}
