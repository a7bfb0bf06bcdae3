//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. TTL thresholds are policy knobs, not invariants.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the search backend
    pub base_url: String,
    /// Per-attempt request timeout
    pub request_timeout: Duration,
    /// Total retry attempts per logical request (initial try included)
    pub retry_attempts: u32,
    /// Base delay for exponential backoff between attempts
    pub retry_delay: Duration,
    /// Maximum number of cached responses
    pub cache_max_size: usize,
    /// TTL for unfiltered search responses
    pub search_cache_ttl: Duration,
    /// Shorter TTL for search responses above the large-result threshold
    pub search_cache_ttl_large: Duration,
    /// Result count above which the shorter search TTL applies
    pub large_result_threshold: usize,
    /// TTL for autocomplete responses
    pub autocomplete_cache_ttl: Duration,
    /// TTL for popular-searches responses
    pub popular_cache_ttl: Duration,
    /// TTL for facet-configuration responses
    pub facets_cache_ttl: Duration,
    /// Minimum query length before autocomplete issues a request
    pub min_chars_for_search: usize,
    /// Identifier of this widget instance, sent with every request
    pub widget_instance: String,
}

impl ClientConfig {
    /// Creates a new ClientConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SEARCH_API_BASE_URL` - Backend base URL (default: http://localhost:8080)
    /// - `REQUEST_TIMEOUT_MS` - Per-attempt timeout in ms (default: 10000)
    /// - `RETRY_ATTEMPTS` - Attempts per logical request (default: 3)
    /// - `RETRY_DELAY_MS` - Base backoff delay in ms (default: 300)
    /// - `CACHE_MAX_SIZE` - Maximum cached responses (default: 100)
    /// - `SEARCH_CACHE_TTL_MS` - Search TTL in ms (default: 300000)
    /// - `SEARCH_CACHE_TTL_LARGE_MS` - TTL for large result sets (default: 60000)
    /// - `LARGE_RESULT_THRESHOLD` - Result count for the short TTL (default: 50)
    /// - `AUTOCOMPLETE_CACHE_TTL_MS` - Autocomplete TTL in ms (default: 60000)
    /// - `POPULAR_CACHE_TTL_MS` - Popular-searches TTL in ms (default: 600000)
    /// - `FACETS_CACHE_TTL_MS` - Facet-configuration TTL in ms (default: 600000)
    /// - `MIN_CHARS_FOR_SEARCH` - Minimum autocomplete query length (default: 2)
    /// - `WIDGET_INSTANCE` - Instance identifier header value (default: "default")
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("SEARCH_API_BASE_URL").unwrap_or(defaults.base_url),
            request_timeout: env_duration_ms("REQUEST_TIMEOUT_MS", defaults.request_timeout),
            retry_attempts: env_parse("RETRY_ATTEMPTS", defaults.retry_attempts),
            retry_delay: env_duration_ms("RETRY_DELAY_MS", defaults.retry_delay),
            cache_max_size: env_parse("CACHE_MAX_SIZE", defaults.cache_max_size),
            search_cache_ttl: env_duration_ms("SEARCH_CACHE_TTL_MS", defaults.search_cache_ttl),
            search_cache_ttl_large: env_duration_ms(
                "SEARCH_CACHE_TTL_LARGE_MS",
                defaults.search_cache_ttl_large,
            ),
            large_result_threshold: env_parse(
                "LARGE_RESULT_THRESHOLD",
                defaults.large_result_threshold,
            ),
            autocomplete_cache_ttl: env_duration_ms(
                "AUTOCOMPLETE_CACHE_TTL_MS",
                defaults.autocomplete_cache_ttl,
            ),
            popular_cache_ttl: env_duration_ms("POPULAR_CACHE_TTL_MS", defaults.popular_cache_ttl),
            facets_cache_ttl: env_duration_ms("FACETS_CACHE_TTL_MS", defaults.facets_cache_ttl),
            min_chars_for_search: env_parse("MIN_CHARS_FOR_SEARCH", defaults.min_chars_for_search),
            widget_instance: env::var("WIDGET_INSTANCE").unwrap_or(defaults.widget_instance),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: Duration::from_millis(10_000),
            retry_attempts: 3,
            retry_delay: Duration::from_millis(300),
            cache_max_size: 100,
            search_cache_ttl: Duration::from_millis(300_000),
            search_cache_ttl_large: Duration::from_millis(60_000),
            large_result_threshold: 50,
            autocomplete_cache_ttl: Duration::from_millis(60_000),
            popular_cache_ttl: Duration::from_millis(600_000),
            facets_cache_ttl: Duration::from_millis(600_000),
            min_chars_for_search: 2,
            widget_instance: "default".to_string(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_millis(10_000));
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_delay, Duration::from_millis(300));
        assert_eq!(config.cache_max_size, 100);
        assert_eq!(config.large_result_threshold, 50);
        assert_eq!(config.min_chars_for_search, 2);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SEARCH_API_BASE_URL");
        env::remove_var("REQUEST_TIMEOUT_MS");
        env::remove_var("RETRY_ATTEMPTS");
        env::remove_var("CACHE_MAX_SIZE");

        let config = ClientConfig::from_env();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.cache_max_size, 100);
    }

    #[test]
    fn test_ttl_tiers_differ() {
        let config = ClientConfig::default();
        assert!(config.search_cache_ttl_large < config.search_cache_ttl);
    }
}
