//! Search Service Module
//!
//! The single entry point UI code calls. Owns per-operation semantics
//! (validation, URL shape, cache policy, normalization) layered on top of
//! the HTTP client and the response cache.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::cache::{build_cache_key, CacheStats, ResponseCache};
use crate::client::{HttpClient, RequestOptions};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::models::{
    AutocompleteParams, AutocompletePayload, FacetConfig, PopularPayload, SearchParams,
    SearchResponse,
};

/// Widget version sent with every request.
const WIDGET_VERSION: &str = env!("CARGO_PKG_VERSION");

// == Search Service ==
/// Orchestrates cache lookups, URL construction and HTTP calls for each
/// logical operation (search, autocomplete, facet configuration, popular
/// searches).
///
/// The cache holds post-envelope raw JSON payloads so the hit and miss
/// paths share one normalization step. The cache lock is never held
/// across a network await. Construct once and share behind an `Arc`;
/// there is no hidden module-level instance.
pub struct SearchService {
    /// Retrying HTTP transport
    http: HttpClient,
    /// Response cache, guarded for use from async contexts
    cache: RwLock<ResponseCache<Value>>,
    /// Shared configuration
    config: ClientConfig,
}

impl SearchService {
    // == Constructor ==
    /// Creates a service from configuration.
    pub fn new(config: ClientConfig) -> Self {
        let http = HttpClient::from_config(&config);
        let cache = RwLock::new(ResponseCache::new(config.cache_max_size));
        Self {
            http,
            cache,
            config,
        }
    }

    // == Search ==
    /// Runs an explicit search. Critical path: errors are rethrown and the
    /// caller must render a failure state.
    ///
    /// Requests carrying active filter selections bypass the cache in both
    /// directions so facet counts always reflect the live filter
    /// combination. Unfiltered responses cache with a dynamic TTL: result
    /// pages larger than the configured threshold get the shorter TTL.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        if params.store_url.trim().is_empty() {
            return Err(ApiError::Validation {
                field: "storeUrl".to_string(),
                message: "storeUrl is required".to_string(),
            });
        }

        let cache_key = build_cache_key("search", &params.cache_key_pairs());
        let bypass = params.filters.is_active();

        if !bypass {
            let mut cache = self.cache.write().await;
            if let Some(cached) = cache.get(&cache_key) {
                debug!(key = %cache_key, "search served from cache");
                return decode(cached);
            }
        }

        let url = self.build_url("search", &params.query_pairs())?;
        let payload = self
            .http
            .get(url, self.request_options())
            .await
            .inspect_err(|err| error!(error = %err, query = %params.query, "search request failed"))?;
        let response: SearchResponse = decode(payload.clone())
            .inspect_err(|err| error!(error = %err, "search response failed to decode"))?;

        if !bypass {
            let ttl = self.search_ttl(&response);
            self.cache.write().await.set(&cache_key, payload, ttl);
        }

        Ok(response)
    }

    // == Autocomplete ==
    /// Fetches suggestions for a query prefix. Non-critical path: failures
    /// are logged and degrade to an empty list.
    ///
    /// Queries shorter than the configured minimum return empty
    /// immediately, with no cache or network interaction. Both legacy
    /// payload shapes are normalized to plain strings.
    pub async fn autocomplete(&self, query: &str, store_url: &str) -> Vec<String> {
        if query.chars().count() < self.config.min_chars_for_search {
            return Vec::new();
        }

        let params = AutocompleteParams::new(query, store_url);
        let cache_key = build_cache_key("autocomplete", &params.cache_key_pairs());

        let result = self
            .cached_get(
                "autocomplete",
                &cache_key,
                &params.query_pairs(),
                self.config.autocomplete_cache_ttl,
            )
            .await
            .and_then(|payload| decode::<AutocompletePayload>(payload));

        match result {
            Ok(payload) => payload.into_suggestions(),
            Err(err) => {
                error!(error = %err, query, "autocomplete request failed");
                Vec::new()
            }
        }
    }

    // == Facet Configuration ==
    /// Fetches the merchant's configured facets. Non-critical path:
    /// failures degrade to an empty list.
    pub async fn facet_configuration(&self, store_url: &str) -> Vec<FacetConfig> {
        let pairs = vec![("storeUrl", store_url.to_string())];
        let cache_key = build_cache_key(
            "facets/configured",
            &[("storeUrl", Value::from(store_url))],
        );

        let result = self
            .cached_get(
                "facets/configured",
                &cache_key,
                &pairs,
                self.config.facets_cache_ttl,
            )
            .await
            .and_then(|payload| decode::<Vec<FacetConfig>>(payload));

        match result {
            Ok(facets) => facets,
            Err(err) => {
                error!(error = %err, store_url, "facet configuration request failed");
                Vec::new()
            }
        }
    }

    // == Popular Searches ==
    /// Fetches popular search terms. Non-critical path: failures degrade
    /// to an empty list.
    pub async fn popular_searches(&self, store_url: &str) -> Vec<String> {
        let pairs = vec![("storeUrl", store_url.to_string())];
        let cache_key = build_cache_key("popular", &[("storeUrl", Value::from(store_url))]);

        let result = self
            .cached_get("popular", &cache_key, &pairs, self.config.popular_cache_ttl)
            .await
            .and_then(|payload| decode::<PopularPayload>(payload));

        match result {
            Ok(payload) => payload.searches,
            Err(err) => {
                error!(error = %err, store_url, "popular searches request failed");
                Vec::new()
            }
        }
    }

    // == Clear Cache ==
    /// Drops all cached responses and resets the cache counters.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    // == Cache Stats ==
    /// Returns a snapshot of the cache counters.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Cache-then-network fetch shared by the degrade-gracefully operations.
    async fn cached_get(
        &self,
        path: &str,
        cache_key: &str,
        pairs: &[(&'static str, String)],
        ttl: Duration,
    ) -> Result<Value> {
        {
            let mut cache = self.cache.write().await;
            if let Some(cached) = cache.get(cache_key) {
                debug!(key = %cache_key, "served from cache");
                return Ok(cached);
            }
        }

        let url = self.build_url(path, pairs)?;
        let payload = self.http.get(url, self.request_options()).await?;

        self.cache.write().await.set(cache_key, payload.clone(), ttl);
        Ok(payload)
    }

    /// Picks the search TTL tier: pages larger than the threshold are
    /// treated as more likely to mutate and cache for the shorter window.
    fn search_ttl(&self, response: &SearchResponse) -> Duration {
        if response.products.len() > self.config.large_result_threshold {
            self.config.search_cache_ttl_large
        } else {
            self.config.search_cache_ttl
        }
    }

    /// Builds an operation URL with its query pairs in the given order.
    fn build_url(&self, path: &str, pairs: &[(&'static str, String)]) -> Result<Url> {
        let base = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        Url::parse_with_params(&base, pairs.iter().map(|(name, value)| (*name, value.as_str())))
            .map_err(|err| ApiError::Validation {
                field: "baseUrl".to_string(),
                message: format!("Invalid request URL: {}", err),
            })
    }

    /// Common headers attached to every request.
    fn request_options(&self) -> RequestOptions {
        RequestOptions {
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("X-Widget-Version".to_string(), WIDGET_VERSION.to_string()),
                (
                    "X-Widget-Instance".to_string(),
                    self.config.widget_instance.clone(),
                ),
            ],
            ..Default::default()
        }
    }
}

/// Deserializes a cached or fresh payload into its canonical type.
fn decode<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|err| ApiError::Api {
        status: 200,
        code: "PARSE_ERROR".to_string(),
        message: format!("Failed to decode response payload: {}", err),
        context: None,
    })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn offline_service() -> SearchService {
        // Unroutable base URL: any network attempt fails fast
        let config = ClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            retry_attempts: 1,
            request_timeout: Duration::from_millis(200),
            ..ClientConfig::default()
        };
        SearchService::new(config)
    }

    #[tokio::test]
    async fn test_search_requires_store_url() {
        let service = offline_service();
        let params = SearchParams::new("shoe", "");

        let err = service.search(&params).await.unwrap_err();
        match err {
            ApiError::Validation { field, .. } => assert_eq!(field, "storeUrl"),
            other => panic!("expected validation error, got {:?}", other),
        }
        // Validation failed before any cache interaction
        assert_eq!(service.cache_stats().await.misses, 0);
    }

    #[tokio::test]
    async fn test_autocomplete_short_query_short_circuits() {
        let service = offline_service();

        let suggestions = service.autocomplete("a", "https://x.test").await;

        assert!(suggestions.is_empty());
        let stats = service.cache_stats().await;
        assert_eq!(stats.hits + stats.misses, 0, "no cache interaction expected");
    }

    #[tokio::test]
    async fn test_autocomplete_degrades_on_network_failure() {
        let service = offline_service();

        let suggestions = service.autocomplete("shoes", "https://x.test").await;

        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_search_rethrows_network_failure() {
        let service = offline_service();
        let params = SearchParams::new("shoe", "https://x.test");

        let err = service.search(&params).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Network { .. } | ApiError::Timeout { .. }
        ));
    }

    #[tokio::test]
    async fn test_degrade_paths_return_empty_defaults() {
        let service = offline_service();

        assert!(service.facet_configuration("https://x.test").await.is_empty());
        assert!(service.popular_searches("https://x.test").await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_cache_resets_stats() {
        let service = offline_service();

        // Failed lookups still count as misses
        let _ = service.autocomplete("shoes", "https://x.test").await;
        assert!(service.cache_stats().await.misses > 0);

        service.clear_cache().await;
        let stats = service.cache_stats().await;
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.size, 0);
    }

    #[test]
    fn test_build_url_appends_pairs_in_order() {
        let service = offline_service();
        let url = service
            .build_url(
                "search",
                &[
                    ("q", "shoe".to_string()),
                    ("storeUrl", "https://x.test".to_string()),
                ],
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:1/search?q=shoe&storeUrl=https%3A%2F%2Fx.test"
        );
    }
}
