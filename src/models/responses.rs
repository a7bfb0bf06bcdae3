//! Response Models
//!
//! Typed shapes for backend payloads, including the normalization of
//! legacy payload variants. Every duck-typed shape the backend may return
//! is mapped to one canonical internal type before it leaves the API layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Product ==
/// One product row in a search result.
///
/// Only the identifier is required; storefronts differ in which of the
/// remaining fields they populate, so everything else is optional and
/// unknown fields are preserved in `extra` for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend product identifier
    pub id: String,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
    /// Current price
    #[serde(default)]
    pub price: Option<f64>,
    /// Primary image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Product page URL
    #[serde(default)]
    pub url: Option<String>,
    /// Any additional backend-specific fields
    #[serde(default, flatten)]
    pub extra: HashMap<String, Value>,
}

// == Facet Bucket ==
/// One value/count pair within a facet aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetBucket {
    /// Facet value, e.g. "red"
    pub key: String,
    /// Number of matching documents
    #[serde(default)]
    pub doc_count: u64,
}

// == Search Response ==
/// Canonical result of a search operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching products for the requested page
    #[serde(default)]
    pub products: Vec<Product>,
    /// Total number of matches across all pages
    #[serde(default)]
    pub total: u64,
    /// Whether further pages exist
    #[serde(default, rename = "hasMore")]
    pub has_more: Option<bool>,
    /// Aggregation buckets per facet field, when the backend returned them
    #[serde(default)]
    pub facets: Option<HashMap<String, Vec<FacetBucket>>>,
}

impl SearchResponse {
    /// An empty result set.
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            total: 0,
            has_more: None,
            facets: None,
        }
    }
}

// == Facet Configuration ==
/// Merchant-configured facet definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetConfig {
    /// Backend field this facet aggregates over
    pub field: String,
    /// Display label
    #[serde(default)]
    pub label: String,
    /// Whether the facet is shown in the sidebar
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Explicit term whitelist, when configured
    #[serde(default)]
    pub terms: Vec<String>,
}

fn default_visible() -> bool {
    true
}

// == Autocomplete Payload ==
/// The two payload shapes the autocomplete endpoint is known to return.
///
/// Newer backends return `{"suggestions": [..]}`; legacy ones return a
/// bare array of objects carrying a `title` or `name` field. Both are
/// normalized to a plain list of suggestion strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AutocompletePayload {
    /// `{"suggestions": ["red shoes", ...]}`
    Wrapped {
        #[serde(default)]
        suggestions: Vec<String>,
    },
    /// `[{"title": "red shoes"}, {"name": "boots"}, ...]`
    Items(Vec<SuggestionItem>),
}

/// One legacy autocomplete result object.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl AutocompletePayload {
    // == Into Suggestions ==
    /// Normalizes either payload shape into suggestion strings.
    ///
    /// Legacy items prefer `title` over `name`; items carrying neither
    /// (or an empty string) are dropped.
    pub fn into_suggestions(self) -> Vec<String> {
        match self {
            AutocompletePayload::Wrapped { suggestions } => suggestions,
            AutocompletePayload::Items(items) => items
                .into_iter()
                .filter_map(|item| item.title.or(item.name))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

// == Popular Searches Payload ==
/// Payload of the popular-searches endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PopularPayload {
    #[serde(default)]
    pub searches: Vec<String>,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_deserialize() {
        let json = r#"{
            "products": [{"id": "1", "title": "Red Shoe", "price": 49.9}],
            "total": 1,
            "hasMore": false
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].id, "1");
        assert_eq!(response.products[0].title.as_deref(), Some("Red Shoe"));
        assert_eq!(response.total, 1);
        assert_eq!(response.has_more, Some(false));
        assert!(response.facets.is_none());
    }

    #[test]
    fn test_search_response_missing_optionals() {
        let response: SearchResponse = serde_json::from_str(r#"{"products":[],"total":0}"#).unwrap();
        assert!(response.products.is_empty());
        assert_eq!(response.has_more, None);
    }

    #[test]
    fn test_search_response_with_facets() {
        let json = r#"{
            "products": [],
            "total": 12,
            "facets": {"color": [{"key": "red", "doc_count": 12}]}
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let facets = response.facets.unwrap();
        assert_eq!(facets["color"][0].key, "red");
        assert_eq!(facets["color"][0].doc_count, 12);
    }

    #[test]
    fn test_product_preserves_unknown_fields() {
        let json = r#"{"id": "1", "vendorSku": "A-42"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.extra["vendorSku"], json!("A-42"));
    }

    #[test]
    fn test_autocomplete_wrapped_shape() {
        let payload: AutocompletePayload =
            serde_json::from_str(r#"{"suggestions": ["red shoes", "boots"]}"#).unwrap();

        assert_eq!(payload.into_suggestions(), vec!["red shoes", "boots"]);
    }

    #[test]
    fn test_autocomplete_legacy_items_shape() {
        let payload: AutocompletePayload = serde_json::from_str(
            r#"[{"title": "red shoes"}, {"name": "boots"}, {"title": null, "name": null}]"#,
        )
        .unwrap();

        assert_eq!(payload.into_suggestions(), vec!["red shoes", "boots"]);
    }

    #[test]
    fn test_autocomplete_legacy_prefers_title() {
        let payload: AutocompletePayload =
            serde_json::from_str(r#"[{"title": "red shoes", "name": "ignored"}]"#).unwrap();

        assert_eq!(payload.into_suggestions(), vec!["red shoes"]);
    }

    #[test]
    fn test_facet_config_defaults() {
        let config: FacetConfig = serde_json::from_str(r#"{"field": "color"}"#).unwrap();
        assert_eq!(config.field, "color");
        assert!(config.visible);
        assert!(config.terms.is_empty());
    }

    #[test]
    fn test_popular_payload() {
        let payload: PopularPayload =
            serde_json::from_str(r#"{"searches": ["sneakers", "sandals"]}"#).unwrap();
        assert_eq!(payload.searches, vec!["sneakers", "sandals"]);
    }

    #[test]
    fn test_empty_search_response() {
        let empty = SearchResponse::empty();
        assert!(empty.products.is_empty());
        assert_eq!(empty.total, 0);
    }
}
