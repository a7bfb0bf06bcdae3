//! Request Parameter Models
//!
//! Caller-supplied value objects describing a search or autocomplete
//! request. Immutable from the client's perspective; used only to derive
//! a cache key and a request URL.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Sort Option ==
/// Result ordering requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    Relevance,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    Newest,
}

impl SortOption {
    /// Wire value used in the `sort` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
            SortOption::Newest => "newest",
        }
    }
}

// == Stock Status ==
/// Stock availability filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    /// Wire value used in the `stockStatus` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::OutOfStock => "out_of_stock",
        }
    }
}

// == Filter Selection ==
/// Active facet selections attached to a search request.
///
/// Any active selection makes the request bypass the response cache so
/// facet counts always reflect the live filter combination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    /// Selected category names
    pub categories: Vec<String>,
    /// Selected color values
    pub colors: Vec<String>,
    /// Selected size values
    pub sizes: Vec<String>,
    /// Selected brand names
    pub brands: Vec<String>,
    /// Selected tags
    pub tags: Vec<String>,
    /// Stock availability filter
    pub stock_status: Option<StockStatus>,
    /// Lower price bound
    pub min_price: Option<f64>,
    /// Upper price bound
    pub max_price: Option<f64>,
    /// Restrict to items on sale
    pub on_sale: Option<bool>,
    /// Restrict to featured items
    pub featured: Option<bool>,
}

impl FilterSelection {
    // == Is Active ==
    /// Returns true when any filter dimension carries a selection.
    pub fn is_active(&self) -> bool {
        !self.categories.is_empty()
            || !self.colors.is_empty()
            || !self.sizes.is_empty()
            || !self.brands.is_empty()
            || !self.tags.is_empty()
            || self.stock_status.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.on_sale.is_some()
            || self.featured.is_some()
    }
}

// == Search Params ==
/// Parameters for an explicit search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    /// Free-text query (may be empty for a browse-all request)
    pub query: String,
    /// Storefront identifier; required
    pub store_url: String,
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Active facet selections
    pub filters: FilterSelection,
    /// Result ordering
    pub sort: Option<SortOption>,
}

impl SearchParams {
    /// Creates params for a plain unfiltered query.
    pub fn new(query: impl Into<String>, store_url: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            store_url: store_url.into(),
            ..Self::default()
        }
    }

    // == Query Pairs ==
    /// Query-string pairs in the fixed documented order:
    /// q, storeUrl, page, limit, categories, colors, sizes, brands, tags,
    /// stockStatus, minPrice, maxPrice, insale, featured, sort.
    ///
    /// Multi-value filters are comma-joined; absent optionals are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.query.clone()),
            ("storeUrl", self.store_url.clone()),
        ];

        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        let f = &self.filters;
        push_joined(&mut pairs, "categories", &f.categories);
        push_joined(&mut pairs, "colors", &f.colors);
        push_joined(&mut pairs, "sizes", &f.sizes);
        push_joined(&mut pairs, "brands", &f.brands);
        push_joined(&mut pairs, "tags", &f.tags);

        if let Some(stock) = f.stock_status {
            pairs.push(("stockStatus", stock.as_str().to_string()));
        }
        if let Some(min) = f.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = f.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(on_sale) = f.on_sale {
            pairs.push(("insale", on_sale.to_string()));
        }
        if let Some(featured) = f.featured {
            pairs.push(("featured", featured.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }

        pairs
    }

    // == Cache Key Pairs ==
    /// The full parameter set as JSON values, for cache-key canonicalization.
    pub fn cache_key_pairs(&self) -> Vec<(&'static str, Value)> {
        let f = &self.filters;
        vec![
            ("q", Value::from(self.query.clone())),
            ("storeUrl", Value::from(self.store_url.clone())),
            ("page", option_value(self.page)),
            ("limit", option_value(self.limit)),
            ("categories", list_value(&f.categories)),
            ("colors", list_value(&f.colors)),
            ("sizes", list_value(&f.sizes)),
            ("brands", list_value(&f.brands)),
            ("tags", list_value(&f.tags)),
            (
                "stockStatus",
                f.stock_status
                    .map(|s| Value::from(s.as_str()))
                    .unwrap_or(Value::Null),
            ),
            ("minPrice", option_value(f.min_price)),
            ("maxPrice", option_value(f.max_price)),
            ("insale", option_value(f.on_sale)),
            ("featured", option_value(f.featured)),
            (
                "sort",
                self.sort
                    .map(|s| Value::from(s.as_str()))
                    .unwrap_or(Value::Null),
            ),
        ]
    }
}

// == Autocomplete Params ==
/// Parameters for an autocomplete (search-as-you-type) request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutocompleteParams {
    /// Query prefix typed so far
    pub query: String,
    /// Storefront identifier
    pub store_url: String,
}

impl AutocompleteParams {
    pub fn new(query: impl Into<String>, store_url: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            store_url: store_url.into(),
        }
    }

    /// Query-string pairs in the fixed order: q, storeUrl.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.query.clone()),
            ("storeUrl", self.store_url.clone()),
        ]
    }

    /// The full parameter set for cache-key canonicalization.
    pub fn cache_key_pairs(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("q", Value::from(self.query.clone())),
            ("storeUrl", Value::from(self.store_url.clone())),
        ]
    }
}

/// Appends a comma-joined multi-value pair when the list is non-empty.
fn push_joined(pairs: &mut Vec<(&'static str, String)>, name: &'static str, values: &[String]) {
    if !values.is_empty() {
        pairs.push((name, values.join(",")));
    }
}

fn option_value<T: Into<Value>>(value: Option<T>) -> Value {
    value.map(Into::into).unwrap_or(Value::Null)
}

fn list_value(values: &[String]) -> Value {
    if values.is_empty() {
        Value::Null
    } else {
        Value::from(values.to_vec())
    }
}
