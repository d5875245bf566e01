//! Product search types
//!
//! Response values are deserialized straight from the service's JSON
//! (camelCase, absent fields default). Request values serialize into
//! the `imageContext` of an annotate request.

use crate::error::{Error, Result};
use crate::resource::ResourceName;
use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Time a product set was last indexed
///
/// The service sends an RFC 3339 string; an unindexed set reports the
/// Unix epoch, which is also the value used when the field is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexTime {
    pub seconds: i64,
    pub nanos: i32,
}

impl IndexTime {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Parse an RFC 3339 timestamp into seconds and nanoseconds
    ///
    /// # Examples
    /// ```
    /// use product_search_common::IndexTime;
    ///
    /// let t = IndexTime::parse_rfc3339("1970-01-01T00:01:40.5Z").unwrap();
    /// assert_eq!(t, IndexTime::new(100, 500_000_000));
    /// ```
    pub fn parse_rfc3339(value: &str) -> Result<Self> {
        let parsed = DateTime::parse_from_rfc3339(value)
            .map_err(|e| Error::Timestamp(format!("{}: {}", value, e)))?;

        Ok(Self {
            seconds: parsed.timestamp(),
            // subsec nanos is always below 2e9 (leap seconds included)
            nanos: parsed.timestamp_subsec_nanos() as i32,
        })
    }
}

fn deserialize_index_time<'de, D>(deserializer: D) -> std::result::Result<IndexTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) if !value.is_empty() => {
            IndexTime::parse_rfc3339(&value).map_err(serde::de::Error::custom)
        }
        _ => Ok(IndexTime::default()),
    }
}

/// Key/value label attached to a product
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductLabel {
    pub key: String,
    pub value: String,
}

impl ProductLabel {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Product descriptor returned with a match
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub product_category: String,
    pub product_labels: Vec<ProductLabel>,
}

/// One entry of a product set listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSet {
    pub name: String,
    pub display_name: String,

    #[serde(deserialize_with = "deserialize_index_time")]
    pub index_time: IndexTime,
}

/// One similar-product match
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub product: Product,

    /// Confidence, 0.0 (none) to 1.0 (full)
    pub score: f32,

    /// Resource name of the matched reference image
    pub image: String,
}

/// Outcome of a product search on one image
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSearchResults {
    #[serde(deserialize_with = "deserialize_index_time")]
    pub index_time: IndexTime,

    pub results: Vec<SearchResult>,
}

/// Parameters for a product search request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchParams {
    pub product_set: String,
    pub product_categories: Vec<String>,

    /// Passed through unchanged; the grammar belongs to the service
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filter: String,
}

impl ProductSearchParams {
    pub fn new(product_set: &ResourceName, product_category: &str, filter: &str) -> Self {
        Self {
            product_set: product_set.to_string(),
            product_categories: vec![product_category.to_string()],
            filter: filter.to_string(),
        }
    }
}

/// Image context sent alongside the image content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContext {
    pub product_search_params: ProductSearchParams,
}

impl From<ProductSearchParams> for ImageContext {
    fn from(product_search_params: ProductSearchParams) -> Self {
        Self {
            product_search_params,
        }
    }
}
