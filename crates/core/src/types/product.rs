//! Product and pagination types.

use serde::{Deserialize, Serialize};

/// A namespaced, typed key-value attribute attached to a product.
///
/// Uniquely identified within a product by (namespace, key); the order of
/// entries is display order only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetafieldEntry {
    pub namespace: String,
    pub key: String,
    /// Metafield value type (e.g. `single_line_text_field`).
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
}

/// One product with its metafields, as gathered by a collection pass.
///
/// Ephemeral - built fresh per export or import operation and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Bare numeric id, extracted from the composite resource identifier.
    pub id: String,
    pub handle: String,
    pub title: String,
    pub product_type: String,
    pub tags: Vec<String>,
    pub total_inventory: i64,
    pub metafields: Vec<MetafieldEntry>,
}

/// Cursor pagination state for a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// One page of products plus the cursor state that drives the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    pub page_info: PageInfo,
}
