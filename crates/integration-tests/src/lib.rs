//! Cross-crate pipeline tests for MetaPort.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p metaport-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pipeline` - Full export/import transcoding round trips
//! - `pagination` - Collector behavior against stub page fetchers
//!
//! Everything here runs against in-memory stubs; no store, no network.

/// Build a product record for test fixtures.
#[must_use]
pub fn product(
    id: &str,
    tags: &[&str],
    metafields: Vec<metaport_core::MetafieldEntry>,
) -> metaport_core::ProductRecord {
    metaport_core::ProductRecord {
        id: id.to_string(),
        handle: format!("handle-{id}"),
        title: format!("Product {id}"),
        product_type: "Widget".to_string(),
        tags: tags.iter().map(ToString::to_string).collect(),
        total_inventory: 5,
        metafields,
    }
}

/// Build a metafield entry for test fixtures.
#[must_use]
pub fn entry(namespace: &str, key: &str, value_type: &str, value: &str) -> metaport_core::MetafieldEntry {
    metaport_core::MetafieldEntry {
        namespace: namespace.to_string(),
        key: key.to_string(),
        value_type: value_type.to_string(),
        value: value.to_string(),
    }
}
