//! Product pagination for the Admin API.

use serde::Deserialize;
use tracing::instrument;

use metaport_core::{
    MAX_PAGE_SIZE, MetafieldEntry, PageInfo, ProductPage, ProductRecord, collect_all, gid,
};

use super::{AdminClient, queries};
use crate::shopify::AdminShopifyError;

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: ProductConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductConnection {
    nodes: Vec<ProductNode>,
    page_info: WirePageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductNode {
    id: String,
    title: String,
    handle: String,
    #[serde(default)]
    product_type: String,
    #[serde(default)]
    tags: Vec<String>,
    total_inventory: Option<i64>,
    metafields: MetafieldConnection,
}

#[derive(Debug, Deserialize)]
struct MetafieldConnection {
    nodes: Vec<MetafieldNode>,
}

#[derive(Debug, Deserialize)]
struct MetafieldNode {
    namespace: String,
    key: String,
    #[serde(rename = "type")]
    value_type: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

// =============================================================================
// Conversions
// =============================================================================

fn convert_product(node: ProductNode) -> ProductRecord {
    ProductRecord {
        id: gid::numeric_id(&node.id).to_string(),
        handle: node.handle,
        title: node.title,
        product_type: node.product_type,
        tags: node.tags,
        total_inventory: node.total_inventory.unwrap_or_default(),
        metafields: node
            .metafields
            .nodes
            .into_iter()
            .map(|mf| MetafieldEntry {
                namespace: mf.namespace,
                key: mf.key,
                value_type: mf.value_type,
                value: mf.value,
            })
            .collect(),
    }
}

fn convert_page(connection: ProductConnection) -> ProductPage {
    ProductPage {
        products: connection.nodes.into_iter().map(convert_product).collect(),
        page_info: PageInfo {
            has_next_page: connection.page_info.has_next_page,
            end_cursor: connection.page_info.end_cursor,
        },
    }
}

impl AdminClient {
    /// Fetch one page of products with their metafields.
    ///
    /// # Arguments
    ///
    /// * `first` - Number of products to return (capped remotely at 250)
    /// * `after` - Cursor from the previous page, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self))]
    pub async fn products_page(
        &self,
        first: i64,
        after: Option<String>,
    ) -> Result<ProductPage, AdminShopifyError> {
        let variables = serde_json::json!({
            "limit": first,
            "after": after,
        });

        let response: ProductsData = self.execute(queries::FETCH_PRODUCTS, variables).await?;

        Ok(convert_page(response.products))
    }

    /// Collect every product in the store, page by page.
    ///
    /// Pages are fetched sequentially at the remote page-size ceiling until
    /// the connection reports no next page.
    ///
    /// # Errors
    ///
    /// Any page fetch error aborts the collection; no partial list is
    /// returned.
    #[instrument(skip(self))]
    pub async fn fetch_all_products(&self) -> Result<Vec<ProductRecord>, AdminShopifyError> {
        let client = self;
        collect_all(
            move |first, after| client.products_page(first, after),
            MAX_PAGE_SIZE,
        )
        .await
    }
}
