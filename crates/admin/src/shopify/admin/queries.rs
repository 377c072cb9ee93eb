//! GraphQL documents for the Shopify Admin API.
//!
//! Documents are hand-written and sent as plain strings; the typed
//! response structs live next to the calls that use them.

/// Paginated products with their metafields.
///
/// Metafields are capped per product; products carrying more than
/// [`METAFIELDS_PER_PRODUCT`] would need a nested pagination pass this
/// pipeline doesn't do.
pub const FETCH_PRODUCTS: &str = r"
query FetchProducts($limit: Int, $after: String) {
  products(first: $limit, after: $after) {
    nodes {
      id
      title
      handle
      productType
      tags
      totalInventory
      metafields(first: 10) {
        nodes {
          namespace
          key
          type
          value
        }
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
";

/// Metafields fetched per product by [`FETCH_PRODUCTS`].
pub const METAFIELDS_PER_PRODUCT: usize = 10;

/// Create a staged upload target for the JSONL variables file.
pub const STAGED_UPLOADS_CREATE: &str = r"
mutation stagedUploadsCreate($input: [StagedUploadInput!]!) {
  stagedUploadsCreate(input: $input) {
    stagedTargets {
      url
      resourceUrl
      parameters {
        name
        value
      }
    }
    userErrors {
      field
      message
    }
  }
}
";

/// Run a bulk mutation against a staged variables file.
pub const BULK_OPERATION_RUN_MUTATION: &str = r"
mutation bulkOperationRunMutation($clientIdentifier: String, $mutation: String!, $stagedUploadPath: String!) {
  bulkOperationRunMutation(clientIdentifier: $clientIdentifier, mutation: $mutation, stagedUploadPath: $stagedUploadPath) {
    bulkOperation {
      id
      status
    }
    userErrors {
      field
      message
    }
  }
}
";

/// The per-line mutation executed by the bulk run; each JSONL line supplies
/// one `$metafields` variables object.
pub const METAFIELDS_SET: &str = "mutation MetafieldsSet($metafields: [MetafieldsSetInput!]!) { metafieldsSet(metafields: $metafields) { metafields { key namespace value createdAt updatedAt } userErrors { field message code } } }";

/// Look up a bulk operation's status by id.
pub const GET_BULK_OPERATION: &str = r"
query GetBulkOperation($id: ID!) {
  node(id: $id) {
    ... on BulkOperation {
      id
      status
      errorCode
      objectCount
    }
  }
}
";
