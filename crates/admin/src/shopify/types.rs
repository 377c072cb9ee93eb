//! Domain types returned by the Admin API client.

use metaport_core::BulkOperationStatus;

/// A staged upload target returned by `stagedUploadsCreate`.
///
/// The payload is POSTed to `url` with every parameter echoed back as a
/// multipart form field; the `key` parameter doubles as the staged upload
/// path handed to `bulkOperationRunMutation`.
#[derive(Debug, Clone)]
pub struct StagedUploadTarget {
    /// Upload endpoint URL.
    pub url: String,
    /// URL the uploaded resource will be readable from.
    pub resource_url: String,
    /// Upload form parameters as (name, value) pairs.
    pub parameters: Vec<(String, String)>,
}

impl StagedUploadTarget {
    /// The staged upload path for the subsequent bulk mutation run.
    #[must_use]
    pub fn staged_path(&self) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(name, _)| name == "key")
            .map(|(_, value)| value.as_str())
    }
}

/// A remote bulk operation, as created or polled.
#[derive(Debug, Clone)]
pub struct BulkOperation {
    /// Composite operation identifier (`gid://shopify/BulkOperation/N`).
    pub id: String,
    pub status: BulkOperationStatus,
    /// Error code when the operation failed, if any.
    pub error_code: Option<String>,
    /// Number of objects the operation has processed so far.
    pub object_count: Option<u64>,
}
