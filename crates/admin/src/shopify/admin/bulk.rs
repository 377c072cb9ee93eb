//! Bulk mutation plumbing: staged uploads and operation runs.
//!
//! The import path is three calls: create a staged upload target for a
//! `BULK_MUTATION_VARIABLES` file, POST the JSONL payload to it, then run
//! `bulkOperationRunMutation` pointing at the staged path. Status is
//! polled afterwards through the `node()` lookup.

use serde::Deserialize;
use tracing::instrument;

use metaport_core::BulkOperationStatus;

use super::{AdminClient, UserErrorResponse, check_user_errors, queries};
use crate::shopify::{AdminShopifyError, BulkOperation, StagedUploadTarget};

/// Composite identifier prefix for bulk operations.
const BULK_OPERATION_GID_PREFIX: &str = "gid://shopify/BulkOperation/";

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StagedUploadsCreateData {
    staged_uploads_create: Option<StagedUploadsCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StagedUploadsCreatePayload {
    #[serde(default)]
    staged_targets: Vec<StagedTargetNode>,
    #[serde(default)]
    user_errors: Vec<UserErrorResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StagedTargetNode {
    url: Option<String>,
    resource_url: Option<String>,
    #[serde(default)]
    parameters: Vec<StagedParameterNode>,
}

#[derive(Debug, Deserialize)]
struct StagedParameterNode {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkRunData {
    bulk_operation_run_mutation: Option<BulkRunPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkRunPayload {
    bulk_operation: Option<BulkOperationNode>,
    #[serde(default)]
    user_errors: Vec<UserErrorResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkOperationLookupData {
    node: Option<BulkOperationNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkOperationNode {
    id: String,
    status: BulkOperationStatus,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    object_count: Option<String>,
}

impl From<BulkOperationNode> for BulkOperation {
    fn from(node: BulkOperationNode) -> Self {
        Self {
            id: node.id,
            status: node.status,
            error_code: node.error_code,
            object_count: node.object_count.and_then(|count| count.parse().ok()),
        }
    }
}

impl AdminClient {
    /// Create a staged upload target for a JSONL bulk-variables file.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, returns user errors, or
    /// returns no target.
    #[instrument(skip(self))]
    pub async fn create_staged_upload(
        &self,
        filename: &str,
    ) -> Result<StagedUploadTarget, AdminShopifyError> {
        let variables = serde_json::json!({
            "input": [{
                "filename": filename,
                "mimeType": "text/jsonl",
                "httpMethod": "POST",
                "resource": "BULK_MUTATION_VARIABLES",
            }],
        });

        let response: StagedUploadsCreateData =
            self.execute(queries::STAGED_UPLOADS_CREATE, variables).await?;

        let payload = response
            .staged_uploads_create
            .ok_or_else(|| AdminShopifyError::missing_data("No stagedUploadsCreate payload"))?;
        check_user_errors(&payload.user_errors)?;

        let target = payload
            .staged_targets
            .into_iter()
            .next()
            .ok_or_else(|| AdminShopifyError::missing_data("No staged target returned"))?;

        Ok(StagedUploadTarget {
            url: target.url.unwrap_or_default(),
            resource_url: target.resource_url.unwrap_or_default(),
            parameters: target
                .parameters
                .into_iter()
                .map(|p| (p.name, p.value))
                .collect(),
        })
    }

    /// Upload a JSONL payload to a staged target.
    ///
    /// Every target parameter is echoed back as a form field ahead of the
    /// file part, as the upload host requires.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::Upload` when the target rejects the
    /// payload, or `AdminShopifyError::Http` when the request itself fails.
    #[instrument(skip(self, body), fields(bytes = body.len()))]
    pub async fn upload_jsonl(
        &self,
        target: &StagedUploadTarget,
        filename: &str,
        body: String,
    ) -> Result<(), AdminShopifyError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &target.parameters {
            form = form.text(name.clone(), value.clone());
        }
        let part = reqwest::multipart::Part::bytes(body.into_bytes())
            .file_name(filename.to_string())
            .mime_str("text/jsonl")?;
        form = form.part("file", part);

        let response = self
            .inner
            .client
            .post(&target.url)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AdminShopifyError::Upload(format!(
                "target returned {status}: {text}"
            )));
        }

        Ok(())
    }

    /// Run the metafields bulk mutation against a staged variables file.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, returns user errors, or
    /// returns no operation.
    #[instrument(skip(self))]
    pub async fn run_bulk_mutation(
        &self,
        staged_upload_path: &str,
        client_identifier: &str,
    ) -> Result<BulkOperation, AdminShopifyError> {
        let variables = serde_json::json!({
            "clientIdentifier": client_identifier,
            "mutation": queries::METAFIELDS_SET,
            "stagedUploadPath": staged_upload_path,
        });

        let response: BulkRunData = self
            .execute(queries::BULK_OPERATION_RUN_MUTATION, variables)
            .await?;

        let payload = response
            .bulk_operation_run_mutation
            .ok_or_else(|| AdminShopifyError::missing_data("No bulkOperationRunMutation payload"))?;
        check_user_errors(&payload.user_errors)?;

        payload
            .bulk_operation
            .map(BulkOperation::from)
            .ok_or_else(|| AdminShopifyError::missing_data("No bulk operation returned from run"))
    }

    /// Look up a bulk operation by its bare numeric id.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::NotFound` when no operation exists for
    /// the id, or an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn bulk_operation(
        &self,
        operation_id: &str,
    ) -> Result<BulkOperation, AdminShopifyError> {
        let variables = serde_json::json!({
            "id": format!("{BULK_OPERATION_GID_PREFIX}{operation_id}"),
        });

        let response: BulkOperationLookupData =
            self.execute(queries::GET_BULK_OPERATION, variables).await?;

        response
            .node
            .map(BulkOperation::from)
            .ok_or_else(|| AdminShopifyError::NotFound(format!("bulk operation {operation_id}")))
    }
}
