//! Export/import orchestration.
//!
//! Glues the transcoding pipeline in `metaport-core` to the Admin API
//! client: collect-and-flatten for export, parse-unflatten-submit for
//! import. Both directions are all-or-nothing per invocation; the remote
//! bulk operation's asynchronous completion is tracked separately via
//! [`import_status`].

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::{info, warn};

use metaport_core::{BulkOperationStatus, EncodeError, Jsonl, flatten, parse_csv, to_csv, to_jsonl, unflatten};

use crate::shopify::{AdminClient, AdminShopifyError, BulkOperation};

/// Filename declared for the staged JSONL upload.
pub const IMPORT_FILE_NAME: &str = "products_metafields_import";

/// Errors from the export/import services.
#[derive(Debug, Error)]
pub enum PorterError {
    /// A call against the Admin API or the upload target failed.
    #[error(transparent)]
    Shopify(#[from] AdminShopifyError),

    /// The import file could not be parsed as CSV; the parser's message is
    /// surfaced verbatim.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Encoding the export CSV or the import JSONL failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The import file yielded no metafield writes at all.
    #[error("No metafields found in the import file")]
    EmptyImport,
}

/// A finished export: CSV text plus the counts worth reporting.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub csv: String,
    pub product_count: usize,
    /// Total column count of the rectangular table (fixed + dynamic).
    pub column_count: usize,
}

/// An import payload ready for submission.
#[derive(Debug, Clone)]
pub struct PreparedImport {
    pub jsonl: Jsonl,
    /// Metafield-like headers that failed to parse (each skipped per-column).
    pub skipped_columns: usize,
    /// Rows contributing no writes (all metafield cells empty, or no id).
    pub dropped_rows: usize,
}

/// A submitted import job.
///
/// Nothing is persisted here; the operation id is all a caller needs to
/// poll for completion.
#[derive(Debug, Clone)]
pub struct ImportJob {
    /// Bare numeric id of the remote bulk operation.
    pub operation_id: String,
    /// Number of mutation units submitted (JSONL line count).
    pub count: usize,
    pub status: BulkOperationStatus,
}

/// Export every product's metafields as spreadsheet-ready CSV text.
///
/// # Errors
///
/// Any page fetch failure aborts the whole export with no partial output.
pub async fn export_csv(client: &AdminClient) -> Result<ExportOutput, PorterError> {
    let products = client.fetch_all_products().await?;
    let rows = flatten(&products);
    let column_count = rows.first().map_or(0, |row| row.len());
    let csv = to_csv(&rows)?;

    info!(
        products = products.len(),
        columns = column_count,
        "export generated"
    );

    Ok(ExportOutput {
        csv,
        product_count: products.len(),
        column_count,
    })
}

/// Parse an edited export file and encode the bulk mutation payload.
///
/// The result may be empty; callers must reject an empty payload before
/// submission ([`submit_import`] enforces it too).
///
/// # Errors
///
/// Returns [`PorterError::Csv`] when the file is structurally unparsable.
pub fn prepare_import(csv_text: &str) -> Result<PreparedImport, PorterError> {
    let rows = parse_csv(csv_text)?;
    let report = unflatten(&rows);
    let jsonl = to_jsonl(&report.units)?;

    if report.skipped_columns > 0 || report.dropped_rows > 0 {
        warn!(
            skipped_columns = report.skipped_columns,
            dropped_rows = report.dropped_rows,
            "import file had ignorable content"
        );
    }

    Ok(PreparedImport {
        jsonl,
        skipped_columns: report.skipped_columns,
        dropped_rows: report.dropped_rows,
    })
}

/// Submit a prepared import as a remote bulk mutation.
///
/// # Errors
///
/// Returns [`PorterError::EmptyImport`] for an empty payload; any staging,
/// upload, or mutation-run failure is surfaced as-is and nothing runs.
pub async fn submit_import(
    client: &AdminClient,
    prepared: &PreparedImport,
) -> Result<ImportJob, PorterError> {
    if prepared.jsonl.is_empty() {
        return Err(PorterError::EmptyImport);
    }

    let target = client.create_staged_upload(IMPORT_FILE_NAME).await?;
    let staged_path = target.staged_path().ok_or_else(|| {
        AdminShopifyError::Upload("staged target has no key parameter".to_string())
    })?;

    client
        .upload_jsonl(&target, IMPORT_FILE_NAME, prepared.jsonl.body.clone())
        .await?;

    let operation = client
        .run_bulk_mutation(staged_path, &client_identifier())
        .await?;

    let operation_id = metaport_core::numeric_id(&operation.id).to_string();
    info!(
        operation_id = %operation_id,
        count = prepared.jsonl.line_count,
        "bulk import submitted"
    );

    Ok(ImportJob {
        operation_id,
        count: prepared.jsonl.line_count,
        status: operation.status,
    })
}

/// Current status of a submitted import's bulk operation.
///
/// # Errors
///
/// Returns an error when the lookup fails or no such operation exists.
pub async fn import_status(
    client: &AdminClient,
    operation_id: &str,
) -> Result<BulkOperation, PorterError> {
    Ok(client.bulk_operation(operation_id).await?)
}

/// Identifier tying the submitted operation back to this tool.
fn client_identifier() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    format!("metaport-product-metafields-import-{millis}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT_HEADER: &str =
        "id,handle,title,type,tags,total_inventory,Metafield:custom.color [single_line_text_field]";

    #[test]
    fn prepare_import_builds_one_line_per_product() {
        let csv = format!("{EXPORT_HEADER}\r\n'1,h,T,W,\"a, b\",3,red\r\n'2,h2,T2,W,,0,blue\r\n");

        let prepared = prepare_import(&csv).expect("prepare");
        assert_eq!(prepared.jsonl.line_count, 2);
        assert_eq!(prepared.skipped_columns, 0);
        assert_eq!(prepared.dropped_rows, 0);
        assert!(
            prepared
                .jsonl
                .body
                .lines()
                .next()
                .expect("first line")
                .contains("\"ownerId\":\"gid://shopify/Product/1\"")
        );
    }

    #[test]
    fn prepare_import_drops_rows_without_values() {
        let csv = format!("{EXPORT_HEADER}\r\n'5,h,T,W,,0,\r\n");

        let prepared = prepare_import(&csv).expect("prepare");
        assert_eq!(prepared.jsonl.line_count, 0);
        assert!(prepared.jsonl.is_empty());
        assert_eq!(prepared.dropped_rows, 1);
    }

    #[test]
    fn prepare_import_surfaces_parser_failures() {
        // Ragged record: more cells than headers.
        let err = prepare_import("id,title\r\n'1,a,b\r\n").expect_err("should fail");
        assert!(matches!(err, PorterError::Csv(_)));
    }

    #[test]
    fn prepare_import_counts_malformed_headers() {
        let csv = "id,Metafield:broken,Metafield:custom.color [json]\r\n'1,x,red\r\n";

        let prepared = prepare_import(csv).expect("prepare");
        assert_eq!(prepared.skipped_columns, 1);
        assert_eq!(prepared.jsonl.line_count, 1);
    }

    #[test]
    fn client_identifier_is_namespaced() {
        assert!(client_identifier().starts_with("metaport-product-metafields-import-"));
    }
}
