//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module carries the Admin API access token.** The token has full
//! read access to products and full write access to metafields; treat any
//! environment it runs in as production.
//!
//! # Architecture
//!
//! - Hand-written GraphQL documents POSTed with `reqwest`
//! - Typed serde structs at the wire boundary, core types everywhere else
//! - Rate limiting surfaced to the caller, never retried internally

mod admin;
pub mod types;

pub use admin::AdminClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User error from mutation (e.g., invalid input).
    #[error("User error: {0}")]
    UserError(String),

    /// The staged upload target rejected the payload.
    #[error("Staged upload failed: {0}")]
    Upload(String),
}

impl AdminShopifyError {
    /// Build the error for a response that carried neither data nor errors.
    pub(crate) fn missing_data(context: &str) -> Self {
        Self::GraphQL(vec![GraphQLError {
            message: context.to_string(),
            locations: vec![],
            path: vec![],
        }])
    }
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_shopify_error_display() {
        let err = AdminShopifyError::NotFound("bulk-operation-123".to_string());
        assert_eq!(err.to_string(), "Not found: bulk-operation-123");
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = AdminShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = AdminShopifyError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_user_error() {
        let err = AdminShopifyError::UserError("Invalid metafield type".to_string());
        assert_eq!(err.to_string(), "User error: Invalid metafield type");
    }

    #[test]
    fn test_upload_error() {
        let err = AdminShopifyError::Upload("target returned 403".to_string());
        assert_eq!(err.to_string(), "Staged upload failed: target returned 403");
    }
}
