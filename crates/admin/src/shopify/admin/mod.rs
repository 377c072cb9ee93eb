//! Shopify Admin API GraphQL client.
//!
//! Executes the hand-written documents in [`queries`] against the store's
//! Admin GraphQL endpoint, authenticated with the configured access token.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::config::ShopifyAdminConfig;

use super::{AdminShopifyError, GraphQLError, GraphQLErrorLocation};

mod bulk;
mod products;
pub mod queries;

/// Shopify Admin API GraphQL client.
///
/// Provides the product pagination and bulk-mutation calls the metafield
/// pipeline needs. Cheap to clone; clones share one connection pool.
///
/// # Security
///
/// This client holds an access token with HIGH PRIVILEGE access to the
/// store. Keep it on trusted infrastructure only.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    store: String,
    api_version: String,
    access_token: String,
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
    #[serde(default)]
    locations: Vec<GraphQLErrorLocationResponse>,
    #[serde(default)]
    path: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorLocationResponse {
    line: i64,
    column: i64,
}

/// A mutation `userErrors` entry, shared by every mutation payload.
#[derive(Debug, Deserialize)]
pub(crate) struct UserErrorResponse {
    #[serde(default)]
    field: Option<Vec<String>>,
    message: String,
}

/// Collapse mutation user errors into one error, or pass.
pub(crate) fn check_user_errors(errors: &[UserErrorResponse]) -> Result<(), AdminShopifyError> {
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<String> = errors
        .iter()
        .map(|e| {
            let field = e.field.as_ref().map_or_else(String::new, |f| f.join("."));
            format!("{}: {}", field, e.message)
        })
        .collect();
    Err(AdminShopifyError::UserError(messages.join("; ")))
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// # Arguments
    ///
    /// * `config` - Shopify Admin API configuration
    #[must_use]
    pub fn new(config: &ShopifyAdminConfig) -> Self {
        let client = reqwest::Client::new();

        Self {
            inner: Arc::new(AdminClientInner {
                client,
                store: config.store.clone(),
                api_version: config.api_version.clone(),
                access_token: config.access_token.expose_secret().to_string(),
            }),
        }
    }

    /// Get the store domain.
    #[must_use]
    pub fn store(&self) -> &str {
        &self.inner.store
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    /// Execute a GraphQL document with the given variables.
    async fn execute<T: DeserializeOwned>(
        &self,
        document: &'static str,
        variables: Value,
    ) -> Result<T, AdminShopifyError> {
        let endpoint = format!(
            "https://{}/admin/api/{}/graphql.json",
            self.inner.store, self.inner.api_version
        );

        let body = serde_json::json!({
            "query": document,
            "variables": variables,
        });

        let response = self
            .inner
            .client
            .post(&endpoint)
            .header("X-Shopify-Access-Token", &self.inner.access_token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        // Check for rate limiting
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let graphql_response: GraphQLResponse<T> = response.json().await?;

        // Check for GraphQL errors
        if let Some(errors) = graphql_response.errors
            && !errors.is_empty()
        {
            let converted_errors: Vec<GraphQLError> = errors
                .into_iter()
                .map(|e| GraphQLError {
                    message: e.message,
                    locations: e
                        .locations
                        .into_iter()
                        .map(|l| GraphQLErrorLocation {
                            line: l.line,
                            column: l.column,
                        })
                        .collect(),
                    path: e.path,
                })
                .collect();
            return Err(AdminShopifyError::GraphQL(converted_errors));
        }

        graphql_response
            .data
            .ok_or_else(|| AdminShopifyError::missing_data("No data in response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_collapse_into_one_message() {
        let errors = vec![
            UserErrorResponse {
                field: Some(vec![
                    "metafields".to_string(),
                    "0".to_string(),
                    "type".to_string(),
                ]),
                message: "Invalid type".to_string(),
            },
            UserErrorResponse {
                field: None,
                message: "Value too long".to_string(),
            },
        ];

        let err = check_user_errors(&errors).expect_err("should fail");
        assert_eq!(
            err.to_string(),
            "User error: metafields.0.type: Invalid type; : Value too long"
        );
    }

    #[test]
    fn empty_user_errors_pass() {
        assert!(check_user_errors(&[]).is_ok());
    }

    #[test]
    fn graphql_errors_deserialize_without_locations() {
        let payload = serde_json::json!({
            "data": null,
            "errors": [{ "message": "Throttled" }]
        });

        let response: GraphQLResponse<Value> =
            serde_json::from_value(payload).expect("deserialize");
        let errors = response.errors.expect("errors present");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Throttled");
        assert!(errors[0].locations.is_empty());
    }
}
