//! MetaPort Admin - Shopify Admin API client and bulk metafield services.
//!
//! # Security
//!
//! **This crate carries the high-privilege Shopify Admin API access token.**
//! The token can read every product and rewrite every metafield in the
//! store; keep it out of logs and out of source control.
//!
//! # Architecture
//!
//! - Hand-written GraphQL documents sent with `reqwest` (no codegen)
//! - Direct API calls to Shopify - no local database, nothing persisted
//! - The transcoding pipeline itself lives in `metaport-core`; this crate
//!   supplies the transport and glues the pipeline to it
//!
//! # Example
//!
//! ```rust,ignore
//! use metaport_admin::{config::ShopifyAdminConfig, porter, shopify::AdminClient};
//!
//! let config = ShopifyAdminConfig::from_env()?;
//! let client = AdminClient::new(&config);
//!
//! // Export every product's metafields as CSV text
//! let export = porter::export_csv(&client).await?;
//!
//! // Prepare and submit an edited file
//! let prepared = porter::prepare_import(&csv_text)?;
//! let job = porter::submit_import(&client, &prepared).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod porter;
pub mod shopify;
