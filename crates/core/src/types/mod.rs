//! Core types for MetaPort.

pub mod gid;
pub mod mutation;
pub mod product;
pub mod status;

pub use gid::{guard_id, numeric_id, product_gid, strip_guard};
pub use mutation::{MetafieldWrite, MutationUnit};
pub use product::{MetafieldEntry, PageInfo, ProductPage, ProductRecord};
pub use status::BulkOperationStatus;
