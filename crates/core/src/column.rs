//! The dynamic column header codec.
//!
//! Export columns encode (namespace, key, type) into a single header of the
//! form `Metafield:{namespace}.{key} [{type}]`. This module is the one
//! canonical formatter/parser pair for that pattern; both pipeline
//! directions go through it rather than splitting strings at call sites.

use crate::types::MetafieldEntry;

/// Header prefix marking a dynamic metafield column.
pub const COLUMN_PREFIX: &str = "Metafield:";

/// A parsed dynamic column header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetafieldColumn {
    pub namespace: String,
    pub key: String,
    pub value_type: String,
}

impl MetafieldColumn {
    /// Render the canonical header for this column.
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "{COLUMN_PREFIX}{}.{} [{}]",
            self.namespace, self.key, self.value_type
        )
    }

    /// Parse a header into its (namespace, key, type) parts.
    ///
    /// The namespace is everything before the first `.`; the key may itself
    /// contain dots. Returns `None` for headers that don't match the
    /// pattern, including metafield-like headers with missing parts -
    /// callers treat those as a no-op for that column.
    #[must_use]
    pub fn parse(header: &str) -> Option<Self> {
        let rest = header.strip_prefix(COLUMN_PREFIX)?;
        let rest = rest.strip_suffix(']')?;
        let (name, value_type) = rest.rsplit_once(" [")?;
        let (namespace, key) = name.split_once('.')?;
        if namespace.is_empty() || key.is_empty() || value_type.is_empty() {
            return None;
        }
        Some(Self {
            namespace: namespace.to_string(),
            key: key.to_string(),
            value_type: value_type.to_string(),
        })
    }

    /// Whether a header claims to be a metafield column at all.
    ///
    /// Headers that pass this but fail [`parse`](Self::parse) are malformed
    /// and worth counting in diagnostics.
    #[must_use]
    pub fn is_metafield_header(header: &str) -> bool {
        header.starts_with(COLUMN_PREFIX)
    }
}

impl From<&MetafieldEntry> for MetafieldColumn {
    fn from(entry: &MetafieldEntry) -> Self {
        Self {
            namespace: entry.namespace.clone(),
            key: entry.key.clone(),
            value_type: entry.value_type.clone(),
        }
    }
}

impl std::fmt::Display for MetafieldColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}
