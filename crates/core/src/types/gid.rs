//! Composite resource identifier helpers.
//!
//! Shopify addresses resources with composite identifiers such as
//! `gid://shopify/Product/123`. Exported rows carry only the numeric
//! suffix, prefixed with a single quote so spreadsheet tools keep the
//! cell as text instead of coercing it to a number; the import path
//! strips the guard and reassembles the full identifier.

/// Composite identifier prefix for products.
pub const PRODUCT_GID_PREFIX: &str = "gid://shopify/Product/";

/// Cell prefix that defeats spreadsheet numeric coercion.
pub const SPREADSHEET_GUARD: char = '\'';

/// Build a product's composite identifier from its bare numeric id.
#[must_use]
pub fn product_gid(numeric: &str) -> String {
    format!("{PRODUCT_GID_PREFIX}{numeric}")
}

/// Extract the bare numeric id from a composite identifier.
///
/// Returns the trailing path segment, or the whole input when it has no
/// `/` separators.
#[must_use]
pub fn numeric_id(gid: &str) -> &str {
    gid.rsplit('/').next().unwrap_or(gid)
}

/// Render a numeric id as a guarded spreadsheet cell (`'123`).
#[must_use]
pub fn guard_id(numeric: &str) -> String {
    format!("{SPREADSHEET_GUARD}{numeric}")
}

/// Strip the spreadsheet guard from an imported id cell.
///
/// Cells that never carried the guard (hand-edited files) pass through
/// unchanged.
#[must_use]
pub fn strip_guard(cell: &str) -> &str {
    cell.strip_prefix(SPREADSHEET_GUARD).unwrap_or(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_takes_trailing_segment() {
        assert_eq!(numeric_id("gid://shopify/Product/123"), "123");
        assert_eq!(numeric_id("123"), "123");
    }

    #[test]
    fn guard_round_trips() {
        let gid = "gid://shopify/Product/8441793839203";
        let cell = guard_id(numeric_id(gid));
        assert_eq!(cell, "'8441793839203");
        assert_eq!(product_gid(strip_guard(&cell)), gid);
    }

    #[test]
    fn strip_guard_passes_unguarded_cells_through() {
        assert_eq!(strip_guard("42"), "42");
    }
}
