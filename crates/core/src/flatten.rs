//! Flattening products into rectangular rows, and back.
//!
//! The export direction turns each product into one spreadsheet row with a
//! dynamic column per metafield, then widens every row to the batch-wide
//! union of dynamic columns so the output is a valid rectangular table.
//! The import direction reverses it: parsed rows are scanned for metafield
//! columns and folded into one mutation unit per product.

use indexmap::{IndexMap, IndexSet};

use crate::column::MetafieldColumn;
use crate::types::{MetafieldWrite, MutationUnit, ProductRecord, gid};

/// One tabular row: column name to string value, in column order.
pub type FlatRecord = IndexMap<String, String>;

/// Fixed columns present in every export, ahead of the dynamic ones.
pub const FIXED_COLUMNS: [&str; 6] = ["id", "handle", "title", "type", "tags", "total_inventory"];

/// Flatten a collected product batch into rectangular rows.
///
/// Every returned record carries the identical column sequence: the fixed
/// columns followed by the union of dynamic columns across the whole
/// batch in first-seen order, with absent values backfilled as empty
/// strings. A pure fold over the batch - no state survives the call.
#[must_use]
pub fn flatten(products: &[ProductRecord]) -> Vec<FlatRecord> {
    let rows: Vec<FlatRecord> = products.iter().map(flatten_one).collect();
    let union = dynamic_columns(&rows);

    rows.iter()
        .map(|row| {
            let mut out = FlatRecord::with_capacity(FIXED_COLUMNS.len() + union.len());
            for column in FIXED_COLUMNS {
                out.insert(column.to_string(), row.get(column).cloned().unwrap_or_default());
            }
            for column in &union {
                out.insert(column.clone(), row.get(column).cloned().unwrap_or_default());
            }
            out
        })
        .collect()
}

fn flatten_one(product: &ProductRecord) -> FlatRecord {
    let mut row = FlatRecord::new();
    row.insert("id".to_string(), gid::guard_id(&product.id));
    row.insert("handle".to_string(), product.handle.clone());
    row.insert("title".to_string(), product.title.clone());
    row.insert("type".to_string(), product.product_type.clone());
    row.insert("tags".to_string(), product.tags.join(", "));
    row.insert(
        "total_inventory".to_string(),
        product.total_inventory.to_string(),
    );
    for entry in &product.metafields {
        row.insert(MetafieldColumn::from(entry).header(), entry.value.clone());
    }
    row
}

/// Union of non-fixed column names across a batch, in first-seen order.
#[must_use]
pub fn dynamic_columns(rows: &[FlatRecord]) -> Vec<String> {
    let mut union = IndexSet::new();
    for row in rows {
        for column in row.keys() {
            if !FIXED_COLUMNS.contains(&column.as_str()) {
                union.insert(column.clone());
            }
        }
    }
    union.into_iter().collect()
}

/// Outcome of unflattening imported rows.
///
/// The counts surface what the scan silently ignored: `skipped_columns` is
/// metafield-like headers that failed to parse, `dropped_rows` is rows
/// that produced no mutation unit (all metafield cells empty, or no usable
/// id). Neither is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnflattenReport {
    pub units: Vec<MutationUnit>,
    pub skipped_columns: usize,
    pub dropped_rows: usize,
}

/// Fold imported rows back into per-product mutation units.
///
/// For each row, every parsable `Metafield:` column holding a non-empty
/// value becomes one write tuple whose owner is reassembled from the
/// row's `id` cell (spreadsheet guard stripped). Rows contributing no
/// tuples are dropped entirely rather than emitted empty.
#[must_use]
pub fn unflatten(rows: &[FlatRecord]) -> UnflattenReport {
    let mut report = UnflattenReport::default();

    for row in rows {
        let owner = row
            .get("id")
            .map(|cell| gid::strip_guard(cell))
            .filter(|id| !id.is_empty());
        let Some(owner) = owner else {
            report.dropped_rows += 1;
            continue;
        };
        let owner_id = gid::product_gid(owner);

        let mut metafields = Vec::new();
        for (header, value) in row {
            if !MetafieldColumn::is_metafield_header(header) {
                continue;
            }
            match MetafieldColumn::parse(header) {
                Some(column) => {
                    if value.is_empty() {
                        continue;
                    }
                    metafields.push(MetafieldWrite {
                        key: column.key,
                        namespace: column.namespace,
                        owner_id: owner_id.clone(),
                        value_type: column.value_type,
                        value: value.clone(),
                    });
                }
                None => report.skipped_columns += 1,
            }
        }

        if metafields.is_empty() {
            report.dropped_rows += 1;
            continue;
        }
        report.units.push(MutationUnit { metafields });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetafieldEntry;

    fn entry(namespace: &str, key: &str, value_type: &str, value: &str) -> MetafieldEntry {
        MetafieldEntry {
            namespace: namespace.to_string(),
            key: key.to_string(),
            value_type: value_type.to_string(),
            value: value.to_string(),
        }
    }

    fn product(id: &str, tags: &[&str], metafields: Vec<MetafieldEntry>) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            handle: format!("handle-{id}"),
            title: format!("Product {id}"),
            product_type: "Widget".to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
            total_inventory: 7,
            metafields,
        }
    }

    #[test]
    fn flattens_fixed_columns_and_metafields() {
        let products = vec![product(
            "1",
            &["a", "b"],
            vec![entry("custom", "color", "single_line_text_field", "red")],
        )];

        let rows = flatten(&products);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row["id"], "'1");
        assert_eq!(row["tags"], "a, b");
        assert_eq!(row["total_inventory"], "7");
        assert_eq!(row["Metafield:custom.color [single_line_text_field]"], "red");
    }

    #[test]
    fn batches_are_rectangular() {
        let products = vec![
            product("1", &[], vec![entry("custom", "color", "json", "red")]),
            product("2", &[], vec![entry("specs", "weight", "number_integer", "3")]),
            product("3", &[], vec![]),
        ];

        let rows = flatten(&products);
        let columns: Vec<IndexSet<&String>> =
            rows.iter().map(|r| r.keys().collect()).collect();
        assert_eq!(columns[0], columns[1]);
        assert_eq!(columns[1], columns[2]);

        // Absent metafields are backfilled with empty strings.
        assert_eq!(rows[1]["Metafield:custom.color [json]"], "");
        assert_eq!(rows[2]["Metafield:specs.weight [number_integer]"], "");
    }

    #[test]
    fn dynamic_union_keeps_first_seen_order() {
        let products = vec![
            product("1", &[], vec![entry("b", "later", "json", "x")]),
            product("2", &[], vec![entry("a", "earlier", "json", "y")]),
        ];

        let rows = flatten(&products);
        assert_eq!(
            dynamic_columns(&rows),
            vec![
                "Metafield:b.later [json]".to_string(),
                "Metafield:a.earlier [json]".to_string(),
            ]
        );
    }

    #[test]
    fn unflatten_reassembles_owner_ids() {
        let products = vec![product(
            "1",
            &["a", "b"],
            vec![entry("custom", "color", "single_line_text_field", "red")],
        )];

        let report = unflatten(&flatten(&products));
        assert_eq!(report.units.len(), 1);
        assert_eq!(report.dropped_rows, 0);
        let write = &report.units[0].metafields[0];
        assert_eq!(write.key, "color");
        assert_eq!(write.namespace, "custom");
        assert_eq!(write.owner_id, "gid://shopify/Product/1");
        assert_eq!(write.value_type, "single_line_text_field");
        assert_eq!(write.value, "red");
    }

    #[test]
    fn rows_with_no_metafield_values_are_dropped() {
        let mut row = FlatRecord::new();
        row.insert("id".to_string(), "'5".to_string());
        row.insert("title".to_string(), "Empty".to_string());
        row.insert("Metafield:custom.color [json]".to_string(), String::new());

        let report = unflatten(&[row]);
        assert!(report.units.is_empty());
        assert_eq!(report.dropped_rows, 1);
    }

    #[test]
    fn rows_without_an_id_are_dropped() {
        let mut row = FlatRecord::new();
        row.insert("Metafield:custom.color [json]".to_string(), "red".to_string());

        let report = unflatten(&[row]);
        assert!(report.units.is_empty());
        assert_eq!(report.dropped_rows, 1);
    }

    #[test]
    fn malformed_headers_skip_the_column_only() {
        let mut row = FlatRecord::new();
        row.insert("id".to_string(), "'9".to_string());
        row.insert("Metafield:broken".to_string(), "oops".to_string());
        row.insert("Metafield:custom.color [json]".to_string(), "red".to_string());

        let report = unflatten(&[row]);
        assert_eq!(report.skipped_columns, 1);
        assert_eq!(report.units.len(), 1);
        assert_eq!(report.units[0].metafields.len(), 1);
        assert_eq!(report.units[0].metafields[0].key, "color");
    }

    #[test]
    fn round_trips_each_product_to_one_unit() {
        let products = vec![
            product(
                "1",
                &["x"],
                vec![
                    entry("custom", "color", "single_line_text_field", "red"),
                    entry("specs", "weight", "number_integer", "12"),
                ],
            ),
            product("2", &[], vec![entry("custom", "color", "single_line_text_field", "blue")]),
        ];

        let report = unflatten(&flatten(&products));
        assert_eq!(report.units.len(), 2);
        assert_eq!(report.units[0].metafields.len(), 2);
        assert_eq!(report.units[1].metafields.len(), 1);
        assert_eq!(
            report.units[1].metafields[0].owner_id,
            "gid://shopify/Product/2"
        );
    }
}
