//! Bulk mutation payload types.

use serde::{Deserialize, Serialize};

/// One metafield write tuple, shaped for the `metafieldsSet` bulk mutation.
///
/// Field order is the wire order (`key, namespace, ownerId, type, value`).
/// Consumers don't depend on it, but keeping it stable makes the JSONL
/// output diffable and easy to assert on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldWrite {
    pub key: String,
    pub namespace: String,
    /// Composite identifier of the owning product.
    pub owner_id: String,
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
}

/// One product's batch of metafield writes.
///
/// Emitted only for products contributing at least one non-empty metafield
/// column; a product with nothing to write yields no unit at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationUnit {
    pub metafields: Vec<MetafieldWrite>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_wire_key_order() {
        let unit = MutationUnit {
            metafields: vec![MetafieldWrite {
                key: "color".to_string(),
                namespace: "custom".to_string(),
                owner_id: "gid://shopify/Product/1".to_string(),
                value_type: "single_line_text_field".to_string(),
                value: "red".to_string(),
            }],
        };

        let json = serde_json::to_string(&unit).expect("serialize");
        assert_eq!(
            json,
            r#"{"metafields":[{"key":"color","namespace":"custom","ownerId":"gid://shopify/Product/1","type":"single_line_text_field","value":"red"}]}"#
        );
    }
}
