//! Bulk operation status.

use serde::{Deserialize, Serialize};

/// Status of a remote bulk operation.
///
/// Maps Shopify's `BulkOperationStatus` wire values. Transitions are driven
/// only by external polling results; nothing in the transcoding pipeline
/// depends on this state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulkOperationStatus {
    #[default]
    Created,
    Running,
    Completed,
    Failed,
    Canceling,
    Canceled,
    Expired,
}

impl BulkOperationStatus {
    /// Whether the operation has reached a final state and polling can stop.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Canceled | Self::Expired
        )
    }
}

impl std::fmt::Display for BulkOperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Created => "CREATED",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Canceling => "CANCELING",
            Self::Canceled => "CANCELED",
            Self::Expired => "EXPIRED",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_round_trip() {
        let status: BulkOperationStatus =
            serde_json::from_str("\"RUNNING\"").expect("deserialize");
        assert_eq!(status, BulkOperationStatus::Running);
        assert_eq!(
            serde_json::to_string(&status).expect("serialize"),
            "\"RUNNING\""
        );
    }

    #[test]
    fn terminal_states() {
        assert!(BulkOperationStatus::Completed.is_terminal());
        assert!(BulkOperationStatus::Failed.is_terminal());
        assert!(!BulkOperationStatus::Running.is_terminal());
        assert!(!BulkOperationStatus::Created.is_terminal());
    }
}
