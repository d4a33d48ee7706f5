//! Per-id outcome collection for batch operations

use serde::{Deserialize, Serialize};

/// Result of one id within a batch operation.
///
/// Batch commands (releasing runs across several cloudspaces, deleting
/// several assets) collect one of these per id and report a summary instead
/// of aborting on the first failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// The id the operation was applied to
    pub id: u64,

    /// "OK" or "FAIL"
    pub result: String,

    /// Error message on failure, empty on success
    #[serde(default)]
    pub message: String,
}

impl BatchOutcome {
    pub fn ok(id: u64) -> Self {
        Self {
            id,
            result: "OK".to_string(),
            message: String::new(),
        }
    }

    pub fn fail(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            result: "FAIL".to_string(),
            message: message.into(),
        }
    }

    pub fn is_fail(&self) -> bool {
        self.result == "FAIL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_constructors() {
        let ok = BatchOutcome::ok(4);
        assert!(!ok.is_fail());
        assert_eq!(ok.result, "OK");

        let fail = BatchOutcome::fail(5, "boom");
        assert!(fail.is_fail());
        assert_eq!(fail.message, "boom");
    }
}
