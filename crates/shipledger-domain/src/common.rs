//! Shared traits and identifier types for ledger entities.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ID_PREFIX: &str = "txn_";

/// Opaque identifier assigned to a transaction when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generates a fresh identifier backed by a random UUID.
    pub fn generate() -> Self {
        Self(format!("{}{}", ID_PREFIX, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exposes a stable identifier for entities stored in the ledger.
pub trait Identifiable {
    fn id(&self) -> &TransactionId;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_prefixed_and_distinct() {
        let first = TransactionId::generate();
        let second = TransactionId::generate();
        assert!(first.as_str().starts_with("txn_"));
        assert_ne!(first, second);
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = TransactionId::from("txn_1700000000000_abc123def");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"txn_1700000000000_abc123def\"");
    }
}
