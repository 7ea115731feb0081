use std::sync::{Mutex, MutexGuard};

use shipledger_domain::Transaction;

use crate::CoreError;

/// Result of reading the persisted ledger blob.
///
/// Missing and corrupt blobs are distinct outcomes so callers can tell them
/// apart, but both fail open to an empty ledger through
/// [`LoadOutcome::into_transactions`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(Vec<Transaction>),
    Missing,
    Corrupt { reason: String },
}

impl LoadOutcome {
    /// Decodes a serialized ledger. Parse failures become [`LoadOutcome::Corrupt`].
    pub fn parse(blob: &str) -> Self {
        match serde_json::from_str::<Vec<Transaction>>(blob) {
            Ok(transactions) => LoadOutcome::Loaded(transactions),
            Err(err) => LoadOutcome::Corrupt {
                reason: err.to_string(),
            },
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, LoadOutcome::Corrupt { .. })
    }

    /// Applies the fail-open policy: anything but a successful load is an empty ledger.
    pub fn into_transactions(self) -> Vec<Transaction> {
        match self {
            LoadOutcome::Loaded(transactions) => transactions,
            LoadOutcome::Missing | LoadOutcome::Corrupt { .. } => Vec::new(),
        }
    }
}

/// Abstraction over the single persisted slot holding the full transaction list.
pub trait LedgerStore: Send + Sync {
    /// Reads and decodes the persisted list. Never fails; see [`LoadOutcome`].
    fn load(&self) -> LoadOutcome;

    /// Serializes `transactions` and overwrites the persisted list as one unit.
    fn save(&self, transactions: &[Transaction]) -> Result<(), CoreError>;
}

impl<S: LedgerStore + ?Sized> LedgerStore for Box<S> {
    fn load(&self) -> LoadOutcome {
        (**self).load()
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        (**self).save(transactions)
    }
}

/// Serializes a transaction list into the persisted blob format.
pub fn serialize_transactions(transactions: &[Transaction]) -> Result<String, CoreError> {
    Ok(serde_json::to_string(transactions)?)
}

/// In-memory store that keeps the serialized blob, mirroring a single storage key.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    blob: Mutex<Option<String>>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a raw blob, which need not be valid JSON.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// Returns the raw persisted blob, if any.
    pub fn blob(&self) -> Option<String> {
        self.slot().clone()
    }

    fn slot(&self) -> MutexGuard<'_, Option<String>> {
        self.blob
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> LoadOutcome {
        match self.slot().as_deref() {
            Some(blob) => LoadOutcome::parse(blob),
            None => LoadOutcome::Missing,
        }
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        let blob = serialize_transactions(transactions)?;
        *self.slot() = Some(blob);
        Ok(())
    }
}
