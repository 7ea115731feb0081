//! Create, update, delete, and lookup over the persisted transaction list.

use std::sync::Arc;

use shipledger_domain::{Identifiable, Transaction, TransactionFormData, TransactionId};

use crate::{
    storage::{LedgerStore, LoadOutcome},
    time::Clock,
    CoreError,
};

/// Ledger operations layered on an injected [`LedgerStore`].
///
/// Every mutating call loads the full list, changes it in memory, and writes
/// the full list back. Missing records are reported through `Option`/`bool`
/// results rather than errors.
pub struct LedgerService<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: LedgerStore> LedgerService<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the raw load outcome so callers can surface corrupt data.
    pub fn load_outcome(&self) -> LoadOutcome {
        let outcome = self.store.load();
        if let LoadOutcome::Corrupt { reason } = &outcome {
            tracing::warn!(%reason, "persisted ledger is unreadable; treating it as empty");
        }
        outcome
    }

    /// All transactions in stored order (newest first for freshly created ones).
    pub fn list(&self) -> Vec<Transaction> {
        self.load_outcome().into_transactions()
    }

    /// Validates `form`, prepends a new record, and persists the list.
    pub fn create(&self, form: TransactionFormData) -> Result<Transaction, CoreError> {
        let validated = form.validate()?;
        let mut transactions = self.list();
        let id = unique_id(&transactions);
        let transaction = Transaction::new(id, validated, self.clock.now());
        transactions.insert(0, transaction.clone());
        self.store.save(&transactions)?;
        tracing::debug!(id = %transaction.id, "transaction created");
        Ok(transaction)
    }

    /// Replaces every editable field of the record with `id`.
    ///
    /// Returns `Ok(None)` without writing when no record matches.
    pub fn update(
        &self,
        id: &TransactionId,
        form: TransactionFormData,
    ) -> Result<Option<Transaction>, CoreError> {
        let validated = form.validate()?;
        let mut transactions = self.list();
        let Some(existing) = transactions.iter_mut().find(|txn| &txn.id == id) else {
            tracing::debug!(%id, "update skipped; transaction not found");
            return Ok(None);
        };
        let updated_at = self.clock.now().max(existing.updated_at);
        existing.replace_fields(validated, updated_at);
        let updated = existing.clone();
        self.store.save(&transactions)?;
        tracing::debug!(%id, "transaction updated");
        Ok(Some(updated))
    }

    /// Removes the record with `id`. Returns `Ok(false)` without writing when absent.
    pub fn delete(&self, id: &TransactionId) -> Result<bool, CoreError> {
        let transactions = self.list();
        let before = transactions.len();
        let remaining: Vec<Transaction> = transactions
            .into_iter()
            .filter(|txn| &txn.id != id)
            .collect();
        if remaining.len() == before {
            tracing::debug!(%id, "delete skipped; transaction not found");
            return Ok(false);
        }
        self.store.save(&remaining)?;
        tracing::debug!(%id, "transaction deleted");
        Ok(true)
    }

    pub fn find_by_id(&self, id: &TransactionId) -> Option<Transaction> {
        self.list().into_iter().find(|txn| txn.id() == id)
    }
}

fn unique_id(existing: &[Transaction]) -> TransactionId {
    loop {
        let candidate = TransactionId::generate();
        if existing.iter().all(|txn| txn.id != candidate) {
            return candidate;
        }
    }
}
