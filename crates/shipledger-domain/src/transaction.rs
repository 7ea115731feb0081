//! Domain model for ledger transactions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{category::Category, common::*, form::ValidatedForm};

/// A single debit or credit booked by the agency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub party_name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a new record from validated input, stamping both timestamps with `now`.
    pub fn new(id: TransactionId, form: ValidatedForm, now: DateTime<Utc>) -> Self {
        Self {
            id,
            date: form.date,
            kind: form.kind,
            description: form.description,
            amount: form.amount,
            party_name: form.party_name,
            category: form.category,
            reference: form.reference,
            notes: form.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every editable field. `id` and `created_at` are left untouched.
    pub fn replace_fields(&mut self, form: ValidatedForm, updated_at: DateTime<Utc>) {
        self.date = form.date;
        self.kind = form.kind;
        self.description = form.description;
        self.amount = form.amount;
        self.party_name = form.party_name;
        self.category = form.category;
        self.reference = form.reference;
        self.notes = form.notes;
        self.updated_at = updated_at;
    }

    /// Signed amount: negative for debits, positive for credits.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Debit => -self.amount,
            TransactionType::Credit => self.amount,
        }
    }

    pub fn is_debit(&self) -> bool {
        self.kind == TransactionType::Debit
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &TransactionId {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} {} {} [{}]",
            self.date, self.kind, self.party_name, self.category
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Direction of money flow for a transaction.
pub enum TransactionType {
    /// Money paid out by the agency.
    Debit,
    /// Money received by the agency.
    Credit,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Debit => "debit",
            TransactionType::Credit => "credit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transaction type `{0}` (expected debit or credit)")]
pub struct ParseTransactionTypeError(pub String);

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debit" | "dr" => Ok(TransactionType::Debit),
            "credit" | "cr" => Ok(TransactionType::Credit),
            other => Err(ParseTransactionTypeError(other.to_string())),
        }
    }
}
