//! Caller-supplied transaction input and its field-level validation.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    category::Category,
    transaction::{Transaction, TransactionType},
};

/// Editable fields of a transaction as captured from the user.
///
/// Nothing here is trusted: call [`TransactionFormData::validate`] to obtain a
/// [`ValidatedForm`] before building or updating a [`crate::Transaction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFormData {
    pub date: NaiveDate,
    pub kind: TransactionType,
    pub description: String,
    pub amount: Decimal,
    pub party_name: String,
    pub category: Option<Category>,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl TransactionFormData {
    /// Checks every field and returns all failures at once.
    pub fn validate(self) -> Result<ValidatedForm, ValidationErrors> {
        let mut errors = Vec::new();

        let description = self.description.trim().to_string();
        if description.is_empty() {
            errors.push(FieldError::new(FormField::Description, FieldErrorKind::Required));
        }
        if self.amount <= Decimal::ZERO {
            errors.push(FieldError::new(FormField::Amount, FieldErrorKind::NotPositive));
        } else if self.amount.normalize().scale() > AMOUNT_SCALE {
            errors.push(FieldError::new(FormField::Amount, FieldErrorKind::TooPrecise));
        } else if self.amount >= amount_limit() {
            errors.push(FieldError::new(FormField::Amount, FieldErrorKind::TooLarge));
        }
        let party_name = self.party_name.trim().to_string();
        if party_name.is_empty() {
            errors.push(FieldError::new(FormField::PartyName, FieldErrorKind::Required));
        }
        if self.category.is_none() {
            errors.push(FieldError::new(FormField::Category, FieldErrorKind::Required));
        }

        match self.category {
            Some(category) if errors.is_empty() => Ok(ValidatedForm {
                date: self.date,
                kind: self.kind,
                description,
                amount: self.amount,
                party_name,
                category,
                reference: normalize_optional(self.reference),
                notes: normalize_optional(self.notes),
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

impl TransactionFormData {
    /// Blank input as a fresh entry form presents it: a debit dated `date`.
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date,
            kind: TransactionType::Debit,
            description: String::new(),
            amount: Decimal::ZERO,
            party_name: String::new(),
            category: None,
            reference: None,
            notes: None,
        }
    }
}

/// Prefills the form with a stored record's editable fields.
impl From<&Transaction> for TransactionFormData {
    fn from(txn: &Transaction) -> Self {
        Self {
            date: txn.date,
            kind: txn.kind,
            description: txn.description.clone(),
            amount: txn.amount,
            party_name: txn.party_name.clone(),
            category: Some(txn.category),
            reference: txn.reference.clone(),
            notes: txn.notes.clone(),
        }
    }
}

/// Input that passed validation. Only obtainable through [`TransactionFormData::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub(crate) date: NaiveDate,
    pub(crate) kind: TransactionType,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
    pub(crate) party_name: String,
    pub(crate) category: Category,
    pub(crate) reference: Option<String>,
    pub(crate) notes: Option<String>,
}

/// Amounts carry at most paise precision.
const AMOUNT_SCALE: u32 = 2;

/// Amounts are persisted as JSON numbers (f64). Below 10^13 a two-decimal
/// amount has at most 15 significant digits and reads back unchanged.
fn amount_limit() -> Decimal {
    Decimal::new(10_000_000_000_000, 0)
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Amount,
    PartyName,
    Category,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::Description => "description",
            FormField::Amount => "amount",
            FormField::PartyName => "party_name",
            FormField::Category => "category",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    NotPositive,
    TooPrecise,
    TooLarge,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldErrorKind::Required => "required",
            FieldErrorKind::NotPositive => "must be greater than zero",
            FieldErrorKind::TooPrecise => "must have at most two decimal places",
            FieldErrorKind::TooLarge => "must be less than 10,000,000,000,000",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: FormField,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: FormField, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }
}

/// Every field failure found for one form submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.iter().map(|error| error.field)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.fields().any(|candidate| candidate == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
