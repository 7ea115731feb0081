//! Parsing of `key=value` command arguments into typed ledger input.

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shipledger_core::{DateRange, TransactionFilter};
use shipledger_domain::{Category, TransactionFormData, TransactionType};

use crate::cli::core::CommandError;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub const TRANSACTION_KEYS: &[&str] = &[
    "date",
    "type",
    "description",
    "amount",
    "party",
    "category",
    "reference",
    "notes",
];
pub const FILTER_KEYS: &[&str] = &["search", "type", "category", "from", "to"];
pub const RANGE_KEYS: &[&str] = &["from", "to"];
pub const REPORT_KEYS: &[&str] = &["from", "to", "out"];

/// Ordered `key=value` pairs, restricted to a known key set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldArgs {
    pairs: Vec<(String, String)>,
}

impl FieldArgs {
    pub fn parse(args: &[&str], allowed: &[&str]) -> Result<Self, CommandError> {
        let mut pairs = Vec::with_capacity(args.len());
        for arg in args {
            let Some((key, value)) = arg.split_once('=') else {
                return Err(CommandError::InvalidArguments(format!(
                    "Expected key=value, got `{arg}`. Keys: {}",
                    allowed.join(", ")
                )));
            };
            let key = canonical_key(&key.trim().to_lowercase());
            if !allowed.contains(&key.as_str()) {
                return Err(CommandError::InvalidArguments(format!(
                    "Unknown field `{key}`. Keys: {}",
                    allowed.join(", ")
                )));
            }
            pairs.push((key, value.trim().to_string()));
        }
        Ok(Self { pairs })
    }

    /// Last value given for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Overlays the given fields onto `base`. An empty value clears optional fields.
    pub fn apply_to(&self, mut base: TransactionFormData) -> Result<TransactionFormData, CommandError> {
        if let Some(value) = self.get("date") {
            base.date = parse_date("date", value)?;
        }
        if let Some(value) = self.get("type") {
            base.kind = parse_kind(value)?;
        }
        if let Some(value) = self.get("description") {
            base.description = value.to_string();
        }
        if let Some(value) = self.get("amount") {
            base.amount = parse_amount(value)?;
        }
        if let Some(value) = self.get("party") {
            base.party_name = value.to_string();
        }
        if let Some(value) = self.get("category") {
            base.category = if value.is_empty() {
                None
            } else {
                Some(parse_category(value)?)
            };
        }
        if let Some(value) = self.get("reference") {
            base.reference = Some(value.to_string());
        }
        if let Some(value) = self.get("notes") {
            base.notes = Some(value.to_string());
        }
        Ok(base)
    }

    pub fn date_range(&self) -> Result<DateRange, CommandError> {
        let start = self.optional_date("from")?;
        let end = self.optional_date("to")?;
        Ok(DateRange::new(start, end)?)
    }

    pub fn filter(&self) -> Result<TransactionFilter, CommandError> {
        Ok(TransactionFilter {
            search: self
                .get("search")
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            kind: self.get("type").map(parse_kind).transpose()?,
            category: self.get("category").map(parse_category).transpose()?,
            range: self.date_range()?,
        })
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        self.get("out")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    fn optional_date(&self, key: &str) -> Result<Option<NaiveDate>, CommandError> {
        match self.get(key) {
            None | Some("") => Ok(None),
            Some(value) => parse_date(key, value).map(Some),
        }
    }
}

fn canonical_key(key: &str) -> String {
    match key {
        "party_name" | "partyname" => "party".into(),
        "ref" => "reference".into(),
        "kind" => "type".into(),
        "note" => "notes".into(),
        other => other.into(),
    }
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        CommandError::InvalidArguments(format!(
            "Invalid {key} `{value}`; expected YYYY-MM-DD."
        ))
    })
}

fn parse_kind(value: &str) -> Result<TransactionType, CommandError> {
    value
        .parse()
        .map_err(|err: shipledger_domain::ParseTransactionTypeError| {
            CommandError::InvalidArguments(err.to_string())
        })
}

fn parse_category(value: &str) -> Result<Category, CommandError> {
    value.parse().map_err(|err: shipledger_domain::ParseCategoryError| {
        CommandError::InvalidArguments(format!("{err}. Run `categories` for the list."))
    })
}

fn parse_amount(value: &str) -> Result<Decimal, CommandError> {
    let cleaned: String = value.chars().filter(|ch| *ch != ',' && *ch != '_').collect();
    cleaned
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("Invalid amount `{value}`.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn fields_overlay_a_blank_form() {
        let args = FieldArgs::parse(
            &[
                "type=credit",
                "description=Agency fee",
                "amount=1,500.50",
                "party_name=MV Aurora",
                "category=agency fees",
                "ref=AF-1",
            ],
            TRANSACTION_KEYS,
        )
        .unwrap();
        let form = args.apply_to(TransactionFormData::blank(today())).unwrap();

        assert_eq!(form.date, today());
        assert_eq!(form.kind, TransactionType::Credit);
        assert_eq!(form.amount, dec!(1500.50));
        assert_eq!(form.party_name, "MV Aurora");
        assert_eq!(form.category, Some(Category::AgencyFees));
        assert_eq!(form.reference.as_deref(), Some("AF-1"));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn missing_fields_leave_the_base_untouched() {
        let mut base = TransactionFormData::blank(today());
        base.description = "Berth hire".into();
        base.notes = Some("pending".into());

        let args = FieldArgs::parse(&["notes="], TRANSACTION_KEYS).unwrap();
        let form = args.apply_to(base).unwrap();
        assert_eq!(form.description, "Berth hire");
        assert_eq!(form.notes.as_deref(), Some(""));
        assert!(form.validate().is_err());
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        assert!(FieldArgs::parse(&["amount"], TRANSACTION_KEYS).is_err());
        assert!(FieldArgs::parse(&["colour=red"], TRANSACTION_KEYS).is_err());

        let bad_date = FieldArgs::parse(&["date=01/07/2024"], TRANSACTION_KEYS).unwrap();
        assert!(bad_date.apply_to(TransactionFormData::blank(today())).is_err());

        let bad_amount = FieldArgs::parse(&["amount=12x"], TRANSACTION_KEYS).unwrap();
        assert!(bad_amount.apply_to(TransactionFormData::blank(today())).is_err());
    }

    #[test]
    fn filters_and_ranges_parse() {
        let args = FieldArgs::parse(
            &["search=kandla", "type=dr", "from=2024-01-01", "to=2024-01-31"],
            FILTER_KEYS,
        )
        .unwrap();
        let filter = args.filter().unwrap();
        assert_eq!(filter.search.as_deref(), Some("kandla"));
        assert_eq!(filter.kind, Some(TransactionType::Debit));
        assert!(filter.range.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!filter.range.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));

        let inverted = FieldArgs::parse(&["from=2024-02-01", "to=2024-01-01"], RANGE_KEYS).unwrap();
        assert!(inverted.date_range().is_err());
    }
}
