//! Filtering and CSV reporting over transaction lists.

use std::io::Write;

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use shipledger_domain::{Category, Transaction, TransactionType};

use crate::{
    summary_service::{SummaryService, Totals},
    CoreError,
};

const REPORT_HEADERS: [&str; 8] = [
    "Date",
    "Type",
    "Party Name",
    "Description",
    "Category",
    "Reference",
    "Amount",
    "Notes",
];
const REPORT_DATE_FORMAT: &str = "%d %b %Y";

/// Inclusive date range. An unset bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, CoreError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(CoreError::InvalidOperation(format!(
                    "range start {start} is after range end {end}"
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Criteria for narrowing a transaction list. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Case-insensitive text matched against description, party name, or reference.
    pub search: Option<String>,
    pub kind: Option<TransactionType>,
    pub category: Option<Category>,
    pub range: DateRange,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.range.contains(txn.date) {
            return false;
        }
        if self.kind.is_some_and(|kind| kind != txn.kind) {
            return false;
        }
        if self.category.is_some_and(|category| category != txn.category) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                txn.description.to_lowercase().contains(&needle)
                    || txn.party_name.to_lowercase().contains(&needle)
                    || txn
                        .reference
                        .as_deref()
                        .is_some_and(|reference| reference.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Filtered transactions together with their totals, ready for export.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub range: DateRange,
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
}

impl Report {
    /// Writes the report as CSV: header, one row per transaction, an empty line,
    /// then debit, credit, and balance summary rows. Every cell is quoted.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CoreError> {
        let mut csv = csv_writer(writer);
        csv.write_record(REPORT_HEADERS)?;
        for txn in &self.transactions {
            csv.write_record(transaction_row(txn))?;
        }

        // An empty record would still be written as `""`.
        let mut writer = csv
            .into_inner()
            .map_err(|err| {
                CoreError::Io(std::io::Error::new(err.error().kind(), err.error().to_string()))
            })?;
        writer.write_all(b"\n")?;

        let mut csv = csv_writer(writer);
        for (label, value) in [
            ("Total Debits:", self.totals.total_debit),
            ("Total Credits:", self.totals.total_credit),
            ("Net Balance:", self.totals.balance),
        ] {
            let value = value.to_string();
            csv.write_record(["", "", "", "", "", label, value.as_str(), ""])?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String, CoreError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|err| CoreError::Serde(err.to_string()))
    }
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer)
}

fn transaction_row(txn: &Transaction) -> [String; 8] {
    let amount = match txn.kind {
        TransactionType::Debit => format!("-{}", txn.amount),
        TransactionType::Credit => format!("+{}", txn.amount),
    };
    [
        txn.date.format(REPORT_DATE_FORMAT).to_string(),
        txn.kind.to_string().to_uppercase(),
        txn.party_name.clone(),
        txn.description.clone(),
        txn.category.to_string(),
        txn.reference.clone().unwrap_or_default(),
        amount,
        txn.notes.clone().unwrap_or_default(),
    ]
}

pub struct ReportService;

impl ReportService {
    /// Keeps the transactions matching `filter`, preserving their order.
    pub fn filter(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .cloned()
            .collect()
    }

    /// Builds a report for `range`. An empty selection is refused.
    pub fn build(transactions: &[Transaction], range: DateRange) -> Result<Report, CoreError> {
        let filter = TransactionFilter {
            range,
            ..TransactionFilter::default()
        };
        let selected = Self::filter(transactions, &filter);
        if selected.is_empty() {
            return Err(CoreError::InvalidOperation(
                "no transactions found for the selected date range".into(),
            ));
        }
        let totals = SummaryService::aggregate(&selected);
        Ok(Report {
            range,
            transactions: selected,
            totals,
        })
    }
}

/// File name for an exported report, encoding whichever bounds are set.
pub fn report_file_name(prefix: &str, range: &DateRange) -> String {
    let suffix = match (range.start(), range.end()) {
        (Some(start), Some(end)) => format!("_{start}_to_{end}"),
        (Some(start), None) => format!("_from_{start}"),
        (None, Some(end)) => format!("_until_{end}"),
        (None, None) => String::new(),
    };
    format!("{prefix}{suffix}.csv")
}
