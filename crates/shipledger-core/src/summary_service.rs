//! Aggregation helpers for debit/credit totals.

use rust_decimal::Decimal;

use shipledger_domain::{Transaction, TransactionType};

/// Debit and credit totals for a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// Total credits minus total debits.
    pub balance: Decimal,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums amounts by direction in a single pass. Pure; performs no I/O.
    pub fn aggregate(transactions: &[Transaction]) -> Totals {
        let (total_debit, total_credit) = transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(debit, credit), txn| match txn.kind {
                TransactionType::Debit => (debit + txn.amount, credit),
                TransactionType::Credit => (debit, credit + txn.amount),
            },
        );
        Totals {
            total_debit,
            total_credit,
            balance: total_credit - total_debit,
        }
    }
}
