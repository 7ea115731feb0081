//! Plain-text rendering of transactions and totals for the shell.

use rust_decimal::Decimal;
use shipledger_core::Totals;
use shipledger_domain::{Transaction, TransactionType};

use crate::currency::{format_amount, format_date};

/// Currency settings applied when rendering amounts.
#[derive(Debug, Clone, Copy)]
pub struct MoneyStyle<'a> {
    pub symbol: &'a str,
    pub locale: &'a str,
}

impl MoneyStyle<'_> {
    pub fn amount(&self, amount: Decimal) -> String {
        format_amount(amount, self.symbol, self.locale)
    }

    fn signed(&self, txn: &Transaction) -> String {
        let amount = self.amount(txn.amount);
        match txn.kind {
            TransactionType::Debit => format!("-{amount}"),
            TransactionType::Credit => format!("+{amount}"),
        }
    }
}

/// One summary line per transaction, suitable for lists.
pub fn transaction_line(txn: &Transaction, style: MoneyStyle<'_>) -> String {
    let mut line = format!(
        "{}  {}  {:<6}  {:>16}  {}: {} [{}]",
        txn.id,
        format_date(txn.date),
        txn.kind.to_string().to_uppercase(),
        style.signed(txn),
        txn.party_name,
        txn.description,
        txn.category
    );
    if let Some(reference) = &txn.reference {
        line.push_str(&format!(" ref {reference}"));
    }
    line
}

pub fn transaction_detail(txn: &Transaction, style: MoneyStyle<'_>) -> Vec<String> {
    let mut lines = vec![
        format!("  ID          : {}", txn.id),
        format!("  Date        : {}", format_date(txn.date)),
        format!("  Type        : {}", txn.kind.to_string().to_uppercase()),
        format!("  Amount      : {}", style.signed(txn)),
        format!("  Party       : {}", txn.party_name),
        format!("  Description : {}", txn.description),
        format!("  Category    : {}", txn.category),
    ];
    if let Some(reference) = &txn.reference {
        lines.push(format!("  Reference   : {reference}"));
    }
    if let Some(notes) = &txn.notes {
        lines.push(format!("  Notes       : {notes}"));
    }
    lines.push(format!("  Created     : {}", txn.created_at.to_rfc3339()));
    lines.push(format!("  Updated     : {}", txn.updated_at.to_rfc3339()));
    lines
}

pub fn totals_lines(totals: &Totals, style: MoneyStyle<'_>) -> [String; 3] {
    [
        format!("  Total Debits  : {}", style.amount(totals.total_debit)),
        format!("  Total Credits : {}", style.amount(totals.total_credit)),
        format!("  Net Balance   : {}", style.amount(totals.balance)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use shipledger_domain::{Category, TransactionFormData, TransactionId};

    const RUPEE: MoneyStyle<'static> = MoneyStyle {
        symbol: "₹",
        locale: "en-IN",
    };

    fn port_dues() -> Transaction {
        let form = TransactionFormData {
            date: NaiveDate::from_ymd_opt(2024, 4, 9).unwrap(),
            kind: TransactionType::Debit,
            description: "Port dues".into(),
            amount: dec!(125000),
            party_name: "Mundra Port".into(),
            category: Some(Category::PortCharges),
            reference: Some("MP-4".into()),
            notes: None,
        };
        let now = Utc.with_ymd_and_hms(2024, 4, 9, 10, 0, 0).unwrap();
        Transaction::new(TransactionId::from("txn_a"), form.validate().unwrap(), now)
    }

    #[test]
    fn list_line_shows_signed_amount_and_labels() {
        let line = transaction_line(&port_dues(), RUPEE);
        assert!(line.starts_with("txn_a  09 Apr 2024  DEBIT"));
        assert!(line.contains("-₹1,25,000.00"));
        assert!(line.contains("Mundra Port: Port dues [Port Charges] ref MP-4"));
    }

    #[test]
    fn detail_skips_absent_optionals() {
        let lines = transaction_detail(&port_dues(), RUPEE);
        assert!(lines.iter().any(|line| line.contains("Reference   : MP-4")));
        assert!(!lines.iter().any(|line| line.contains("Notes")));
    }

    #[test]
    fn totals_render_balance_sign() {
        let totals = Totals {
            total_debit: dec!(250),
            total_credit: dec!(100),
            balance: dec!(-150),
        };
        let lines = totals_lines(&totals, RUPEE);
        assert_eq!(lines[2], "  Net Balance   : -₹150.00");
    }
}
