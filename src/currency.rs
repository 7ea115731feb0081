//! Display formatting for amounts and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Formats `amount` with `symbol`, two decimals, and locale digit grouping.
///
/// Locales tagged `-IN` group lakhs and crores (`12,34,567.00`); every other
/// locale groups thousands.
pub fn format_amount(amount: Decimal, symbol: &str, locale: &str) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded);
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let grouped = if uses_indian_grouping(locale) {
        group_indian(whole)
    } else {
        group_thousands(whole)
    };
    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{grouped}.{fraction}")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

fn uses_indian_grouping(locale: &str) -> bool {
    locale
        .rsplit(['-', '_'])
        .next()
        .is_some_and(|region| region.eq_ignore_ascii_case("IN"))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
    }
    grouped
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::new();
    for (count, ch) in head.chars().rev().enumerate() {
        if count != 0 && count % 2 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
    }
    format!("{grouped},{tail}")
}
