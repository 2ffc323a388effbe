//! Money and date formatting for display

use chrono::NaiveDate;
use kasweb_config::CurrencyConfig;
use kasweb_utils::format_number;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as "Rp 1.500.000"
///
/// Negative amounts keep the sign in front of the symbol. When decimal
/// places are configured, the decimal mark is whichever of `,` and `.` is
/// not the thousands separator.
pub fn format_currency(amount: Decimal, currency: &CurrencyConfig) -> String {
    let places = currency.decimal_places;
    let rounded = amount
        .abs()
        .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let whole = rounded.trunc();
    let grouped = format_number(whole, &currency.thousands_separator);

    let mut out = String::new();
    if amount.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&currency.symbol);
    out.push(' ');
    out.push_str(&grouped);

    if places > 0 {
        let mark = if currency.thousands_separator == "," { '.' } else { ',' };
        let fraction = (rounded - whole) * Decimal::from(10u64.pow(places));
        out.push(mark);
        let digits = fraction.trunc().to_string();
        out.push_str(&format!("{:0>width$}", digits, width = places as usize));
    }
    out
}

/// Display a backend date as `dd/mm/yyyy`, or the raw text when unreadable
pub fn format_date(date: &str) -> String {
    date.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| date.to_string())
}

/// Today's local date as `YYYY-MM-DD`, the default of date inputs
pub fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
