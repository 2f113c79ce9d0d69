use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

const CURRENCY: &str = "CHF";
const GROUP_SEPARATOR: char = '\u{2019}';

/// Swiss-style currency string, e.g. `CHF 3’434.00`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{CURRENCY} {sign}{grouped}.{fraction}")
}

/// Group header date, `dd.MM.yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Form date, `dd. MMM. yyyy`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%d. %b. %Y").to_string()
}
