use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Smallest amount an expense may carry.
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Enter a valid number")]
    InvalidNumber,
    #[error("Amount must be at least 0.01")]
    BelowMinimum,
    #[error("Enter a date as YYYY-MM-DD")]
    InvalidDate,
    #[error("Date cannot be in the future")]
    FutureDate,
}

/// A single-line text input with the "touched" flag used to gate inline errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    pub value: String,
    pub touched: bool,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            touched: false,
        }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

pub fn required(value: &str) -> Result<&str, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(value)
    }
}

/// Parses an amount, accepting a comma as decimal separator.
pub fn parse_amount(value: &str) -> Result<Decimal, FieldError> {
    let value = required(value)?.replace(',', ".");
    let amount = Decimal::from_str(&value).map_err(|_| FieldError::InvalidNumber)?;
    if amount < MIN_AMOUNT {
        return Err(FieldError::BelowMinimum);
    }
    Ok(amount)
}

pub fn parse_date(value: &str, max: NaiveDate) -> Result<NaiveDate, FieldError> {
    let value = required(value)?;
    let date =
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| FieldError::InvalidDate)?;
    if date > max {
        return Err(FieldError::FutureDate);
    }
    Ok(date)
}
