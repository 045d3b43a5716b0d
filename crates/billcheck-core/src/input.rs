//! Lenient parsing for free-text form input.
//!
//! Every parser returns a value. When the input cannot be read, the value is the
//! neutral default and [`Parsed::coerced`] is set so callers can tell a typed zero
//! from a fallback zero.

use billcheck_domain::parse_due_date;
use chrono::NaiveDate;

/// A parsed value plus whether a fallback replaced unreadable input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub coerced: bool,
}

impl<T> Parsed<T> {
    pub fn exact(value: T) -> Self {
        Self {
            value,
            coerced: false,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            coerced: true,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Parses a currency-ish string such as `"$1,234.50"`.
///
/// Everything except ASCII digits, `.` and `-` is discarded, then the longest
/// leading number (`-?digits.digits`) is read, so `"12.5."` is `12.5`.
/// Input with no leading number, or a non-finite one, falls back to `0.0`.
pub fn parse_amount(raw: &str) -> Parsed<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    match numeric_prefix(&cleaned).parse::<f64>() {
        Ok(value) if value.is_finite() => Parsed::exact(value),
        _ => Parsed::fallback(0.0),
    }
}

fn numeric_prefix(cleaned: &str) -> &str {
    let bytes = cleaned.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut digits = 0;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
        digits += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        let mut fraction = end + 1;
        while bytes.get(fraction).is_some_and(u8::is_ascii_digit) {
            fraction += 1;
            digits += 1;
        }
        if digits > 0 {
            end = fraction;
        }
    }
    if digits == 0 {
        return "";
    }
    &cleaned[..end]
}

/// Parses an ISO due date.
///
/// Blank input is a missing date, not a coercion. Anything else that does not
/// parse yields `None` with `coerced` set.
pub fn parse_date(raw: &str) -> Parsed<Option<NaiveDate>> {
    if raw.trim().is_empty() {
        return Parsed::exact(None);
    }
    match parse_due_date(raw) {
        Some(date) => Parsed::exact(Some(date)),
        None => Parsed::fallback(None),
    }
}
