use std::str::FromStr;

use crate::errors::DateFormatError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a best-effort conversion.
///
/// `value` is `None` when the input was missing or could not be converted; in the
/// second case `issue` says why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coerced<T, E> {
    pub value: Option<T>,
    pub issue: Option<E>,
}

impl<T, E> Coerced<T, E> {
    pub fn missing() -> Self {
        Self { value: None, issue: None }
    }

    pub fn ok(value: T) -> Self {
        Self { value: Some(value), issue: None }
    }

    pub fn failed(issue: E) -> Self {
        Self { value: None, issue: Some(issue) }
    }

    pub fn into_result(self) -> Result<Option<T>, E> {
        match self.issue {
            Some(issue) => Err(issue),
            None => Ok(self.value),
        }
    }
}

/// A QIF date as written in the `D` field, e.g. `2/ 1'24` or `7/17'24`.
///
/// The apostrophe separates a two-digit year that is always read as 20YY.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QifDate(String);

impl QifDate {
    /// `'` becomes `/20`, `/` becomes `-`, spaces are dropped.
    pub fn normalized(&self) -> String {
        self.0.trim().replace('\'', "/20").replace('/', "-").replace(' ', "")
    }

    /// Missing or blank input is `Ok(None)`.
    pub fn to_date(&self) -> Result<Option<NaiveDate>, DateFormatError> {
        if self.0.trim().is_empty() {
            return Ok(None);
        }

        let normalized = self.normalized();
        parse_month_day_year(&normalized)
            .map(Some)
            .ok_or_else(|| DateFormatError {
                original: self.0.clone(),
                normalized,
            })
    }
}

impl From<String> for QifDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for QifDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<QifDate> for Option<NaiveDate> {
    type Error = DateFormatError;

    fn try_from(date: QifDate) -> Result<Self, Self::Error> {
        date.to_date()
    }
}

fn parse_month_day_year(normalized: &str) -> Option<NaiveDate> {
    let mut parts = normalized.split('-');
    let month = parse_digits(parts.next()?, 1..=2)?;
    let day = parse_digits(parts.next()?, 1..=2)?;
    let year = parse_digits(parts.next()?, 4..=4)?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn parse_digits(part: &str, width: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !width.contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Best-effort date conversion for a `D` value.
pub fn try_parse_date(value: Option<&str>) -> Coerced<NaiveDate, DateFormatError> {
    let Some(value) = value else {
        return Coerced::missing();
    };

    match QifDate::from(value).to_date() {
        Ok(Some(date)) => Coerced::ok(date),
        Ok(None) => Coerced::missing(),
        Err(err) => Coerced::failed(err),
    }
}

/// A value that was expected to be numeric but is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidNumber(pub String);

/// Best-effort numeric conversion for amount fields.
///
/// Accepts an optional sign and plain or scientific notation. Blank input is
/// missing without an issue.
pub fn try_parse_number(value: Option<&str>) -> Coerced<Decimal, InvalidNumber> {
    let Some(raw) = value else {
        return Coerced::missing();
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Coerced::missing();
    }

    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    Decimal::from_str(unsigned)
        .or_else(|_| Decimal::from_scientific(unsigned))
        .map(Coerced::ok)
        .unwrap_or_else(|_| Coerced::failed(InvalidNumber(raw.to_string())))
}

const ALLOWED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')', '&', '/', '-'];

/// Drops every character outside ASCII letters and digits, whitespace and
/// `. , ; : ! ? ( ) & / -`.
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(c))
        .collect()
}
