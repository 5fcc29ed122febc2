use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::tokenizer::{DirectiveContext, RawRecord, RecordFields};
use super::translate::translation_for;
use super::types::{sanitize, try_parse_date, try_parse_number};
use crate::errors::{DateFormatError, QifResult};

pub const DATE_CODE: char = 'D';
pub const AMOUNT_CODE: char = 'T';
pub const SECONDARY_AMOUNT_CODE: char = 'U';

pub const SWITCH_COLUMN: &str = "Switch";
pub const ACCOUNT_COLUMN: &str = "Account";
pub const TYPE_COLUMN: &str = "Type";

/// What to do with a `D` value that is not a valid date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePolicy {
    /// Abort the parse with a [`DateFormatError`].
    #[default]
    Strict,
    /// Leave the date absent and record the problem on the record.
    Lenient,
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Date(NaiveDate),
    Number(Decimal),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

/// A value that was dropped during normalization instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    InvalidNumber { code: char, value: String },
    InvalidDate(DateFormatError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    fields: RecordFields,
    context: DirectiveContext,
    date: Option<NaiveDate>,
    amount: Option<Decimal>,
    secondary_amount: Option<Decimal>,
    aliases: Vec<(&'static str, char)>,
    issues: Vec<FieldIssue>,
}

impl NormalizedRecord {
    /// Builds one record from its raw form; the raw record is left untouched.
    pub fn from_raw(raw: &RawRecord, policy: DatePolicy) -> QifResult<Self> {
        let mut issues = Vec::new();

        // Dates are read before sanitizing, which would strip the `'` year separator.
        let coerced = try_parse_date(raw.fields.get(DATE_CODE));
        let date = match (coerced.value, coerced.issue) {
            (_, Some(err)) if policy == DatePolicy::Strict => return Err(err.into()),
            (_, Some(err)) => {
                warn!(error = %err, "dropping unparseable date");
                issues.push(FieldIssue::InvalidDate(err));
                None
            }
            (value, None) => value,
        };

        let fields: RecordFields = raw
            .fields
            .iter()
            .map(|(code, value)| (code, sanitize(value)))
            .collect();

        let context = DirectiveContext {
            switch: raw.context.switch.as_deref().map(sanitize),
            account: sanitize(&raw.context.account),
            kind: sanitize(&raw.context.kind),
        };

        let mut amount_of = |code: char| {
            let coerced = try_parse_number(fields.get(code));
            if let Some(invalid) = coerced.issue {
                debug!(code = %code, value = %invalid.0, "coerced non-numeric amount to missing");
                issues.push(FieldIssue::InvalidNumber { code, value: invalid.0 });
            }
            coerced.value
        };
        let amount = amount_of(AMOUNT_CODE);
        let secondary_amount = amount_of(SECONDARY_AMOUNT_CODE);

        let aliases = context
            .switch
            .as_deref()
            .and_then(translation_for)
            .map(|table| {
                table
                    .iter()
                    .filter(|(code, _)| fields.contains(*code))
                    .map(|(code, alias)| (*alias, *code))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            fields,
            context,
            date,
            amount,
            secondary_amount,
            aliases,
            issues,
        })
    }

    /// Sanitized text of a field by its raw code.
    pub fn raw(&self, code: char) -> Option<&str> {
        self.fields.get(code)
    }

    pub fn fields(&self) -> &RecordFields {
        &self.fields
    }

    pub fn context(&self) -> &DirectiveContext {
        &self.context
    }

    pub fn switch(&self) -> Option<&str> {
        self.context.switch.as_deref()
    }

    pub fn account(&self) -> &str {
        &self.context.account
    }

    pub fn kind(&self) -> &str {
        &self.context.kind
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn secondary_amount(&self) -> Option<Decimal> {
        self.secondary_amount
    }

    /// Alias columns this record carries, in table order.
    pub fn aliases(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.aliases.iter().map(|(alias, _)| *alias)
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Column names present on this record: field codes, context columns,
    /// then aliases.
    pub fn column_names(&self) -> Vec<String> {
        self.fields
            .codes()
            .map(String::from)
            .chain([SWITCH_COLUMN, ACCOUNT_COLUMN, TYPE_COLUMN].map(String::from))
            .chain(self.aliases().map(String::from))
            .collect()
    }

    /// Typed value of a column, or `None` when the record has no value for it.
    pub fn get(&self, column: &str) -> Option<FieldValue> {
        match column {
            SWITCH_COLUMN => return self.context.switch.clone().map(FieldValue::Text),
            ACCOUNT_COLUMN => return Some(FieldValue::Text(self.context.account.clone())),
            TYPE_COLUMN => return Some(FieldValue::Text(self.context.kind.clone())),
            _ => {}
        }

        let mut chars = column.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(code), None) => code,
            _ => self
                .aliases
                .iter()
                .find(|(alias, _)| *alias == column)
                .map(|(_, code)| *code)?,
        };

        self.value_of(code)
    }

    fn value_of(&self, code: char) -> Option<FieldValue> {
        match code {
            DATE_CODE => self.date.map(FieldValue::Date),
            AMOUNT_CODE => self.amount.map(FieldValue::Number),
            SECONDARY_AMOUNT_CODE => self.secondary_amount.map(FieldValue::Number),
            _ => self.fields.get(code).map(|value| FieldValue::Text(value.to_string())),
        }
    }
}

/// Normalizes every record, stopping at the first fatal date error.
pub fn normalize_all(raw: &[RawRecord], policy: DatePolicy) -> QifResult<Vec<NormalizedRecord>> {
    let records = raw
        .iter()
        .map(|record| NormalizedRecord::from_raw(record, policy))
        .collect::<QifResult<Vec<_>>>()?;

    debug!(records = records.len(), "cleaned illegal characters and coerced field types");
    Ok(records)
}
