use crate::{builder::ParsedRecord, errors::QifParseError, parsers::qif::prelude::*};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub secondary_amount: Option<Decimal>,
    pub number: Option<String>,
    pub payee: Option<String>,
    pub memo: Option<String>,
    pub security: Option<String>,
    pub account: String,
    pub transaction_type: String,
}

impl TryFrom<ParsedRecord> for Transaction {
    type Error = QifParseError;

    fn try_from(parsed: ParsedRecord) -> Result<Self, Self::Error> {
        match parsed {
            ParsedRecord::Qif(record) => Ok(record.into()),
        }
    }
}

impl From<NormalizedRecord> for Transaction {
    fn from(record: NormalizedRecord) -> Self {
        let text = |code: char| record.raw(code).map(str::to_string);

        Transaction {
            date: record.date(),
            amount: record.amount(),
            secondary_amount: record.secondary_amount(),
            number: text('N'),
            payee: text('P'),
            memo: text('M'),
            security: text('S'),
            account: record.account().to_string(),
            transaction_type: record.kind().to_string(),
        }
    }
}
