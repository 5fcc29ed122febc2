use std::fmt::Write;

use num_traits::Zero;
use rust_decimal::Decimal;

use crate::document::QifDocument;
use crate::parsers::qif::prelude::*;

const DETAIL_COLUMNS: [&str; 6] = ["D", "T", "N", "P", "M", "U"];
const ABSENT_CELL: &str = "-";

/// Per-account balance summary over a parsed document.
pub struct AccountBalance<'a> {
    document: &'a QifDocument,
}

impl<'a> AccountBalance<'a> {
    pub fn new(document: &'a QifDocument) -> Self {
        Self { document }
    }

    fn records_for<'b>(&'b self, account: &'b str) -> impl Iterator<Item = &'a NormalizedRecord> + 'b {
        let document: &'a QifDocument = self.document;
        document
            .records()
            .iter()
            .filter(move |record| record.account() == account)
    }

    /// Sum of `T` over the account; missing amounts are skipped.
    pub fn total_for(&self, account: &str) -> Decimal {
        self.records_for(account)
            .filter_map(NormalizedRecord::amount)
            .fold(Decimal::zero(), |total, amount| total + amount)
    }

    pub fn generate_report(&self, account: &str) -> String {
        let rows: Vec<[String; 6]> = self
            .records_for(account)
            .map(|record| {
                DETAIL_COLUMNS.map(|column| {
                    record
                        .get(column)
                        .map(|value| value.to_string())
                        .unwrap_or_else(|| ABSENT_CELL.to_string())
                })
            })
            .collect();

        let widths: [usize; 6] = std::array::from_fn(|i| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain([DETAIL_COLUMNS[i].len()])
                .max()
                .unwrap_or_default()
        });

        let mut report = String::new();
        let _ = writeln!(report, "Report for Account: {}", account);
        let _ = writeln!(report, "Total amount: {}", self.total_for(account));
        let _ = writeln!(report);
        let _ = writeln!(report, "Detailed Transactions:");

        let header = DETAIL_COLUMNS.map(String::from);
        for row in std::iter::once(&header).chain(rows.iter()) {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:>width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(report, "{}", line);
        }

        report
    }
}
