use std::io::Write;

use serde_json::{Map, Value};

use crate::errors::QifResult;
use crate::parsers::qif::prelude::*;

/// Ordered, column-addressable view over the normalized records of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QifDocument {
    records: Vec<NormalizedRecord>,
}

impl QifDocument {
    pub fn new(records: Vec<NormalizedRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<NormalizedRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every column seen in the file, in first-seen order.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for name in self.records.iter().flat_map(NormalizedRecord::column_names) {
            if !columns.contains(&name) {
                columns.push(name);
            }
        }
        columns
    }

    /// One cell per record; `None` where the record has no value.
    pub fn column(&self, name: &str) -> Vec<Option<FieldValue>> {
        self.records.iter().map(|record| record.get(name)).collect()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> QifResult<()> {
        let columns = self.columns();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(&columns)?;
        for record in &self.records {
            csv_writer.write_record(columns.iter().map(|column| {
                record
                    .get(column)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            }))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Records as JSON objects keyed by column; absent cells are omitted.
    pub fn to_json(&self) -> QifResult<String> {
        let columns = self.columns();
        let rows: Vec<Value> = self
            .records
            .iter()
            .map(|record| -> QifResult<Value> {
                let mut row = Map::new();
                for column in &columns {
                    if let Some(value) = record.get(column) {
                        row.insert(column.clone(), serde_json::to_value(value)?);
                    }
                }
                Ok(Value::Object(row))
            })
            .collect::<QifResult<_>>()?;

        Ok(serde_json::to_string(&rows)?)
    }
}

impl From<Vec<NormalizedRecord>> for QifDocument {
    fn from(records: Vec<NormalizedRecord>) -> Self {
        Self::new(records)
    }
}
