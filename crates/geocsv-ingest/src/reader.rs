#![deny(unsafe_code)]

//! Streaming reader for structured geography CSV files.
//!
//! The header contract is minimal: first column `geo_level`, second
//! `geo_code`, last `total`; everything in between is a dimension field.
//! Rows are decoded one at a time — the file is never materialized.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use geocsv_model::{FieldName, Geography, RowRecord, TableSchema, TotalValue, ValueType};

use crate::error::{IngestError, Result};

/// Parse the header record into the file's dimension schema.
fn parse_header(headers: &csv::StringRecord) -> Result<TableSchema> {
    if headers.len() < 3 {
        return Err(IngestError::Header {
            reason: format!(
                "expected at least 3 columns (geo_level, geo_code, total), found {}",
                headers.len()
            ),
        });
    }
    let first = headers.get(0).unwrap_or_default().trim();
    let second = headers.get(1).unwrap_or_default().trim();
    let last = headers.get(headers.len() - 1).unwrap_or_default().trim();
    if !first.eq_ignore_ascii_case("geo_level") {
        return Err(IngestError::Header {
            reason: format!("first column must be geo_level, found {first:?}"),
        });
    }
    if !second.eq_ignore_ascii_case("geo_code") {
        return Err(IngestError::Header {
            reason: format!("second column must be geo_code, found {second:?}"),
        });
    }
    if !last.eq_ignore_ascii_case("total") {
        return Err(IngestError::Header {
            reason: format!("last column must be total, found {last:?}"),
        });
    }

    let fields = headers
        .iter()
        .skip(2)
        .take(headers.len() - 3)
        .map(|name| {
            FieldName::new(name).map_err(|_| IngestError::Header {
                reason: "dimension field names must not be blank".to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TableSchema::new(fields))
}

/// Iterator over decoded rows of one input file.
pub struct RowReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    schema: TableSchema,
    value_type: ValueType,
    line: u64,
}

impl RowReader<File> {
    pub fn open(path: &Path, value_type: ValueType) -> Result<Self> {
        let file = File::open(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened input file");
        Self::from_reader(file, value_type)
    }
}

impl<R: Read> RowReader<R> {
    pub fn from_reader(reader: R, value_type: ValueType) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let schema = parse_header(csv_reader.headers()?)?;
        Ok(Self {
            records: csv_reader.into_records(),
            schema,
            value_type,
            line: 1,
        })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn decode(&self, record: &csv::StringRecord) -> Result<RowRecord> {
        let line = record
            .position()
            .map_or(self.line, csv::Position::line);
        let expected = self.schema.len() + 3;
        if record.len() != expected {
            return Err(IngestError::Record {
                line,
                reason: format!("expected {expected} columns, found {}", record.len()),
            });
        }

        let geography = Geography::new(
            record.get(0).unwrap_or_default().trim(),
            record.get(1).unwrap_or_default().trim(),
        );
        let dimensions: Vec<String> = record
            .iter()
            .skip(2)
            .take(self.schema.len())
            .map(|v| v.trim().to_string())
            .collect();
        let raw_total = record.get(record.len() - 1).unwrap_or_default();
        let total = TotalValue::parse(raw_total, self.value_type).map_err(|_| {
            IngestError::NumericConversion {
                line,
                value: raw_total.to_string(),
            }
        })?;

        Ok(RowRecord {
            geography,
            dimensions,
            total,
        })
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<RowRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(error) => return Some(Err(error.into())),
        };
        self.line += 1;
        Some(self.decode(&record))
    }
}
