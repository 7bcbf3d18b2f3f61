#![deny(unsafe_code)]

//! Destination-table DDL and insert statements.
//!
//! Tables are created on demand: fixed geography columns, one TEXT column
//! per dimension field, and a `total` column holding either whole counts or
//! one-decimal percentage strings.

use rusqlite::types::Value;

use geocsv_model::{FieldName, ResolvedTable, TotalValue};

use crate::error::Result;
use crate::session::Session;

/// Map a dimension field name to a SQL column name: lowercase, with runs of
/// non-alphanumerics collapsed to `_`.
pub fn column_name(field: &FieldName) -> String {
    let mut out = String::with_capacity(field.as_str().len());
    let mut gap = false;
    for ch in field.as_str().chars() {
        if ch.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.extend(ch.to_lowercase());
        } else {
            gap = true;
        }
    }
    out
}

/// SQL parameter for a converted total: counts bind as integers,
/// percentages as one-decimal strings, missing as NULL.
pub fn total_param(total: &TotalValue) -> Value {
    match total {
        TotalValue::Missing => Value::Null,
        TotalValue::Count(v) => Value::Integer(*v),
        TotalValue::Percent(v) => Value::Text(format!("{v:.1}")),
    }
}

/// A concrete destination table derived from a registry resolution.
#[derive(Debug, Clone)]
pub struct DbTable {
    name: String,
    columns: Vec<String>,
}

impl DbTable {
    pub fn new(resolved: &ResolvedTable) -> Self {
        Self {
            name: resolved.db_table.clone(),
            columns: resolved.schema.fields().iter().map(column_name).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn create_if_absent(&self, session: &Session) -> Result<()> {
        let mut ddl = format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (\n  geo_level TEXT NOT NULL,\n  geo_code TEXT NOT NULL,\n  geo_version TEXT NOT NULL",
            self.name
        );
        for column in &self.columns {
            ddl.push_str(&format!(",\n  \"{column}\" TEXT NOT NULL"));
        }
        // No declared type: BLOB affinity keeps counts as integers and
        // one-decimal percentage strings as text, without coercion.
        ddl.push_str(",\n  total\n)");
        session.connection().execute_batch(&ddl)?;
        Ok(())
    }

    pub fn insert_sql(&self) -> String {
        let mut names = vec![
            "geo_level".to_string(),
            "geo_code".to_string(),
            "geo_version".to_string(),
        ];
        names.extend(self.columns.iter().map(|c| format!("\"{c}\"")));
        names.push("total".to_string());
        let placeholders = vec!["?"; names.len()].join(", ");
        format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            self.name,
            names.join(", "),
            placeholders
        )
    }
}
