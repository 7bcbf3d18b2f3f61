#![deny(unsafe_code)]

//! Batched row writer.
//!
//! Rows are staged in memory and flushed to the open transaction every
//! [`FLUSH_EVERY`] staged rows; the transaction commits only in
//! [`RowWriter::finish`]. A dry-run writer has no session at all: nothing
//! is staged, nothing is flushed, nothing commits.

use rusqlite::types::Value;
use tracing::debug;

use geocsv_model::RowRecord;

use crate::error::Result;
use crate::session::Session;
use crate::table::{DbTable, total_param};

/// Pending staged rows are flushed after this many rows.
pub const FLUSH_EVERY: u64 = 100;

pub struct RowWriter {
    session: Option<Session>,
    table: DbTable,
    insert_sql: String,
    geo_version: String,
    pending: Vec<Vec<Value>>,
    staged: u64,
}

impl RowWriter {
    /// Build a writer over an open session, creating the destination table
    /// if it does not exist yet. Pass `None` for a dry run.
    pub fn new(
        session: Option<Session>,
        table: DbTable,
        geo_version: impl Into<String>,
    ) -> Result<Self> {
        if let Some(session) = &session {
            table.create_if_absent(session)?;
        }
        let insert_sql = table.insert_sql();
        Ok(Self {
            session,
            table,
            insert_sql,
            geo_version: geo_version.into(),
            pending: Vec::new(),
            staged: 0,
        })
    }

    pub fn is_dry_run(&self) -> bool {
        self.session.is_none()
    }

    pub fn table_name(&self) -> &str {
        self.table.name()
    }

    /// Stage one row for writing. No-op in dry-run mode.
    pub fn add(&mut self, row: &RowRecord) -> Result<()> {
        if self.session.is_none() {
            return Ok(());
        }
        let mut params: Vec<Value> = Vec::with_capacity(row.dimensions.len() + 4);
        params.push(Value::Text(row.geography.level.clone()));
        params.push(Value::Text(row.geography.code.clone()));
        params.push(Value::Text(self.geo_version.clone()));
        params.extend(row.dimensions.iter().cloned().map(Value::Text));
        params.push(total_param(&row.total));
        self.pending.push(params);
        self.staged += 1;
        if self.staged % FLUSH_EVERY == 0 {
            self.flush()?;
        }
        Ok(())
    }

    /// Execute all pending inserts inside the open transaction. The rows
    /// become visible to this connection but are not durable until commit.
    pub fn flush(&mut self) -> Result<()> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        if self.pending.is_empty() {
            return Ok(());
        }
        let mut statement = session.connection().prepare_cached(&self.insert_sql)?;
        let flushed = self.pending.len();
        for params in self.pending.drain(..) {
            statement.execute(rusqlite::params_from_iter(params))?;
        }
        debug!(table = self.table.name(), flushed, "flushed staged rows");
        Ok(())
    }

    /// Flush the tail and commit. Returns the number of rows written.
    pub fn finish(mut self) -> Result<u64> {
        self.flush()?;
        if let Some(session) = &mut self.session {
            session.commit()?;
        }
        Ok(self.staged)
    }
}
