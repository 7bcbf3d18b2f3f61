#![deny(unsafe_code)]

//! Database session with explicit flush/commit semantics.
//!
//! A session opens a connection and immediately begins a transaction.
//! Statement execution inside the open transaction is the "flush" half of
//! the contract: staged rows become visible to this connection but are not
//! durable. Only [`Session::commit`] finalizes them. Dropping an
//! uncommitted session rolls everything back, which is what makes a killed
//! run leave no partial import behind.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Result, StoreError};

pub struct Session {
    conn: Connection,
    tx_open: bool,
}

impl Session {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened database");
        Self::begin(conn)
    }

    /// In-memory session, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::begin(conn)
    }

    fn begin(conn: Connection) -> Result<Self> {
        conn.execute_batch("BEGIN")?;
        Ok(Self {
            conn,
            tx_open: true,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Finalize the run's transaction, making all flushed rows durable.
    pub fn commit(&mut self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        self.tx_open = false;
        debug!("transaction committed");
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.tx_open {
            // Best effort; the connection is going away either way.
            let _ = self.conn.execute_batch("ROLLBACK");
            debug!("uncommitted session rolled back");
        }
    }
}
