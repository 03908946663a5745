//! SQLite connection wrapper.
//!
//! One `DbPool` per worker: a connection is never shared across threads.
//! Concurrent workers coordinate through SQLite's own locking, with WAL
//! journaling and a busy timeout so writers queue instead of failing.

use rusqlite::{Connection, Result, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        Self::with_timeout(path, DEFAULT_BUSY_TIMEOUT_MS)
    }

    pub fn with_timeout(path: &str, busy_timeout_ms: u64) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        // journal_mode returns a row, so it cannot go through execute()
        let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        Ok(Self { conn })
    }

    /// Start a write transaction.
    ///
    /// `IMMEDIATE` takes the database write lock at `BEGIN`, so every read
    /// done inside the transaction is already serialized against other
    /// writers. Dropping the transaction without `commit()` rolls it back.
    pub fn begin(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
    }
}
