use chrono::Local;
use rusqlite::{Connection, Result, params};

/// Write an audit line into the `log` table.
///
/// Mutations call this with their open transaction, so the audit row commits
/// or rolls back together with the change it describes.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> Result<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// One row of the audit log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub fn load_log(conn: &Connection) -> Result<Vec<LogEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
