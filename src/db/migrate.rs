use crate::db::log::ttlog;
use rusqlite::{Connection, OptionalExtension, Result};
use tracing::{debug, info};

const SCHEMA_VERSION: &str = "20251020_0001_campus_inventory";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the hierarchy tables (campus → classroom → place → device).
fn create_hierarchy_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS campuses (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            number   INTEGER NOT NULL,
            address  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS classrooms (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            number     INTEGER NOT NULL,
            campus_id  INTEGER NOT NULL REFERENCES campuses(id)
        );

        CREATE TABLE IF NOT EXISTS places (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            x             INTEGER NOT NULL,
            y             INTEGER NOT NULL,
            place_type    TEXT NOT NULL,
            classroom_id  INTEGER NOT NULL REFERENCES classrooms(id)
        );

        CREATE TABLE IF NOT EXISTS devices (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            place_id     INTEGER NOT NULL REFERENCES places(id),
            status       TEXT NOT NULL DEFAULT '',
            description  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_classroom_campus ON classrooms(campus_id);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_place_coords ON places(classroom_id, x, y);
        CREATE INDEX IF NOT EXISTS idx_device_place ON devices(place_id);
        "#,
    )?;
    Ok(())
}

/// Create the users and problems tables.
fn create_ticket_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            login          TEXT NOT NULL UNIQUE,
            email          TEXT NOT NULL UNIQUE,
            password_hash  TEXT NOT NULL DEFAULT '',
            admin          INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS problems (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            device_id    INTEGER NOT NULL REFERENCES devices(id),
            user_id      INTEGER NOT NULL REFERENCES users(id),
            description  TEXT NOT NULL DEFAULT '',
            active       INTEGER NOT NULL DEFAULT 1,
            status       TEXT NOT NULL DEFAULT 'Pending'
                         CHECK(status IN ('Pending','In Progress','Resolved')),
            created_at   TEXT NOT NULL,
            updated_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_problem_device_active ON problems(device_id, active, id);
        CREATE INDEX IF NOT EXISTS idx_problem_user ON problems(user_id);
        "#,
    )?;
    Ok(())
}

fn schema_applied(conn: &Connection) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    let found = chk.query_row([SCHEMA_VERSION], |_| Ok(())).optional()?;
    Ok(found.is_some())
}

/// Public entry point: run all pending migrations.
///
/// Every statement is `IF NOT EXISTS`, so running it against an initialized
/// database is a no-op apart from the version check.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if schema_applied(conn)? {
        debug!(version = SCHEMA_VERSION, "schema already applied");
        return Ok(());
    }

    create_hierarchy_tables(conn)?;
    create_ticket_tables(conn)?;

    ttlog(
        conn,
        "migration_applied",
        SCHEMA_VERSION,
        "Created inventory and ticket tables",
    )?;

    info!(version = SCHEMA_VERSION, "schema created");
    Ok(())
}
