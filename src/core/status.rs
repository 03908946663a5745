//! Device status derivation.
//!
//! A device's `status` column is a cache of its *current* problem: the
//! active problem with the lowest id. Every problem write calls one of the
//! `on_problem_*` hooks with its still-open transaction, so the cached value
//! and the ticket change commit together or not at all.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    all_device_ids, load_active_problems, load_device_status, set_device_status,
};
use crate::errors::{AppError, AppResult};
use crate::models::problem::Problem;
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of one recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub device_id: i64,
    pub previous: String,
    pub current: String,
    /// `false` when the stored value was already correct.
    pub written: bool,
}

/// A device whose stored status disagrees with its problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDrift {
    pub device_id: i64,
    pub stored: String,
    pub expected: String,
}

/// Pick the current problem among a device's active problems.
pub fn select_current(active: &[Problem]) -> Option<&Problem> {
    active.iter().filter(|p| p.active).min_by_key(|p| p.id)
}

/// Status a device should carry given its active problems.
pub fn derive_status(active: &[Problem]) -> String {
    select_current(active)
        .map(|p| p.status.to_db_str().to_string())
        .unwrap_or_default()
}

fn expected_status(conn: &Connection, device_id: i64) -> AppResult<String> {
    let active = load_active_problems(conn, device_id)?;
    Ok(derive_status(&active))
}

/// Re-derive and persist the status of `device_id`.
///
/// Must run inside the transaction that performed the triggering write.
/// The row is only written when the derived value differs from the stored one.
pub fn recompute_device(conn: &Connection, device_id: i64) -> AppResult<StatusChange> {
    let previous = load_device_status(conn, device_id)?
        .ok_or_else(|| AppError::not_found("Device", device_id))?;
    let current = expected_status(conn, device_id)?;

    let written = previous != current;
    if written {
        set_device_status(conn, device_id, &current)?;
        debug!(device_id, %previous, %current, "device status updated");
    } else {
        debug!(device_id, %current, "device status unchanged");
    }

    Ok(StatusChange {
        device_id,
        previous,
        current,
        written,
    })
}

pub fn on_problem_created(conn: &Connection, problem: &Problem) -> AppResult<StatusChange> {
    recompute_device(conn, problem.device_id)
}

/// Recompute after an update. When the problem moved to another device both
/// devices are recomputed, the old one first.
pub fn on_problem_updated(
    conn: &Connection,
    before: &Problem,
    after: &Problem,
) -> AppResult<Vec<StatusChange>> {
    let mut changes = Vec::with_capacity(2);
    if before.device_id != after.device_id {
        changes.push(recompute_device(conn, before.device_id)?);
    }
    changes.push(recompute_device(conn, after.device_id)?);
    Ok(changes)
}

pub fn on_problem_deleted(conn: &Connection, problem: &Problem) -> AppResult<StatusChange> {
    recompute_device(conn, problem.device_id)
}

/// Compare every stored device status with its derived value. Read-only.
pub fn verify_all(conn: &Connection) -> AppResult<Vec<StatusDrift>> {
    let mut drift = Vec::new();
    for device_id in all_device_ids(conn)? {
        let stored = load_device_status(conn, device_id)?.unwrap_or_default();
        let expected = expected_status(conn, device_id)?;
        if stored != expected {
            drift.push(StatusDrift {
                device_id,
                stored,
                expected,
            });
        }
    }
    Ok(drift)
}

/// Recompute every device in a single transaction. Returns the number of
/// device rows that were rewritten.
pub fn recompute_all(pool: &mut DbPool) -> AppResult<usize> {
    let tx = pool.begin()?;

    let mut written = 0;
    for device_id in all_device_ids(&tx)? {
        if recompute_device(&tx, device_id)?.written {
            written += 1;
        }
    }

    ttlog(
        &tx,
        "rebuild",
        "devices",
        &format!("Recomputed device status, {} row(s) rewritten", written),
    )?;
    tx.commit()?;

    info!(written, "device statuses rebuilt");
    Ok(written)
}
