//! Problem (ticket) store.
//!
//! Every mutation recomputes the affected device status inside its own
//! transaction before committing.

use crate::core::status::{self, StatusChange};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::problem::{NewProblem, Problem, ProblemPatch};
use rusqlite::Connection;
use tracing::info;

pub struct ProblemStore;

fn ensure_device(conn: &Connection, device_id: i64) -> AppResult<()> {
    match queries::get_device(conn, device_id)? {
        Some(_) => Ok(()),
        None => Err(AppError::not_found("Device", device_id)),
    }
}

fn ensure_user(conn: &Connection, user_id: i64) -> AppResult<()> {
    match queries::get_user(conn, user_id)? {
        Some(_) => Ok(()),
        None => Err(AppError::not_found("User", user_id)),
    }
}

fn load(conn: &Connection, problem_id: i64) -> AppResult<Problem> {
    queries::get_problem(conn, problem_id)?
        .ok_or_else(|| AppError::not_found("Problem", problem_id))
}

impl ProblemStore {
    pub fn create(pool: &mut DbPool, new: &NewProblem) -> AppResult<(Problem, StatusChange)> {
        let tx = pool.begin()?;

        ensure_device(&tx, new.device_id)?;
        ensure_user(&tx, new.user_id)?;

        let id = queries::insert_problem(&tx, new)?;
        let problem = load(&tx, id)?;
        let change = status::on_problem_created(&tx, &problem)?;

        ttlog(
            &tx,
            "add",
            &format!("problem {}", id),
            &format!(
                "Device {} '{}' [{}] active={}",
                problem.device_id, problem.description, problem.status, problem.active
            ),
        )?;
        tx.commit()?;

        info!(
            problem_id = id,
            device_id = problem.device_id,
            status = %change.current,
            "problem created"
        );
        Ok((problem, change))
    }

    pub fn update(
        pool: &mut DbPool,
        problem_id: i64,
        patch: &ProblemPatch,
    ) -> AppResult<(Problem, Vec<StatusChange>)> {
        let tx = pool.begin()?;

        let before = load(&tx, problem_id)?;
        if patch.is_empty() {
            return Ok((before, Vec::new()));
        }
        if let Some(device_id) = patch.device_id {
            ensure_device(&tx, device_id)?;
        }
        if let Some(user_id) = patch.user_id {
            ensure_user(&tx, user_id)?;
        }

        let mut after = patch.apply(&before);
        after.updated_at = queries::now_rfc3339();
        queries::update_problem(&tx, &after)?;

        let changes = status::on_problem_updated(&tx, &before, &after)?;

        ttlog(
            &tx,
            "edit",
            &format!("problem {}", problem_id),
            &format!(
                "[{}] active={} device={} -> [{}] active={} device={}",
                before.status,
                before.active,
                before.device_id,
                after.status,
                after.active,
                after.device_id
            ),
        )?;
        tx.commit()?;

        info!(problem_id, device_id = after.device_id, "problem updated");
        Ok((after, changes))
    }

    pub fn delete(pool: &mut DbPool, problem_id: i64) -> AppResult<StatusChange> {
        let tx = pool.begin()?;

        let problem = load(&tx, problem_id)?;
        queries::delete_problem(&tx, problem_id)?;
        let change = status::on_problem_deleted(&tx, &problem)?;

        ttlog(
            &tx,
            "del",
            &format!("problem {}", problem_id),
            &format!(
                "Device {} status now '{}'",
                problem.device_id, change.current
            ),
        )?;
        tx.commit()?;

        info!(problem_id, device_id = problem.device_id, "problem deleted");
        Ok(change)
    }

    pub fn get(pool: &DbPool, problem_id: i64) -> AppResult<Problem> {
        load(&pool.conn, problem_id)
    }

    pub fn list(pool: &DbPool, device_id: Option<i64>) -> AppResult<Vec<Problem>> {
        if let Some(id) = device_id {
            ensure_device(&pool.conn, id)?;
        }
        Ok(queries::list_problems(&pool.conn, device_id)?)
    }
}
