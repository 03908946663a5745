//! Placement registry: places inside classrooms.
//!
//! Invariant: no two places of the same classroom share `(x, y)`. The check
//! and the write share one `IMMEDIATE` transaction, so concurrent writers
//! are serialized before the check runs. The `UNIQUE` index on
//! `places(classroom_id, x, y)` backs it up at the storage level.

use crate::core::cascade::{CascadeCoordinator, CascadeReport};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::place::{NewPlace, Place, PlacePatch};
use rusqlite::{Connection, ErrorCode};
use tracing::{info, warn};

pub struct PlacementRegistry;

fn coordinate_conflict(classroom_id: i64, x: i64, y: i64) -> AppError {
    AppError::Conflict(format!(
        "classroom {} already has a place at ({}, {})",
        classroom_id, x, y
    ))
}

/// Translate a UNIQUE violation on the coordinates index into `Conflict`.
fn map_unique_violation(err: rusqlite::Error, classroom_id: i64, x: i64, y: i64) -> AppError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            coordinate_conflict(classroom_id, x, y)
        }
        _ => AppError::StorageUnavailable(err),
    }
}

fn validate_place_type(place_type: &str) -> AppResult<()> {
    if place_type.trim().is_empty() {
        return Err(AppError::ValidationFailed("place_type must not be empty".into()));
    }
    Ok(())
}

fn ensure_free(
    conn: &Connection,
    classroom_id: i64,
    x: i64,
    y: i64,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    if let Some(existing) = queries::find_place_at(conn, classroom_id, x, y, exclude_id)? {
        warn!(
            classroom_id,
            x,
            y,
            occupied_by = existing.id,
            "place coordinates already taken"
        );
        return Err(coordinate_conflict(classroom_id, x, y));
    }
    Ok(())
}

impl PlacementRegistry {
    pub fn create_place(pool: &mut DbPool, new: &NewPlace) -> AppResult<Place> {
        validate_place_type(&new.place_type)?;

        let tx = pool.begin()?;

        if queries::get_classroom(&tx, new.classroom_id)?.is_none() {
            return Err(AppError::not_found("Classroom", new.classroom_id));
        }
        ensure_free(&tx, new.classroom_id, new.x, new.y, None)?;

        let id = queries::insert_place(&tx, new)
            .map_err(|e| map_unique_violation(e, new.classroom_id, new.x, new.y))?;

        ttlog(
            &tx,
            "add",
            &format!("place {}", id),
            &format!(
                "Place ({}, {}) '{}' in classroom {}",
                new.x, new.y, new.place_type, new.classroom_id
            ),
        )?;

        let place = queries::get_place(&tx, id)?.ok_or_else(|| AppError::not_found("Place", id))?;
        tx.commit()?;

        info!(
            place_id = id,
            classroom_id = new.classroom_id,
            "place created"
        );
        Ok(place)
    }

    /// Partial update. Coordinates are re-checked only when the patch touches
    /// them, against every other place of the same classroom.
    pub fn update_place(pool: &mut DbPool, place_id: i64, patch: &PlacePatch) -> AppResult<Place> {
        if let Some(t) = &patch.place_type {
            validate_place_type(t)?;
        }

        let tx = pool.begin()?;

        let current = queries::get_place(&tx, place_id)?
            .ok_or_else(|| AppError::not_found("Place", place_id))?;

        if patch.is_empty() {
            return Ok(current);
        }

        let (x, y) = patch.effective_coordinates(&current);
        if patch.touches_coordinates() {
            ensure_free(&tx, current.classroom_id, x, y, Some(place_id))?;
        }

        let next = Place {
            x,
            y,
            place_type: patch
                .place_type
                .clone()
                .unwrap_or_else(|| current.place_type.clone()),
            ..current.clone()
        };

        queries::update_place(&tx, &next)
            .map_err(|e| map_unique_violation(e, next.classroom_id, x, y))?;

        ttlog(
            &tx,
            "edit",
            &format!("place {}", place_id),
            &format!(
                "({}, {}) '{}' -> ({}, {}) '{}'",
                current.x, current.y, current.place_type, next.x, next.y, next.place_type
            ),
        )?;
        tx.commit()?;

        info!(place_id, x, y, "place updated");
        Ok(next)
    }

    /// Remove a place with all its devices and their problems.
    pub fn delete_place(pool: &mut DbPool, place_id: i64) -> AppResult<CascadeReport> {
        CascadeCoordinator::delete_place(pool, place_id)
    }

    pub fn get_place(pool: &DbPool, place_id: i64) -> AppResult<Place> {
        queries::get_place(&pool.conn, place_id)?
            .ok_or_else(|| AppError::not_found("Place", place_id))
    }

    pub fn list_places(pool: &DbPool, classroom_id: Option<i64>) -> AppResult<Vec<Place>> {
        if let Some(id) = classroom_id
            && queries::get_classroom(&pool.conn, id)?.is_none()
        {
            return Err(AppError::not_found("Classroom", id));
        }
        Ok(queries::list_places(&pool.conn, classroom_id)?)
    }
}
