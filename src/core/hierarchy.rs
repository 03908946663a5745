//! Campuses and classrooms.

use crate::core::cascade::{CascadeCoordinator, CascadeReport};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::campus::{Campus, CampusPatch, NewCampus};
use crate::models::classroom::{Classroom, ClassroomPatch, NewClassroom};
use tracing::info;

pub struct Hierarchy;

impl Hierarchy {
    // ---------------------------
    // Campus
    // ---------------------------

    pub fn create_campus(pool: &mut DbPool, new: &NewCampus) -> AppResult<Campus> {
        let tx = pool.begin()?;
        let id = queries::insert_campus(&tx, new)?;
        ttlog(
            &tx,
            "add",
            &format!("campus {}", id),
            &format!("Campus {} at '{}'", new.number, new.address),
        )?;
        let campus =
            queries::get_campus(&tx, id)?.ok_or_else(|| AppError::not_found("Campus", id))?;
        tx.commit()?;

        info!(campus_id = id, "campus created");
        Ok(campus)
    }

    pub fn update_campus(
        pool: &mut DbPool,
        campus_id: i64,
        patch: &CampusPatch,
    ) -> AppResult<Campus> {
        let tx = pool.begin()?;
        let current = queries::get_campus(&tx, campus_id)?
            .ok_or_else(|| AppError::not_found("Campus", campus_id))?;
        if patch.is_empty() {
            return Ok(current);
        }

        let next = Campus {
            number: patch.number.unwrap_or(current.number),
            address: patch
                .address
                .clone()
                .unwrap_or_else(|| current.address.clone()),
            ..current
        };
        queries::update_campus(&tx, &next)?;
        ttlog(
            &tx,
            "edit",
            &format!("campus {}", campus_id),
            &format!("Campus {} at '{}'", next.number, next.address),
        )?;
        tx.commit()?;

        info!(campus_id, "campus updated");
        Ok(next)
    }

    pub fn delete_campus(pool: &mut DbPool, campus_id: i64) -> AppResult<CascadeReport> {
        CascadeCoordinator::delete_campus(pool, campus_id)
    }

    pub fn get_campus(pool: &DbPool, campus_id: i64) -> AppResult<Campus> {
        queries::get_campus(&pool.conn, campus_id)?
            .ok_or_else(|| AppError::not_found("Campus", campus_id))
    }

    pub fn list_campuses(pool: &DbPool) -> AppResult<Vec<Campus>> {
        Ok(queries::list_campuses(&pool.conn)?)
    }

    // ---------------------------
    // Classroom
    // ---------------------------

    pub fn create_classroom(pool: &mut DbPool, new: &NewClassroom) -> AppResult<Classroom> {
        let tx = pool.begin()?;
        if queries::get_campus(&tx, new.campus_id)?.is_none() {
            return Err(AppError::not_found("Campus", new.campus_id));
        }

        let id = queries::insert_classroom(&tx, new)?;
        ttlog(
            &tx,
            "add",
            &format!("classroom {}", id),
            &format!("Classroom {} in campus {}", new.number, new.campus_id),
        )?;
        let classroom =
            queries::get_classroom(&tx, id)?.ok_or_else(|| AppError::not_found("Classroom", id))?;
        tx.commit()?;

        info!(
            classroom_id = id,
            campus_id = new.campus_id,
            "classroom created"
        );
        Ok(classroom)
    }

    pub fn update_classroom(
        pool: &mut DbPool,
        classroom_id: i64,
        patch: &ClassroomPatch,
    ) -> AppResult<Classroom> {
        let tx = pool.begin()?;
        let current = queries::get_classroom(&tx, classroom_id)?
            .ok_or_else(|| AppError::not_found("Classroom", classroom_id))?;
        if patch.is_empty() {
            return Ok(current);
        }
        if let Some(campus_id) = patch.campus_id
            && queries::get_campus(&tx, campus_id)?.is_none()
        {
            return Err(AppError::not_found("Campus", campus_id));
        }

        let next = Classroom {
            number: patch.number.unwrap_or(current.number),
            campus_id: patch.campus_id.unwrap_or(current.campus_id),
            ..current
        };
        queries::update_classroom(&tx, &next)?;
        ttlog(
            &tx,
            "edit",
            &format!("classroom {}", classroom_id),
            &format!("Classroom {} in campus {}", next.number, next.campus_id),
        )?;
        tx.commit()?;

        info!(classroom_id, "classroom updated");
        Ok(next)
    }

    pub fn delete_classroom(pool: &mut DbPool, classroom_id: i64) -> AppResult<CascadeReport> {
        CascadeCoordinator::delete_classroom(pool, classroom_id)
    }

    pub fn get_classroom(pool: &DbPool, classroom_id: i64) -> AppResult<Classroom> {
        queries::get_classroom(&pool.conn, classroom_id)?
            .ok_or_else(|| AppError::not_found("Classroom", classroom_id))
    }

    pub fn list_classrooms(pool: &DbPool, campus_id: Option<i64>) -> AppResult<Vec<Classroom>> {
        if let Some(id) = campus_id
            && queries::get_campus(&pool.conn, id)?.is_none()
        {
            return Err(AppError::not_found("Campus", id));
        }
        Ok(queries::list_classrooms(&pool.conn, campus_id)?)
    }
}
