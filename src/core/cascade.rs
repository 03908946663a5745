//! Cascading deletes.
//!
//! Children go first (problems, then devices, then places, ...) so foreign
//! keys hold at every statement. Each public entry point is one transaction:
//! either the whole subtree disappears or nothing does.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use serde::Serialize;
use std::ops::AddAssign;
use tracing::info;

/// Rows removed by a cascading delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub campuses: usize,
    pub classrooms: usize,
    pub places: usize,
    pub devices: usize,
    pub problems: usize,
}

impl AddAssign for CascadeReport {
    fn add_assign(&mut self, rhs: Self) {
        self.campuses += rhs.campuses;
        self.classrooms += rhs.classrooms;
        self.places += rhs.places;
        self.devices += rhs.devices;
        self.problems += rhs.problems;
    }
}

impl CascadeReport {
    pub fn summary(&self) -> String {
        format!(
            "{} campus(es), {} classroom(s), {} place(s), {} device(s), {} problem(s)",
            self.campuses, self.classrooms, self.places, self.devices, self.problems
        )
    }
}

pub struct CascadeCoordinator;

// The device goes away together with its problems, so no status
// recomputation is needed here.
fn remove_device(conn: &Connection, device_id: i64) -> AppResult<CascadeReport> {
    let problems = queries::delete_problems_for_device(conn, device_id)?;
    let devices = queries::delete_device(conn, device_id)?;
    Ok(CascadeReport {
        devices,
        problems,
        ..Default::default()
    })
}

fn remove_place(conn: &Connection, place_id: i64) -> AppResult<CascadeReport> {
    let mut report = CascadeReport::default();
    for device_id in queries::device_ids_for_place(conn, place_id)? {
        report += remove_device(conn, device_id)?;
    }
    report.places += queries::delete_place(conn, place_id)?;
    Ok(report)
}

fn remove_classroom(conn: &Connection, classroom_id: i64) -> AppResult<CascadeReport> {
    let mut report = CascadeReport::default();
    for place_id in queries::place_ids_for_classroom(conn, classroom_id)? {
        report += remove_place(conn, place_id)?;
    }
    report.classrooms += queries::delete_classroom(conn, classroom_id)?;
    Ok(report)
}

fn remove_campus(conn: &Connection, campus_id: i64) -> AppResult<CascadeReport> {
    let mut report = CascadeReport::default();
    for classroom_id in queries::classroom_ids_for_campus(conn, campus_id)? {
        report += remove_classroom(conn, classroom_id)?;
    }
    report.campuses += queries::delete_campus(conn, campus_id)?;
    Ok(report)
}

impl CascadeCoordinator {
    pub fn delete_place(pool: &mut DbPool, place_id: i64) -> AppResult<CascadeReport> {
        let tx = pool.begin()?;

        if queries::get_place(&tx, place_id)?.is_none() {
            return Err(AppError::not_found("Place", place_id));
        }

        let report = remove_place(&tx, place_id)?;
        ttlog(
            &tx,
            "del",
            &format!("place {}", place_id),
            &report.summary(),
        )?;
        tx.commit()?;

        info!(
            place_id,
            devices = report.devices,
            problems = report.problems,
            "place deleted"
        );
        Ok(report)
    }

    pub fn delete_device(pool: &mut DbPool, device_id: i64) -> AppResult<CascadeReport> {
        let tx = pool.begin()?;

        if queries::get_device(&tx, device_id)?.is_none() {
            return Err(AppError::not_found("Device", device_id));
        }

        let report = remove_device(&tx, device_id)?;
        ttlog(
            &tx,
            "del",
            &format!("device {}", device_id),
            &report.summary(),
        )?;
        tx.commit()?;

        info!(device_id, problems = report.problems, "device deleted");
        Ok(report)
    }

    pub fn delete_classroom(pool: &mut DbPool, classroom_id: i64) -> AppResult<CascadeReport> {
        let tx = pool.begin()?;

        if queries::get_classroom(&tx, classroom_id)?.is_none() {
            return Err(AppError::not_found("Classroom", classroom_id));
        }

        let report = remove_classroom(&tx, classroom_id)?;
        ttlog(
            &tx,
            "del",
            &format!("classroom {}", classroom_id),
            &report.summary(),
        )?;
        tx.commit()?;

        info!(classroom_id, places = report.places, "classroom deleted");
        Ok(report)
    }

    pub fn delete_campus(pool: &mut DbPool, campus_id: i64) -> AppResult<CascadeReport> {
        let tx = pool.begin()?;

        if queries::get_campus(&tx, campus_id)?.is_none() {
            return Err(AppError::not_found("Campus", campus_id));
        }

        let report = remove_campus(&tx, campus_id)?;
        ttlog(
            &tx,
            "del",
            &format!("campus {}", campus_id),
            &report.summary(),
        )?;
        tx.commit()?;

        info!(campus_id, classrooms = report.classrooms, "campus deleted");
        Ok(report)
    }
}
