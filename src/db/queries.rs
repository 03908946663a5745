//! Plain SQL access for every table.
//!
//! Functions take a `&Connection`; callers that need atomicity pass their
//! open `Transaction` (it derefs to `Connection`). Nothing here enforces
//! cross-row invariants: that is the job of `core`.

use crate::errors::AppError;
use crate::models::campus::{Campus, NewCampus};
use crate::models::classroom::{Classroom, NewClassroom};
use crate::models::device::{Device, NewDevice};
use crate::models::place::{NewPlace, Place};
use crate::models::problem::{NewProblem, Problem, ProblemStatus};
use crate::models::user::{NewUser, User};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn collect<T>(rows: impl Iterator<Item = Result<T>>) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn now_rfc3339() -> String {
    Local::now().to_rfc3339()
}

// ---------------------------
// Row mappers
// ---------------------------

pub fn map_campus(row: &Row) -> Result<Campus> {
    Ok(Campus {
        id: row.get("id")?,
        number: row.get("number")?,
        address: row.get("address")?,
    })
}

pub fn map_classroom(row: &Row) -> Result<Classroom> {
    Ok(Classroom {
        id: row.get("id")?,
        number: row.get("number")?,
        campus_id: row.get("campus_id")?,
    })
}

pub fn map_place(row: &Row) -> Result<Place> {
    Ok(Place {
        id: row.get("id")?,
        x: row.get("x")?,
        y: row.get("y")?,
        place_type: row.get("place_type")?,
        classroom_id: row.get("classroom_id")?,
    })
}

pub fn map_device(row: &Row) -> Result<Device> {
    Ok(Device {
        id: row.get("id")?,
        place_id: row.get("place_id")?,
        status: row.get("status")?,
        description: row.get("description")?,
    })
}

pub fn map_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get("id")?,
        login: row.get("login")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        admin: row.get::<_, i64>("admin")? == 1,
    })
}

pub fn map_problem(row: &Row) -> Result<Problem> {
    let status_str: String = row.get("status")?;
    let status = ProblemStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::ValidationFailed(format!(
                "invalid stored status: {}",
                status_str
            ))),
        )
    })?;

    Ok(Problem {
        id: row.get("id")?,
        device_id: row.get("device_id")?,
        user_id: row.get("user_id")?,
        description: row.get("description")?,
        active: row.get::<_, i64>("active")? == 1,
        status,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

// ---------------------------
// Campus
// ---------------------------

pub fn get_campus(conn: &Connection, id: i64) -> Result<Option<Campus>> {
    conn.query_row("SELECT * FROM campuses WHERE id = ?1", [id], map_campus)
        .optional()
}

pub fn list_campuses(conn: &Connection) -> Result<Vec<Campus>> {
    let mut stmt = conn.prepare("SELECT * FROM campuses ORDER BY id ASC")?;
    collect(stmt.query_map([], map_campus)?)
}

pub fn insert_campus(conn: &Connection, c: &NewCampus) -> Result<i64> {
    conn.execute(
        "INSERT INTO campuses (number, address) VALUES (?1, ?2)",
        params![c.number, c.address],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_campus(conn: &Connection, c: &Campus) -> Result<()> {
    conn.execute(
        "UPDATE campuses SET number = ?1, address = ?2 WHERE id = ?3",
        params![c.number, c.address, c.id],
    )?;
    Ok(())
}

pub fn delete_campus(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM campuses WHERE id = ?1", [id])
}

// ---------------------------
// Classroom
// ---------------------------

pub fn get_classroom(conn: &Connection, id: i64) -> Result<Option<Classroom>> {
    conn.query_row(
        "SELECT * FROM classrooms WHERE id = ?1",
        [id],
        map_classroom,
    )
    .optional()
}

pub fn list_classrooms(conn: &Connection, campus_id: Option<i64>) -> Result<Vec<Classroom>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM classrooms
         WHERE ?1 IS NULL OR campus_id = ?1
         ORDER BY id ASC",
    )?;
    collect(stmt.query_map([campus_id], map_classroom)?)
}

pub fn classroom_ids_for_campus(conn: &Connection, campus_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM classrooms WHERE campus_id = ?1 ORDER BY id")?;
    collect(stmt.query_map([campus_id], |row| row.get(0))?)
}

pub fn insert_classroom(conn: &Connection, c: &NewClassroom) -> Result<i64> {
    conn.execute(
        "INSERT INTO classrooms (number, campus_id) VALUES (?1, ?2)",
        params![c.number, c.campus_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_classroom(conn: &Connection, c: &Classroom) -> Result<()> {
    conn.execute(
        "UPDATE classrooms SET number = ?1, campus_id = ?2 WHERE id = ?3",
        params![c.number, c.campus_id, c.id],
    )?;
    Ok(())
}

pub fn delete_classroom(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM classrooms WHERE id = ?1", [id])
}

// ---------------------------
// Place
// ---------------------------

pub fn get_place(conn: &Connection, id: i64) -> Result<Option<Place>> {
    conn.query_row("SELECT * FROM places WHERE id = ?1", [id], map_place)
        .optional()
}

pub fn list_places(conn: &Connection, classroom_id: Option<i64>) -> Result<Vec<Place>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM places
         WHERE ?1 IS NULL OR classroom_id = ?1
         ORDER BY id ASC",
    )?;
    collect(stmt.query_map([classroom_id], map_place)?)
}

pub fn place_ids_for_classroom(conn: &Connection, classroom_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM places WHERE classroom_id = ?1 ORDER BY id")?;
    collect(stmt.query_map([classroom_id], |row| row.get(0))?)
}

/// Place occupying `(classroom_id, x, y)`, ignoring `exclude_id` if given.
pub fn find_place_at(
    conn: &Connection,
    classroom_id: i64,
    x: i64,
    y: i64,
    exclude_id: Option<i64>,
) -> Result<Option<Place>> {
    conn.query_row(
        "SELECT * FROM places
         WHERE classroom_id = ?1 AND x = ?2 AND y = ?3
           AND (?4 IS NULL OR id <> ?4)
         LIMIT 1",
        params![classroom_id, x, y, exclude_id],
        map_place,
    )
    .optional()
}

pub fn insert_place(conn: &Connection, p: &NewPlace) -> Result<i64> {
    conn.execute(
        "INSERT INTO places (x, y, place_type, classroom_id) VALUES (?1, ?2, ?3, ?4)",
        params![p.x, p.y, p.place_type, p.classroom_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_place(conn: &Connection, p: &Place) -> Result<()> {
    conn.execute(
        "UPDATE places SET x = ?1, y = ?2, place_type = ?3 WHERE id = ?4",
        params![p.x, p.y, p.place_type, p.id],
    )?;
    Ok(())
}

pub fn delete_place(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM places WHERE id = ?1", [id])
}

// ---------------------------
// Device
// ---------------------------

pub fn get_device(conn: &Connection, id: i64) -> Result<Option<Device>> {
    conn.query_row("SELECT * FROM devices WHERE id = ?1", [id], map_device)
        .optional()
}

pub fn list_devices(conn: &Connection, place_id: Option<i64>) -> Result<Vec<Device>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM devices
         WHERE ?1 IS NULL OR place_id = ?1
         ORDER BY id ASC",
    )?;
    collect(stmt.query_map([place_id], map_device)?)
}

pub fn device_ids_for_place(conn: &Connection, place_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM devices WHERE place_id = ?1 ORDER BY id")?;
    collect(stmt.query_map([place_id], |row| row.get(0))?)
}

/// New devices always start with an empty status.
pub fn insert_device(conn: &Connection, d: &NewDevice) -> Result<i64> {
    conn.execute(
        "INSERT INTO devices (place_id, status, description) VALUES (?1, '', ?2)",
        params![d.place_id, d.description],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update caller-editable columns. `status` is left alone.
pub fn update_device(conn: &Connection, d: &Device) -> Result<()> {
    conn.execute(
        "UPDATE devices SET place_id = ?1, description = ?2 WHERE id = ?3",
        params![d.place_id, d.description, d.id],
    )?;
    Ok(())
}

pub fn set_device_status(conn: &Connection, device_id: i64, status: &str) -> Result<usize> {
    conn.execute(
        "UPDATE devices SET status = ?1 WHERE id = ?2",
        params![status, device_id],
    )
}

pub fn load_device_status(conn: &Connection, device_id: i64) -> Result<Option<String>> {
    conn.query_row(
        "SELECT status FROM devices WHERE id = ?1",
        [device_id],
        |row| row.get(0),
    )
    .optional()
}

pub fn all_device_ids(conn: &Connection) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT id FROM devices ORDER BY id")?;
    collect(stmt.query_map([], |row| row.get(0))?)
}

pub fn delete_device(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM devices WHERE id = ?1", [id])
}

// ---------------------------
// User
// ---------------------------

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    conn.query_row("SELECT * FROM users WHERE id = ?1", [id], map_user)
        .optional()
}

pub fn find_user_by_login_or_email(
    conn: &Connection,
    login: &str,
    email: &str,
) -> Result<Option<User>> {
    conn.query_row(
        "SELECT * FROM users WHERE login = ?1 OR email = ?2 LIMIT 1",
        params![login, email],
        map_user,
    )
    .optional()
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users ORDER BY id ASC")?;
    collect(stmt.query_map([], map_user)?)
}

pub fn insert_user(conn: &Connection, u: &NewUser) -> Result<i64> {
    conn.execute(
        "INSERT INTO users (login, email, password_hash, admin) VALUES (?1, ?2, ?3, ?4)",
        params![u.login, u.email, u.password_hash, u.admin as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

// ---------------------------
// Problem
// ---------------------------

pub fn get_problem(conn: &Connection, id: i64) -> Result<Option<Problem>> {
    conn.query_row("SELECT * FROM problems WHERE id = ?1", [id], map_problem)
        .optional()
}

pub fn list_problems(conn: &Connection, device_id: Option<i64>) -> Result<Vec<Problem>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM problems
         WHERE ?1 IS NULL OR device_id = ?1
         ORDER BY id ASC",
    )?;
    collect(stmt.query_map([device_id], map_problem)?)
}

/// Active problems of a device, lowest id first.
pub fn load_active_problems(conn: &Connection, device_id: i64) -> Result<Vec<Problem>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM problems
         WHERE device_id = ?1 AND active = 1
         ORDER BY id ASC",
    )?;
    collect(stmt.query_map([device_id], map_problem)?)
}

pub fn insert_problem(conn: &Connection, p: &NewProblem) -> Result<i64> {
    let now = now_rfc3339();
    conn.execute(
        "INSERT INTO problems
             (device_id, user_id, description, active, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            p.device_id,
            p.user_id,
            p.description,
            p.active as i64,
            p.status.to_db_str(),
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update all fields except id and created_at.
pub fn update_problem(conn: &Connection, p: &Problem) -> Result<()> {
    conn.execute(
        "UPDATE problems
         SET device_id = ?1, user_id = ?2, description = ?3,
             active = ?4, status = ?5, updated_at = ?6
         WHERE id = ?7",
        params![
            p.device_id,
            p.user_id,
            p.description,
            p.active as i64,
            p.status.to_db_str(),
            p.updated_at,
            p.id,
        ],
    )?;
    Ok(())
}

pub fn delete_problem(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM problems WHERE id = ?1", [id])
}

pub fn delete_problems_for_device(conn: &Connection, device_id: i64) -> Result<usize> {
    conn.execute("DELETE FROM problems WHERE device_id = ?1", [device_id])
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table),
        [],
        |row| row.get(0),
    )
}
