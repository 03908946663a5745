#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rcampus::core::{DeviceRegistry, Hierarchy, PlacementRegistry, UserDirectory};
use rcampus::db::initialize::init_db;
use rcampus::db::pool::DbPool;
use rcampus::models::campus::NewCampus;
use rcampus::models::classroom::NewClassroom;
use rcampus::models::device::NewDevice;
use rcampus::models::place::NewPlace;
use rcampus::models::user::NewUser;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rca() -> Command {
    cargo_bin_cmd!("rcampus")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcampus.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    for suffix in ["", "-wal", "-shm"] {
        fs::remove_file(format!("{}{}", db_path, suffix)).ok();
    }
    db_path
}

/// Open a connection on `db_path` with the schema in place.
pub fn open(db_path: &str) -> DbPool {
    let pool = DbPool::new(db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Ids of a small hierarchy: one campus, two classrooms, one place in the
/// first classroom, one device on that place and one user.
pub struct Fixture {
    pub campus: i64,
    pub classroom: i64,
    pub other_classroom: i64,
    pub place: i64,
    pub device: i64,
    pub user: i64,
}

pub fn seed(pool: &mut DbPool) -> Fixture {
    let campus = Hierarchy::create_campus(
        pool,
        &NewCampus {
            number: 1,
            address: "1 Main Street".into(),
        },
    )
    .expect("campus");
    let classroom = Hierarchy::create_classroom(
        pool,
        &NewClassroom {
            number: 101,
            campus_id: campus.id,
        },
    )
    .expect("classroom");
    let other_classroom = Hierarchy::create_classroom(
        pool,
        &NewClassroom {
            number: 102,
            campus_id: campus.id,
        },
    )
    .expect("other classroom");
    let place = PlacementRegistry::create_place(pool, &new_place(classroom.id, 0, 0))
        .expect("place");
    let device = DeviceRegistry::create_device(
        pool,
        &NewDevice {
            place_id: place.id,
            description: Some("PC-01".into()),
        },
    )
    .expect("device");
    let user = UserDirectory::create_user(
        pool,
        &NewUser {
            login: "alice".into(),
            email: "alice@example.org".into(),
            password_hash: String::new(),
            admin: false,
        },
    )
    .expect("user");

    Fixture {
        campus: campus.id,
        classroom: classroom.id,
        other_classroom: other_classroom.id,
        place: place.id,
        device: device.id,
        user: user.id,
    }
}

pub fn new_place(classroom_id: i64, x: i64, y: i64) -> NewPlace {
    NewPlace {
        classroom_id,
        x,
        y,
        place_type: "standard".into(),
    }
}

pub fn add_device(pool: &mut DbPool, place_id: i64) -> i64 {
    DeviceRegistry::create_device(
        pool,
        &NewDevice {
            place_id,
            description: None,
        },
    )
    .expect("device")
    .id
}

pub fn device_status(pool: &DbPool, device_id: i64) -> String {
    DeviceRegistry::get_device(pool, device_id)
        .expect("device")
        .status
}

pub fn count(pool: &DbPool, table: &str) -> i64 {
    rcampus::db::queries::count_rows(&pool.conn, table).expect("count")
}
