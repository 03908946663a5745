use crate::db::pool::DbPool;
use crate::db::queries::count_rows;
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use std::fs;

const TABLES: [(&str, &str); 6] = [
    ("campuses", "Campuses"),
    ("classrooms", "Classrooms"),
    ("places", "Places"),
    ("devices", "Devices"),
    ("users", "Users"),
    ("problems", "Problems"),
];

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    for (table, label) in TABLES {
        let count = count_rows(&pool.conn, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, count, RESET);
    }

    let active: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM problems WHERE active = 1",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Active problems:{} {}{}{}",
        CYAN, RESET, GREEN, active, RESET
    );

    println!();
    Ok(())
}
