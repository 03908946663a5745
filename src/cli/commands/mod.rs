//! Handlers for each CLI subcommand. They translate arguments into core
//! calls and render the outcome; no invariant is checked here.

pub mod campus;
pub mod classroom;
pub mod config;
pub mod db;
pub mod device;
pub mod init;
pub mod log;
pub mod place;
pub mod problem;
pub mod user;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Open the configured database.
///
/// Writers create the file and apply pending migrations. Readers only open
/// an existing database and never write to it.
pub fn open_pool(cfg: &Config, read_only: bool) -> AppResult<DbPool> {
    if read_only {
        return open_existing(cfg);
    }
    let pool = DbPool::with_timeout(&cfg.database, cfg.busy_timeout_ms)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Open a database that must already exist, without migrating it.
pub fn open_existing(cfg: &Config) -> AppResult<DbPool> {
    if !Path::new(&cfg.database).exists() {
        return Err(AppError::Config(format!(
            "database {} not found, run `rcampus init` first",
            cfg.database
        )));
    }
    Ok(DbPool::with_timeout(&cfg.database, cfg.busy_timeout_ms)?)
}

/// Ask a yes/no confirmation from the user
pub fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| AppError::Io(io::Error::other(e)))?;
    println!("{}", out);
    Ok(())
}

pub fn opt_or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
