use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with `--test`)
///  - the SQLite database and its schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing rcampus…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    let pool = DbPool::with_timeout(&db_path, cfg.busy_timeout_ms)?;
    init_db(&pool.conn)?;

    println!("✅ Database initialized at {}", &db_path);

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 rcampus initialization completed!");
    Ok(())
}
