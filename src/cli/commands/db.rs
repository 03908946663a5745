use crate::cli::commands::open_existing;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::status;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        rebuild_status,
        vacuum,
        info,
    } = cmd
    {
        // only an explicit migration may create the database
        let mut pool = if *migrate {
            DbPool::with_timeout(&cfg.database, cfg.busy_timeout_ms)?
        } else {
            open_existing(cfg)?
        };

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            run_pending_migrations(&pool.conn)?;
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            let drift = status::verify_all(&pool.conn)?;
            if drift.is_empty() {
                println!("{}✔ All device statuses are consistent.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}✘ {} device(s) with a stale status:{}",
                    RED,
                    drift.len(),
                    RESET
                );
                for d in &drift {
                    println!(
                        "    device {}: stored '{}', expected '{}'",
                        d.device_id, d.stored, d.expected
                    );
                }
                println!("  Run `rcampus db --rebuild-status` to repair.\n");
            }
        }

        //
        // 4) REBUILD STATUS
        //
        if *rebuild_status {
            println!("{}▶ Recomputing device statuses…{}", CYAN, RESET);
            let written = status::recompute_all(&mut pool)?;
            println!(
                "{}✔ Rebuild completed, {} device(s) updated.{}\n",
                GREEN, written, RESET
            );
        }

        //
        // 5) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
