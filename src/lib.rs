//! rcampus library root.
//! Exposes the consistency engine (`core`), its SQLite store (`db`) and the
//! CLI that drives them.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log filter.
pub const LOG_ENV: &str = "RCAMPUS_LOG";

/// Install the diagnostics subscriber on stderr. Safe to call twice.
pub fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let json = cli.json;
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Campus { action } => cli::commands::campus::handle(action, cfg, json),
        Commands::Classroom { action } => cli::commands::classroom::handle(action, cfg, json),
        Commands::Place { action } => cli::commands::place::handle(action, cfg, json),
        Commands::Device { action } => cli::commands::device::handle(action, cfg, json),
        Commands::User { action } => cli::commands::user::handle(action, cfg, json),
        Commands::Problem { action } => cli::commands::problem::handle(action, cfg, json),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    init_tracing(&cfg);

    dispatch(&cli, &cfg)
}
