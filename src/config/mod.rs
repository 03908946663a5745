use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_busy_timeout() -> u64 {
    5000
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            busy_timeout_ms: default_busy_timeout(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("rcampus"))
            .unwrap_or_else(|| PathBuf::from(".rcampus"))
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rcampus.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rcampus.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Initialize the configuration file (skipped in test mode) and return
    /// the configuration that the database should be created with.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let mut config = Self::load()?;
        if let Some(path) = custom_db {
            config.database = path;
        }

        if let Some(parent) = Path::new(&config.database).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(format!("cannot serialize config: {}", e)))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
