use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DATA_DIR_ENV: &str = "PRESS_DASHBOARD_DATA_DIR";
pub const BIND_ENV: &str = "PRESS_DASHBOARD_BIND";
pub const CORS_ORIGIN_ENV: &str = "PRESS_DASHBOARD_CORS_ORIGIN";
pub const REMINDER_DAYS_ENV: &str = "PRESS_DASHBOARD_REMINDER_DAYS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("No platform data directory; set {0}")]
    NoDataDirectory(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Holds the table CSV files and the preference file
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Web UI origin allowed by CORS
    pub cors_origin: String,
    /// How many days ahead media plan reminders look
    pub reminder_days: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|dir| dir.join("press-dashboard"))
                .ok_or(ConfigError::NoDataDirectory(DATA_DIR_ENV))?,
        };

        let bind = lookup(BIND_ENV).unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let bind_addr = bind.parse().map_err(|_| ConfigError::InvalidValue {
            key: BIND_ENV,
            value: bind.clone(),
        })?;

        let reminder_days = match lookup(REMINDER_DAYS_ENV) {
            Some(days) => days.parse().map_err(|_| ConfigError::InvalidValue {
                key: REMINDER_DAYS_ENV,
                value: days.clone(),
            })?,
            None => 3,
        };

        Ok(Config {
            data_dir,
            bind_addr,
            cors_origin: lookup(CORS_ORIGIN_ENV).unwrap_or_else(|| "http://localhost:8080".to_string()),
            reminder_days,
        })
    }
}
