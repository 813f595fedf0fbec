//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required ones are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `SHIFTLINE_STORAGE_PATH`: SQLite database file path
//! - `SHIFTLINE_BACKEND_URL`: Report backend base URL
//!
//! Optional (defaults from [`Config::default`]):
//! - `SHIFTLINE_STORAGE_POOL_SIZE`: Connection pool size
//! - `SHIFTLINE_HISTORY_MAX_ENTRIES`: Records kept per operator-day
//! - `SHIFTLINE_HISTORY_RETENTION_DAYS`: Days of history kept by cleanup
//! - `SHIFTLINE_BACKEND_TIMEOUT_SECS`: Backend request timeout
//! - `SHIFTLINE_TICK_INTERVAL_MS`: Elapsed-time ticker period
//! - `SHIFTLINE_UTC_OFFSET_MINUTES`: Fixed site offset; host offset if unset
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` then `./shiftline.{json,toml}`
//! 2. The same names one and two directories up
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use shiftline_domain::{
    BackendConfig, ClockConfig, Config, HistoryConfig, Result, ShiftlineError, StorageConfig,
};

const FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "shiftline.json", "shiftline.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ShiftlineError::Config` if configuration cannot be loaded from
/// either source or a value is invalid.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `ShiftlineError::Config` if a required variable is missing or any
/// variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    let storage = StorageConfig {
        path: env_var("SHIFTLINE_STORAGE_PATH")?,
        pool_size: env_parse("SHIFTLINE_STORAGE_POOL_SIZE", defaults.storage.pool_size)?,
    };
    let backend = BackendConfig {
        base_url: env_var("SHIFTLINE_BACKEND_URL")?,
        timeout_seconds: env_parse(
            "SHIFTLINE_BACKEND_TIMEOUT_SECS",
            defaults.backend.timeout_seconds,
        )?,
    };
    let history = HistoryConfig {
        max_entries_per_day: env_parse(
            "SHIFTLINE_HISTORY_MAX_ENTRIES",
            defaults.history.max_entries_per_day,
        )?,
        retention_days: env_parse(
            "SHIFTLINE_HISTORY_RETENTION_DAYS",
            defaults.history.retention_days,
        )?,
    };
    let clock = ClockConfig {
        tick_interval_ms: env_parse("SHIFTLINE_TICK_INTERVAL_MS", defaults.clock.tick_interval_ms)?,
        utc_offset_minutes: env_optional("SHIFTLINE_UTC_OFFSET_MINUTES")?,
    };

    validate(Config { storage, history, backend, clock })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ShiftlineError::Config` if the file is missing, unreadable or
/// invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ShiftlineError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ShiftlineError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ShiftlineError::Config(format!("Failed to read config file: {e}")))?;

    validate(parse_config(&contents, &config_path)?)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ShiftlineError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ShiftlineError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ShiftlineError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn validate(config: Config) -> Result<Config> {
    if config.storage.path.trim().is_empty() {
        return Err(ShiftlineError::Config("storage path must not be empty".into()));
    }
    if config.history.max_entries_per_day == 0 {
        return Err(ShiftlineError::Config("history.max_entries_per_day must be at least 1".into()));
    }
    if config.clock.tick_interval_ms == 0 {
        return Err(ShiftlineError::Config("clock.tick_interval_ms must be at least 1".into()));
    }
    Ok(config)
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        ShiftlineError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse an optional variable, `None` when unset or blank.
fn env_optional<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ShiftlineError::Config(format!("Invalid value for {key}: {e}"))),
        _ => Ok(None),
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(env_optional(key)?.unwrap_or(default))
}
