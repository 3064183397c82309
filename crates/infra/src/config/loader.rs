//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Start from the built-in defaults
//! 2. Merge the first config file found (explicit path via
//!    `ROUTEWATCH_CONFIG`, otherwise searched), JSON or TOML by extension
//! 3. Apply environment variable overrides
//! 4. Validate the result
//!
//! ## Environment Variables
//! - `ROUTEWATCH_CONFIG`: Explicit config file path
//! - `ROUTEWATCH_DB_PATH`: History database file path
//! - `ROUTEWATCH_DB_POOL_SIZE`: Connection pool size
//! - `ROUTEWATCH_FLIGHT_API_URL`: Flight API base URL
//! - `ROUTEWATCH_FLIGHT_API_KEY`: Flight API access key
//! - `ROUTEWATCH_FLIGHT_API_TIMEOUT`: Request timeout in seconds
//! - `ROUTEWATCH_INGEST_ENABLED`: Whether periodic ingestion runs (true/false)
//! - `ROUTEWATCH_INGEST_DEPARTURE` / `ROUTEWATCH_INGEST_ARRIVAL`: Ingested route
//! - `ROUTEWATCH_INGEST_LIMIT`: Snapshots per ingestion run
//! - `ROUTEWATCH_INGEST_INTERVAL_HOURS`: Hours between runs
//! - `ROUTEWATCH_TRACKING_INTERVAL`: Tracker poll interval in seconds
//! - `ROUTEWATCH_LOG_LEVEL`: Default log filter
//! - `ROUTEWATCH_LOG_JSON`: Emit JSON logs (true/false)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use routewatch_domain::{Config, Result, RouteWatchError};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["routewatch.toml", "routewatch.json", "config.toml", "config.json"];

/// Load configuration using the full layering strategy.
pub fn load() -> Result<Config> {
    let explicit = std::env::var("ROUTEWATCH_CONFIG").ok().map(PathBuf::from);

    let mut config = match explicit.or_else(find_config_file) {
        Some(path) => load_from_file(&path)?,
        None => {
            tracing::debug!("No config file found; using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file. Missing sections fall back to defaults.
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(RouteWatchError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| RouteWatchError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RouteWatchError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RouteWatchError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(RouteWatchError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the working directory or next to the
/// executable.
pub fn find_config_file() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Overlay `ROUTEWATCH_*` environment variables onto `config`.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(path) = env_string("ROUTEWATCH_DB_PATH") {
        config.database.path = path;
    }
    if let Some(size) = env_parse("ROUTEWATCH_DB_POOL_SIZE")? {
        config.database.pool_size = size;
    }

    if let Some(url) = env_string("ROUTEWATCH_FLIGHT_API_URL") {
        config.flight_api.base_url = url;
    }
    if let Some(key) = env_string("ROUTEWATCH_FLIGHT_API_KEY") {
        config.flight_api.access_key = Some(key);
    }
    if let Some(timeout) = env_parse("ROUTEWATCH_FLIGHT_API_TIMEOUT")? {
        config.flight_api.timeout_seconds = timeout;
    }

    if let Some(enabled) = env_bool("ROUTEWATCH_INGEST_ENABLED")? {
        config.ingestion.enabled = enabled;
    }
    if let Some(code) = env_string("ROUTEWATCH_INGEST_DEPARTURE") {
        config.ingestion.departure_iata = code;
    }
    if let Some(code) = env_string("ROUTEWATCH_INGEST_ARRIVAL") {
        config.ingestion.arrival_iata = code;
    }
    if let Some(limit) = env_parse("ROUTEWATCH_INGEST_LIMIT")? {
        config.ingestion.fetch_limit = limit;
    }
    if let Some(hours) = env_parse("ROUTEWATCH_INGEST_INTERVAL_HOURS")? {
        config.ingestion.interval_hours = hours;
    }

    if let Some(seconds) = env_parse("ROUTEWATCH_TRACKING_INTERVAL")? {
        config.tracking.poll_interval_seconds = seconds;
    }

    if let Some(level) = env_string("ROUTEWATCH_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = env_bool("ROUTEWATCH_LOG_JSON")? {
        config.logging.json = json;
    }

    Ok(())
}

fn validate(config: &Config) -> Result<()> {
    if config.database.path.trim().is_empty() {
        return Err(RouteWatchError::Config("database.path must not be empty".into()));
    }
    if config.ingestion.enabled
        && (config.ingestion.departure_iata.trim().is_empty()
            || config.ingestion.arrival_iata.trim().is_empty())
    {
        return Err(RouteWatchError::Config(
            "ingestion route needs both departure_iata and arrival_iata".into(),
        ));
    }
    if config.ingestion.fetch_limit == 0 || config.route_query.fetch_limit == 0 {
        return Err(RouteWatchError::Config("fetch limits must be at least 1".into()));
    }
    if config.tracking.poll_interval_seconds == 0 {
        return Err(RouteWatchError::Config("tracking.poll_interval_seconds must be at least 1".into()));
    }
    Ok(())
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_string(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| RouteWatchError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
/// Anything else is a config error.
fn env_bool(key: &str) -> Result<Option<bool>> {
    env_string(key)
        .map(|raw| match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(RouteWatchError::Config(format!(
                "Invalid value for {key}: expected true/false, yes/no, on/off or 1/0, got '{raw}'"
            ))),
        })
        .transpose()
}
