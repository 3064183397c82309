//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FLIGHT_API_BASE_URL, DEFAULT_FLIGHT_API_TIMEOUT_SECS, DEFAULT_INGEST_ARRIVAL_IATA,
    DEFAULT_INGEST_DEPARTURE_IATA, DEFAULT_INGEST_FETCH_LIMIT, DEFAULT_INGEST_INITIAL_DELAY_SECS,
    DEFAULT_INGEST_INTERVAL_HOURS, DEFAULT_ROUTE_QUERY_FETCH_LIMIT,
    DEFAULT_TRACKING_POLL_INTERVAL_SECS,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub flight_api: FlightApiConfig,
    #[serde(default)]
    pub ingestion: IngestionConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub route_query: RouteQueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "routewatch.db".to_string(), pool_size: 4 }
    }
}

/// Remote flight source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightApiConfig {
    pub base_url: String,
    /// Opaque access key forwarded as a query parameter.
    #[serde(skip_serializing)]
    pub access_key: Option<String>,
    pub timeout_seconds: u64,
    /// Total attempts per request. One means no retry.
    pub max_attempts: usize,
}

impl Default for FlightApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FLIGHT_API_BASE_URL.to_string(),
            access_key: None,
            timeout_seconds: DEFAULT_FLIGHT_API_TIMEOUT_SECS,
            max_attempts: 1,
        }
    }
}

/// Periodic ingestion configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    pub enabled: bool,
    pub departure_iata: String,
    pub arrival_iata: String,
    pub fetch_limit: usize,
    pub interval_hours: u64,
    /// Delay before the one-shot run after start-up. Zero disables it.
    pub initial_delay_seconds: u64,
    /// Skip runs while the flight API host is unreachable.
    pub require_network: bool,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            departure_iata: DEFAULT_INGEST_DEPARTURE_IATA.to_string(),
            arrival_iata: DEFAULT_INGEST_ARRIVAL_IATA.to_string(),
            fetch_limit: DEFAULT_INGEST_FETCH_LIMIT,
            interval_hours: DEFAULT_INGEST_INTERVAL_HOURS,
            initial_delay_seconds: DEFAULT_INGEST_INITIAL_DELAY_SECS,
            require_network: true,
        }
    }
}

/// Real-time tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub poll_interval_seconds: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self { poll_interval_seconds: DEFAULT_TRACKING_POLL_INTERVAL_SECS }
    }
}

/// On-demand route query configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteQueryConfig {
    pub fetch_limit: usize,
}

impl Default for RouteQueryConfig {
    fn default() -> Self {
        Self { fetch_limit: DEFAULT_ROUTE_QUERY_FETCH_LIMIT }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
