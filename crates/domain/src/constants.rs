//! Domain constants
//!
//! Reference values for the flight source queries, the ingestion cadence and
//! the tracker poll loop.

/// Placeholder stored or displayed when the source omits a text field.
pub const UNKNOWN_FIELD: &str = "N/A";

/// Fixed timestamp layout used by the flight source (naive local clock).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// Periodic ingestion
pub const DEFAULT_INGEST_DEPARTURE_IATA: &str = "LAX";
pub const DEFAULT_INGEST_ARRIVAL_IATA: &str = "JFK";
pub const DEFAULT_INGEST_FETCH_LIMIT: usize = 3;
pub const DEFAULT_INGEST_INTERVAL_HOURS: u64 = 24;
pub const DEFAULT_INGEST_INITIAL_DELAY_SECS: u64 = 20;

// Real-time tracking
pub const DEFAULT_TRACKING_POLL_INTERVAL_SECS: u64 = 60;

// Route queries
pub const DEFAULT_ROUTE_QUERY_FETCH_LIMIT: usize = 5;

// History
pub const WEEKLY_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

// Flight source
pub const DEFAULT_FLIGHT_API_BASE_URL: &str = "https://api.aviationstack.com/";
pub const DEFAULT_FLIGHT_API_TIMEOUT_SECS: u64 = 30;

// User-facing messages
pub const MSG_NO_FLIGHT_DATA: &str = "No flight data found.";
pub const MSG_NO_VALID_FLIGHT_DATA: &str = "No valid flight data available.";
pub const MSG_INVALID_FLIGHT_CODE: &str = "Please enter a valid flight number";
pub const MSG_INVALID_ROUTE: &str = "Please provide both departure and arrival IATA codes.";
