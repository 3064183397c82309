//! Persisted flight duration history

use serde::{Deserialize, Serialize};

/// Ordered (departure, arrival) pair identifying a history partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub departure_iata: String,
    pub arrival_iata: String,
}

impl RouteKey {
    /// Build a key from user input, trimming and uppercasing both codes.
    ///
    /// The history store matches codes case-sensitively, so every caller
    /// that queries it should go through this constructor.
    pub fn normalized(departure_iata: &str, arrival_iata: &str) -> Self {
        Self {
            departure_iata: departure_iata.trim().to_uppercase(),
            arrival_iata: arrival_iata.trim().to_uppercase(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.departure_iata.is_empty() || self.arrival_iata.is_empty()
    }
}

impl std::fmt::Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.departure_iata, self.arrival_iata)
    }
}

/// A duration record that has not been assigned an identity yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDurationRecord {
    pub flight_code: String,
    pub departure_iata: String,
    pub arrival_iata: String,
    /// Arrival minus departure in whole minutes. Not sanity-checked: may be
    /// zero, negative or span several days when the source is inconsistent.
    pub duration_minutes: i64,
    /// Wall-clock ingestion time, Unix epoch milliseconds.
    pub recorded_at: i64,
}

impl NewDurationRecord {
    /// Attach the identity assigned by the store.
    pub fn with_id(self, id: i64) -> DurationRecord {
        DurationRecord {
            id,
            flight_code: self.flight_code,
            departure_iata: self.departure_iata,
            arrival_iata: self.arrival_iata,
            duration_minutes: self.duration_minutes,
            recorded_at: self.recorded_at,
        }
    }
}

/// A persisted flight duration observation. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRecord {
    /// Monotonically assigned by the store.
    pub id: i64,
    pub flight_code: String,
    pub departure_iata: String,
    pub arrival_iata: String,
    pub duration_minutes: i64,
    /// Unix epoch milliseconds.
    pub recorded_at: i64,
}

impl DurationRecord {
    pub fn route(&self) -> RouteKey {
        RouteKey {
            departure_iata: self.departure_iata.clone(),
            arrival_iata: self.arrival_iata.clone(),
        }
    }
}

/// Outcome of one periodic ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionReport {
    /// Snapshots considered after applying the fetch limit.
    pub fetched: usize,
    pub persisted: usize,
    /// Snapshots dropped because their timestamps were missing or unparseable.
    pub skipped: usize,
}
