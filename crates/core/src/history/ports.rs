//! Port interfaces for the history store
//!
//! The store is the single writer of duration records. Route codes are
//! matched case-sensitively against the stored (uppercased) values; callers
//! normalize before querying.

use async_trait::async_trait;
use routewatch_domain::{DurationRecord, NewDurationRecord, Result};

/// Durable, append-oriented storage of duration records.
#[async_trait]
pub trait DurationHistoryRepository: Send + Sync {
    /// Append one record and return it with its assigned identity.
    ///
    /// Each call is atomic. Only storage failures are reported; content is
    /// never rejected.
    async fn insert(&self, record: NewDurationRecord) -> Result<DurationRecord>;

    /// Mean duration of the route's records with `recorded_at >= since`
    /// (epoch milliseconds). `None` when no record matches.
    async fn average_since(
        &self,
        departure_iata: &str,
        arrival_iata: &str,
        since: i64,
    ) -> Result<Option<f64>>;

    /// All records of the route, most recent first; ties on `recorded_at`
    /// put the later insertion first.
    async fn history_by_route(
        &self,
        departure_iata: &str,
        arrival_iata: &str,
    ) -> Result<Vec<DurationRecord>>;
}
