//! Port interface for the remote flight source
//!
//! The source is an external collaborator; its wire format and transport live
//! in the infra crate.

use async_trait::async_trait;
use routewatch_domain::{FlightSnapshot, Result};

/// Remote service answering flight lookups.
///
/// Both operations may fail with a transport-level error
/// (`RouteWatchError::Network`) and both may return an empty list as a valid
/// outcome.
#[async_trait]
pub trait FlightSource: Send + Sync {
    /// Look up a flight by its IATA flight code.
    async fn fetch_by_code(&self, flight_code: &str) -> Result<Vec<FlightSnapshot>>;

    /// Fetch at most `limit` flights flying the given route.
    async fn fetch_by_route(
        &self,
        departure_iata: &str,
        arrival_iata: &str,
        limit: usize,
    ) -> Result<Vec<FlightSnapshot>>;
}
