//! Route query service
//!
//! Fetches a small batch of flights for a route, computes each duration and
//! the batch average. Results are returned to the caller only; the history
//! store is never touched.

use std::sync::Arc;

use routewatch_domain::constants::{MSG_INVALID_ROUTE, UNKNOWN_FIELD};
use routewatch_domain::{FlightSnapshot, Result, RouteFlight, RouteKey, RouteSummary, RouteWatchError};
use tracing::{debug, instrument};

use crate::flights::ports::FlightSource;
use crate::history::normalizer::normalize_snapshot;
use crate::utils::stats::mean_minutes;

/// Stateless, on-demand route lookups against the flight source.
pub struct RouteQueryService {
    source: Arc<dyn FlightSource>,
    fetch_limit: usize,
}

impl RouteQueryService {
    /// `fetch_limit` bounds the snapshots considered per query.
    pub fn new(source: Arc<dyn FlightSource>, fetch_limit: usize) -> Self {
        Self { source, fetch_limit }
    }

    /// Query live flights between two airports.
    ///
    /// Codes are trimmed and uppercased before the fetch. Snapshots whose
    /// duration cannot be computed are dropped and counted in
    /// [`RouteSummary::skipped`]. A transport failure is returned as an
    /// error; an empty batch is a successful, empty summary.
    #[instrument(skip(self))]
    pub async fn query(&self, departure_iata: &str, arrival_iata: &str) -> Result<RouteSummary> {
        let route = RouteKey::normalized(departure_iata, arrival_iata);
        if route.is_blank() {
            return Err(RouteWatchError::InvalidInput(MSG_INVALID_ROUTE.to_string()));
        }

        let snapshots = self
            .source
            .fetch_by_route(&route.departure_iata, &route.arrival_iata, self.fetch_limit)
            .await?;

        let mut fetched = 0;
        let mut flights = Vec::new();
        for snapshot in snapshots.iter().take(self.fetch_limit) {
            fetched += 1;
            match normalize_snapshot(snapshot) {
                Ok(duration_minutes) => flights.push(route_flight(snapshot, duration_minutes)),
                Err(reason) => debug!(%reason, "dropping flight without a computable duration"),
            }
        }

        let average_minutes = mean_minutes(flights.iter().map(|flight| flight.duration_minutes));
        let skipped = fetched - flights.len();

        Ok(RouteSummary { route, flights, average_minutes, fetched, skipped })
    }
}

fn route_flight(snapshot: &FlightSnapshot, duration_minutes: i64) -> RouteFlight {
    let text = |value: Option<&str>| value.unwrap_or(UNKNOWN_FIELD).to_string();

    RouteFlight {
        flight_code: text(snapshot.flight_code()),
        airline_name: text(snapshot.airline_name()),
        departure_airport: text(snapshot.departure.as_ref().and_then(|d| d.airport.as_deref())),
        arrival_airport: text(snapshot.arrival.as_ref().and_then(|a| a.airport.as_deref())),
        duration_minutes,
    }
}
