//! Read side of the history store

use std::sync::Arc;

use routewatch_domain::constants::{MSG_INVALID_ROUTE, WEEKLY_WINDOW_MS};
use routewatch_domain::{DurationRecord, Result, RouteKey, RouteWatchError};

use super::ports::DurationHistoryRepository;
use crate::utils::clock::{system_clock, Clock};

/// Route-level statistics over persisted duration records.
pub struct HistoryService {
    repository: Arc<dyn DurationHistoryRepository>,
    clock: Clock,
}

impl HistoryService {
    /// Create a service reading through `repository` with the system clock.
    pub fn new(repository: Arc<dyn DurationHistoryRepository>) -> Self {
        Self { repository, clock: system_clock() }
    }

    /// Override the clock that anchors the weekly window.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Mean duration of records on the route at or after `since`.
    pub async fn average_since(&self, route: &RouteKey, since: i64) -> Result<Option<f64>> {
        let route = validated(route)?;
        self.repository.average_since(&route.departure_iata, &route.arrival_iata, since).await
    }

    /// Mean duration over the trailing seven days.
    pub async fn weekly_average(&self, route: &RouteKey) -> Result<Option<f64>> {
        let since = (self.clock)().saturating_sub(WEEKLY_WINDOW_MS);
        self.average_since(route, since).await
    }

    /// Every record on the route, most recent first.
    pub async fn history_by_route(&self, route: &RouteKey) -> Result<Vec<DurationRecord>> {
        let route = validated(route)?;
        self.repository.history_by_route(&route.departure_iata, &route.arrival_iata).await
    }
}

fn validated(route: &RouteKey) -> Result<RouteKey> {
    let route = RouteKey::normalized(&route.departure_iata, &route.arrival_iata);
    if route.is_blank() {
        return Err(RouteWatchError::InvalidInput(MSG_INVALID_ROUTE.to_string()));
    }
    Ok(route)
}
