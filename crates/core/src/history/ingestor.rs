//! Periodic ingestion use case
//!
//! One run fetches a bounded batch of snapshots for the configured route,
//! normalizes each one and appends a duration record per computable
//! snapshot. Scheduling and retries belong to the caller.

use std::sync::Arc;

use routewatch_domain::constants::UNKNOWN_FIELD;
use routewatch_domain::{
    FlightSnapshot, IngestionConfig, IngestionReport, NewDurationRecord, Result, RouteKey,
};
use tracing::{debug, info, instrument, warn};

use super::normalizer::{normalize_snapshot, NormalizeError};
use super::ports::DurationHistoryRepository;
use crate::flights::ports::FlightSource;
use crate::utils::clock::{system_clock, Clock};

/// Fetches route snapshots and appends their durations to the history store.
pub struct IngestionService {
    source: Arc<dyn FlightSource>,
    repository: Arc<dyn DurationHistoryRepository>,
    route: RouteKey,
    fetch_limit: usize,
    clock: Clock,
}

impl IngestionService {
    /// Create a service that ingests `route`, keeping at most `fetch_limit`
    /// snapshots per run. The route is normalized on the way in.
    pub fn new(
        source: Arc<dyn FlightSource>,
        repository: Arc<dyn DurationHistoryRepository>,
        route: RouteKey,
        fetch_limit: usize,
    ) -> Self {
        Self {
            source,
            repository,
            route: RouteKey::normalized(&route.departure_iata, &route.arrival_iata),
            fetch_limit,
            clock: system_clock(),
        }
    }

    /// Build the service for the route and limit named in `config`.
    pub fn from_config(
        source: Arc<dyn FlightSource>,
        repository: Arc<dyn DurationHistoryRepository>,
        config: &IngestionConfig,
    ) -> Self {
        Self::new(
            source,
            repository,
            RouteKey::normalized(&config.departure_iata, &config.arrival_iata),
            config.fetch_limit,
        )
    }

    /// Override the clock used to stamp `recorded_at`.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Normalized route this service ingests.
    pub fn route(&self) -> &RouteKey {
        &self.route
    }

    /// Execute one ingestion run.
    ///
    /// Succeeds whenever the fetch succeeds, including empty batches and
    /// batches where every snapshot was skipped. A fetch failure or a storage
    /// failure fails the run; records inserted before a storage failure stay
    /// in place.
    #[instrument(skip(self), fields(route = %self.route, limit = self.fetch_limit))]
    pub async fn run_ingestion(&self) -> Result<IngestionReport> {
        let snapshots = self
            .source
            .fetch_by_route(&self.route.departure_iata, &self.route.arrival_iata, self.fetch_limit)
            .await
            .inspect_err(|err| warn!(error = %err, "flight source fetch failed"))?;

        let mut report = IngestionReport::default();

        for snapshot in snapshots.into_iter().take(self.fetch_limit) {
            report.fetched += 1;

            let record = match build_record(&snapshot, (self.clock)()) {
                Ok(record) => record,
                Err(reason) => {
                    report.skipped += 1;
                    warn!(
                        flight = snapshot.flight_code().unwrap_or(UNKNOWN_FIELD),
                        %reason,
                        "skipping snapshot without a computable duration"
                    );
                    continue;
                }
            };

            let saved = self.repository.insert(record).await?;
            report.persisted += 1;
            debug!(
                id = saved.id,
                flight = %saved.flight_code,
                duration_minutes = saved.duration_minutes,
                "duration record stored"
            );
        }

        if report.fetched == 0 {
            info!("no flight data returned for route");
        } else {
            info!(
                fetched = report.fetched,
                persisted = report.persisted,
                skipped = report.skipped,
                "ingestion run complete"
            );
        }

        Ok(report)
    }
}

/// Map a snapshot to a history record stamped with `recorded_at`.
///
/// Missing text fields become the `N/A` placeholder and airport codes are
/// uppercased so the store's case-sensitive matching lines up with
/// normalized queries.
pub fn build_record(
    snapshot: &FlightSnapshot,
    recorded_at: i64,
) -> std::result::Result<NewDurationRecord, NormalizeError> {
    let duration_minutes = normalize_snapshot(snapshot)?;

    Ok(NewDurationRecord {
        flight_code: snapshot.flight_code().unwrap_or(UNKNOWN_FIELD).to_string(),
        departure_iata: snapshot.departure_iata().map_or_else(
            || UNKNOWN_FIELD.to_string(),
            |code| code.trim().to_uppercase(),
        ),
        arrival_iata: snapshot
            .arrival_iata()
            .map_or_else(|| UNKNOWN_FIELD.to_string(), |code| code.trim().to_uppercase()),
        duration_minutes,
        recorded_at,
    })
}
