//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use routewatch_core::{
    DurationHistoryRepository, FlightSource, FlightTracker, HistoryService, IngestionService,
    RouteQueryService,
};
use routewatch_domain::{Config, Result, RouteWatchError};
use routewatch_infra::scheduling::{IngestionJob, IngestionSchedulerConfig, NetworkGate};
use routewatch_infra::{
    AviationStackClient, DbManager, IngestionScheduler, SqliteDurationHistoryRepository,
    TcpReachability,
};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// How long shutdown waits for an in-flight tracker poll.
const TRACKER_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Connect timeout for the flight API reachability check.
const NETWORK_CHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub history_repository: Arc<dyn DurationHistoryRepository>,
    pub flight_source: Arc<dyn FlightSource>,

    // Use cases
    pub tracker: Arc<FlightTracker>,
    pub route_query: Arc<RouteQueryService>,
    pub history: Arc<HistoryService>,
    pub ingestion: Arc<IngestionService>,

    /// Write-locked for start/stop, read-locked for manual runs.
    pub ingestion_scheduler: RwLock<IngestionScheduler>,
}

impl AppContext {
    /// Open the history store, run migrations and wire every service.
    ///
    /// Background jobs are not started here; see
    /// [`AppContext::start_background_jobs`].
    #[instrument(skip_all, fields(db_path = %config.database.path))]
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let history_repository: Arc<dyn DurationHistoryRepository> =
            Arc::new(SqliteDurationHistoryRepository::new(Arc::clone(&db)));
        let flight_source: Arc<dyn FlightSource> =
            Arc::new(AviationStackClient::new(&config.flight_api)?);

        Self::with_components(config, db, history_repository, flight_source)
    }

    /// Wire the services around an already opened store and flight source.
    pub fn with_components(
        config: Config,
        db: Arc<DbManager>,
        history_repository: Arc<dyn DurationHistoryRepository>,
        flight_source: Arc<dyn FlightSource>,
    ) -> Result<Self> {
        let tracker = Arc::new(FlightTracker::new(
            Arc::clone(&flight_source),
            Duration::from_secs(config.tracking.poll_interval_seconds),
        ));
        let route_query = Arc::new(RouteQueryService::new(
            Arc::clone(&flight_source),
            config.route_query.fetch_limit,
        ));
        let history = Arc::new(HistoryService::new(Arc::clone(&history_repository)));
        let ingestion = Arc::new(IngestionService::from_config(
            Arc::clone(&flight_source),
            Arc::clone(&history_repository),
            &config.ingestion,
        ));

        let scheduler = create_ingestion_scheduler(&config, Arc::clone(&ingestion))?;

        info!(
            route = %ingestion.route(),
            poll_interval_secs = config.tracking.poll_interval_seconds,
            "Application context initialized"
        );

        Ok(Self {
            config,
            db,
            history_repository,
            flight_source,
            tracker,
            route_query,
            history,
            ingestion,
            ingestion_scheduler: RwLock::new(scheduler),
        })
    }

    /// Start the periodic ingestion scheduler unless ingestion is disabled.
    ///
    /// Calling this while the scheduler already runs is a no-op.
    pub async fn start_background_jobs(&self) -> Result<()> {
        if !self.config.ingestion.enabled {
            info!("Periodic ingestion disabled; scheduler not started");
            return Ok(());
        }

        let mut scheduler = self.ingestion_scheduler.write().await;
        if scheduler.is_running() {
            return Ok(());
        }

        scheduler.start().await.map_err(|err| {
            tracing::error!(error = %err, "failed to start ingestion scheduler");
            RouteWatchError::from(err)
        })
    }

    /// Stop the tracker, then the ingestion scheduler.
    ///
    /// A tracker poll in flight gets a short grace period before its task is
    /// aborted.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<()> {
        if !self.tracker.stop_and_wait(TRACKER_SHUTDOWN_TIMEOUT).await {
            warn!("Tracker loop did not exit cleanly during shutdown");
        }

        let mut scheduler = self.ingestion_scheduler.write().await;
        if scheduler.is_running() {
            scheduler.stop().await.map_err(RouteWatchError::from)?;
        }

        info!("Application context shut down");
        Ok(())
    }

    /// Check health of all application components
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new().add_component(self.check_database_health().await);

        let tracker_state = self.tracker.state();
        status = status.add_component(match (&tracker_state.flight_code, tracker_state.running) {
            (Some(code), true) => ComponentHealth::healthy_with("tracker", format!("tracking {code}")),
            _ => ComponentHealth::healthy_with("tracker", "idle"),
        });

        status = status.add_component(self.check_scheduler_health().await);
        status.calculate_score();
        status
    }

    /// Runs the store health query on the blocking pool.
    async fn check_database_health(&self) -> ComponentHealth {
        let db = Arc::clone(&self.db);
        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("database"),
            Ok(Err(e)) => {
                warn!(error = %e, "database health check failed");
                ComponentHealth::unhealthy("database", format!("query failed: {e}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "database health check task panicked");
                ComponentHealth::unhealthy("database", format!("task panic: {e}"))
            }
        }
    }

    async fn check_scheduler_health(&self) -> ComponentHealth {
        if !self.config.ingestion.enabled {
            return ComponentHealth::healthy_with("ingestion_scheduler", "disabled");
        }

        let scheduler = self.ingestion_scheduler.read().await;
        let stats = scheduler.stats();
        if scheduler.is_running() {
            ComponentHealth::healthy_with(
                "ingestion_scheduler",
                format!(
                    "succeeded={} failed={} skipped={}",
                    stats.succeeded, stats.failed, stats.skipped
                ),
            )
        } else {
            ComponentHealth::unhealthy("ingestion_scheduler", "not running")
        }
    }
}

fn create_ingestion_scheduler(
    config: &Config,
    ingestion: Arc<IngestionService>,
) -> Result<IngestionScheduler> {
    let scheduler_config = IngestionSchedulerConfig::from_ingestion(&config.ingestion);
    let job: Arc<dyn IngestionJob> = ingestion;

    if config.ingestion.require_network {
        let gate: Arc<dyn NetworkGate> = Arc::new(TcpReachability::for_url(
            &config.flight_api.base_url,
            NETWORK_CHECK_TIMEOUT,
        )?);
        Ok(IngestionScheduler::with_gate(scheduler_config, job, gate))
    } else {
        Ok(IngestionScheduler::new(scheduler_config, job))
    }
}
