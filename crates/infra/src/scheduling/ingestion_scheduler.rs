//! Periodic ingestion scheduler.
//!
//! Drives [`IngestionJob`] on a fixed interval with an optional one-shot run
//! shortly after start. Join handles are tracked, cancellation is explicit,
//! and every lifecycle step is wrapped in a timeout.
//!
//! Runs never overlap: a scheduled trigger that fires while a run is still
//! in progress is skipped, and a manual run waits for the active one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use routewatch_core::IngestionService;
use routewatch_domain::{IngestionConfig, IngestionReport, Result};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::network::{AlwaysAvailable, NetworkGate};
use crate::scheduling::error::{SchedulerError, SchedulerResult};

const MIN_INTERVAL: Duration = Duration::from_secs(60);

/// A unit of ingestion work the scheduler can trigger.
#[async_trait]
pub trait IngestionJob: Send + Sync {
    async fn run(&self) -> Result<IngestionReport>;
}

#[async_trait]
impl IngestionJob for IngestionService {
    async fn run(&self) -> Result<IngestionReport> {
        self.run_ingestion().await
    }
}

/// Configuration for the ingestion scheduler.
#[derive(Debug, Clone)]
pub struct IngestionSchedulerConfig {
    /// Time between recurring runs.
    pub interval: Duration,
    /// Delay before the one-shot start-up run; `None` disables it.
    pub initial_delay: Option<Duration>,
    /// Upper bound for a single scheduled run.
    ///
    /// A run that exceeds it is dropped at its next await point and counted
    /// as failed. Inserts are not wrapped in one transaction per run, so
    /// records persisted before the cutoff stay in the store and the rest of
    /// that batch is lost until the next run. Manual runs are not bounded.
    pub job_timeout: Duration,
    pub start_timeout: Duration,
    pub stop_timeout: Duration,
    /// Timeout for awaiting the monitor task join handle.
    pub join_timeout: Duration,
}

impl Default for IngestionSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(24 * 60 * 60),
            initial_delay: Some(Duration::from_secs(20)),
            job_timeout: Duration::from_secs(600),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
            join_timeout: Duration::from_secs(5),
        }
    }
}

impl IngestionSchedulerConfig {
    /// Derive cadence from the ingestion settings. The interval is at least
    /// one minute and a zero start-up delay disables the start-up run.
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use routewatch_domain::IngestionConfig;
    /// use routewatch_infra::scheduling::IngestionSchedulerConfig;
    ///
    /// let config = IngestionSchedulerConfig::from_ingestion(&IngestionConfig {
    ///     interval_hours: 6,
    ///     initial_delay_seconds: 0,
    ///     ..IngestionConfig::default()
    /// });
    ///
    /// assert_eq!(config.interval, Duration::from_secs(6 * 60 * 60));
    /// assert_eq!(config.initial_delay, None);
    /// ```
    pub fn from_ingestion(config: &IngestionConfig) -> Self {
        let interval = Duration::from_secs(config.interval_hours.saturating_mul(60 * 60));
        let initial_delay = (config.initial_delay_seconds > 0)
            .then(|| Duration::from_secs(config.initial_delay_seconds));

        Self { interval: interval.max(MIN_INTERVAL), initial_delay, ..Self::default() }
    }
}

/// Run counters exposed for health reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    pub succeeded: u64,
    pub failed: u64,
    pub skipped: u64,
}

struct JobRunner {
    job: Arc<dyn IngestionJob>,
    gate: Arc<dyn NetworkGate>,
    run_guard: Mutex<()>,
    job_timeout: Duration,
    succeeded: AtomicU64,
    failed: AtomicU64,
    skipped: AtomicU64,
}

impl JobRunner {
    async fn run_scheduled(&self, trigger: &'static str) {
        let Ok(_guard) = self.run_guard.try_lock() else {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            warn!(trigger, "previous ingestion run still active; skipping");
            return;
        };

        if !self.gate.is_available().await {
            self.skipped.fetch_add(1, Ordering::Relaxed);
            info!(trigger, "network unavailable; skipping ingestion run");
            return;
        }

        let started = Instant::now();
        match tokio::time::timeout(self.job_timeout, self.job.run()).await {
            Ok(Ok(report)) => {
                self.succeeded.fetch_add(1, Ordering::Relaxed);
                info!(
                    trigger,
                    fetched = report.fetched,
                    persisted = report.persisted,
                    skipped = report.skipped,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "scheduled ingestion finished"
                );
            }
            Ok(Err(err)) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                error!(trigger, error = %err, kind = err.label(), "scheduled ingestion failed");
            }
            Err(_) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                warn!(trigger, timeout_secs = self.job_timeout.as_secs(), "scheduled ingestion timed out");
            }
        }
    }

    async fn run_now(&self) -> Result<IngestionReport> {
        let _guard = self.run_guard.lock().await;
        let outcome = self.job.run().await;

        match &outcome {
            Ok(_) => self.succeeded.fetch_add(1, Ordering::Relaxed),
            Err(_) => self.failed.fetch_add(1, Ordering::Relaxed),
        };
        outcome
    }

    fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// Ingestion scheduler with explicit lifecycle management.
pub struct IngestionScheduler {
    scheduler: Option<Arc<RwLock<JobScheduler>>>,
    config: IngestionSchedulerConfig,
    monitor_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
    runner: Arc<JobRunner>,
}

impl IngestionScheduler {
    /// Create a scheduler whose runs are never gated on the network.
    pub fn new(config: IngestionSchedulerConfig, job: Arc<dyn IngestionJob>) -> Self {
        Self::with_gate(config, job, Arc::new(AlwaysAvailable))
    }

    /// Create a scheduler whose runs are skipped while `gate` is closed.
    pub fn with_gate(
        config: IngestionSchedulerConfig,
        job: Arc<dyn IngestionJob>,
        gate: Arc<dyn NetworkGate>,
    ) -> Self {
        let runner = Arc::new(JobRunner {
            job,
            gate,
            run_guard: Mutex::new(()),
            job_timeout: config.job_timeout,
            succeeded: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        });

        Self {
            scheduler: None,
            config,
            monitor_handle: None,
            cancellation: CancellationToken::new(),
            runner,
        }
    }

    /// Register the jobs, start the underlying scheduler and spawn the
    /// monitor task.
    #[instrument(skip(self), fields(interval_secs = self.config.interval.as_secs()))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        let raw_scheduler =
            JobScheduler::new().await.map_err(|source| SchedulerError::CreationFailed { source })?;
        let scheduler = Arc::new(RwLock::new(raw_scheduler));
        self.register_jobs(&scheduler).await?;

        let start_timeout = self.config.start_timeout;
        let handle = Arc::clone(&scheduler);
        tokio::time::timeout(start_timeout, async move {
            let guard = handle.read().await;
            guard.start().await
        })
        .await
        .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })?
        .map_err(|source| SchedulerError::StartFailed { source })?;

        self.cancellation = CancellationToken::new();
        let cancel = self.cancellation.clone();
        self.monitor_handle = Some(tokio::spawn(Self::monitor_task(cancel)));
        self.scheduler = Some(scheduler);

        info!("Ingestion scheduler started");
        Ok(())
    }

    /// Shut down the underlying scheduler and wait for the monitor task.
    ///
    /// A run already in progress is not interrupted.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        if let Some(scheduler) = self.scheduler.take() {
            let stop_timeout = self.config.stop_timeout;
            tokio::time::timeout(stop_timeout, async move {
                let mut guard = scheduler.write().await;
                guard.shutdown().await
            })
            .await
            .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?
            .map_err(|source| SchedulerError::StopFailed { source })?;
        }

        if let Some(handle) = self.monitor_handle.take() {
            let join_timeout = self.config.join_timeout;
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })??;
        }

        info!("Ingestion scheduler stopped");
        Ok(())
    }

    /// Run ingestion immediately, outside the schedule.
    ///
    /// Waits for any active run to finish first. The network gate is not
    /// consulted; a transport failure is returned to the caller.
    pub async fn run_now(&self) -> Result<IngestionReport> {
        self.runner.run_now().await
    }

    /// Returns true when the monitor task is active.
    pub fn is_running(&self) -> bool {
        self.monitor_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Counters for scheduled and manual runs since construction.
    pub fn stats(&self) -> SchedulerStats {
        self.runner.stats()
    }

    async fn register_jobs(&self, scheduler: &Arc<RwLock<JobScheduler>>) -> SchedulerResult<()> {
        let runner = Arc::clone(&self.runner);
        let recurring = Job::new_repeated_async(self.config.interval, move |_id, _lock| {
            let runner = Arc::clone(&runner);
            Box::pin(async move { runner.run_scheduled("interval").await })
        })
        .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        let guard = scheduler.read().await;
        let job_id = guard
            .add(recurring)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;
        debug!(%job_id, interval_secs = self.config.interval.as_secs(), "registered recurring ingestion job");

        if let Some(delay) = self.config.initial_delay {
            let runner = Arc::clone(&self.runner);
            let initial = Job::new_one_shot_async(delay, move |_id, _lock| {
                let runner = Arc::clone(&runner);
                Box::pin(async move { runner.run_scheduled("startup").await })
            })
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

            let job_id = guard
                .add(initial)
                .await
                .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;
            debug!(%job_id, delay_secs = delay.as_secs(), "registered start-up ingestion job");
        }

        Ok(())
    }

    async fn monitor_task(cancel: CancellationToken) {
        cancel.cancelled().await;
        debug!("Ingestion scheduler monitor cancelled");
    }
}

impl Drop for IngestionScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("IngestionScheduler dropped while running; cancelling tasks");
            self.cancellation.cancel();
        }
    }
}
