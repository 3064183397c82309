//! RouteWatch - flight route history service
//!
//! Usage: `routewatch [FLIGHT_CODE]`. With a flight code the tracker polls
//! that flight and logs every update until Ctrl+C.

use std::sync::Arc;

use anyhow::Context;
use routewatch_domain::TrackerState;
use routewatch_lib::utils::logging::init_tracing;
use routewatch_lib::{start_tracking, AppContext};
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = routewatch_infra::config::load().context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialize logging")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env file loaded"),
    }

    let ctx = Arc::new(AppContext::new(config).context("failed to initialize application")?);
    ctx.start_background_jobs().await.context("failed to start background jobs")?;

    if let Some(flight_code) = std::env::args().nth(1) {
        start_tracking(&ctx, &flight_code).context("failed to start tracking")?;
        tokio::spawn(log_tracker_updates(ctx.tracker.subscribe()));
    }

    info!("RouteWatch running; press Ctrl+C to stop");
    tokio::signal::ctrl_c().await.context("failed to listen for shutdown signal")?;

    info!("Shutdown requested");
    ctx.shutdown().await.context("shutdown failed")?;
    Ok(())
}

async fn log_tracker_updates(mut updates: watch::Receiver<TrackerState>) {
    while updates.changed().await.is_ok() {
        let state = updates.borrow_and_update().clone();

        if let Some(error) = &state.last_error {
            warn!(polls = state.poll_count, error = %error, "Tracker update");
        } else if let Some(snapshot) = &state.last_snapshot {
            info!(
                polls = state.poll_count,
                status = snapshot.status.as_deref().unwrap_or("unknown"),
                "Tracker update"
            );
        }
    }
}
