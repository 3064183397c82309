//! Real-time flight tracking commands

use std::time::Instant;

use routewatch_domain::{Result, TrackerState};
use tracing::info;

use crate::utils::logging::{log_command_execution, log_command_result};
use crate::AppContext;

/// Start polling `flight_code`.
///
/// Returns `Ok(false)` without touching the running session when a flight
/// is already being tracked.
pub fn start_tracking(ctx: &AppContext, flight_code: &str) -> Result<bool> {
    let command_name = "tracking::start_tracking";
    let start = Instant::now();

    info!(command = command_name, flight = flight_code.trim(), "Starting flight tracker");
    let result = ctx.tracker.start(flight_code);

    log_command_result(command_name, start, &result);
    result
}

/// Stop polling. Idempotent; returns whether a session was running.
pub fn stop_tracking(ctx: &AppContext) -> bool {
    let command_name = "tracking::stop_tracking";
    let start = Instant::now();

    let was_running = ctx.tracker.stop();

    log_command_execution(command_name, start.elapsed(), true, None);
    was_running
}

/// Current tracker state, including the last snapshot or error.
pub fn get_tracking_state(ctx: &AppContext) -> TrackerState {
    ctx.tracker.state()
}
