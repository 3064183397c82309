//! Stored duration history commands

use std::time::Instant;

use routewatch_domain::{DurationRecord, Result, RouteKey};

use crate::utils::logging::log_command_result;
use crate::AppContext;

/// All stored records for a route, most recent first.
pub async fn get_route_history(
    ctx: &AppContext,
    departure_iata: &str,
    arrival_iata: &str,
) -> Result<Vec<DurationRecord>> {
    let command_name = "history::get_route_history";
    let start = Instant::now();

    let route = RouteKey::normalized(departure_iata, arrival_iata);
    let result = ctx.history.history_by_route(&route).await;

    log_command_result(command_name, start, &result);
    result
}

/// Mean stored duration for a route over the past seven days.
pub async fn get_weekly_average(
    ctx: &AppContext,
    departure_iata: &str,
    arrival_iata: &str,
) -> Result<Option<f64>> {
    let command_name = "history::get_weekly_average";
    let start = Instant::now();

    let route = RouteKey::normalized(departure_iata, arrival_iata);
    let result = ctx.history.weekly_average(&route).await;

    log_command_result(command_name, start, &result);
    result
}
