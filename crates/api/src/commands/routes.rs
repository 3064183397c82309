//! On-demand route query commands

use std::time::Instant;

use routewatch_domain::{Result, RouteSummary};
use tracing::info;

use crate::utils::logging::log_command_result;
use crate::AppContext;

/// Fetch current flights for a route and average their durations.
///
/// Nothing is persisted. An empty summary is a value, not an error; see
/// [`RouteSummary::empty_reason`].
pub async fn query_route(
    ctx: &AppContext,
    departure_iata: &str,
    arrival_iata: &str,
) -> Result<RouteSummary> {
    let command_name = "routes::query_route";
    let start = Instant::now();

    info!(command = command_name, departure_iata, arrival_iata, "Querying route");
    let result = ctx.route_query.query(departure_iata, arrival_iata).await;

    log_command_result(command_name, start, &result);
    result
}
