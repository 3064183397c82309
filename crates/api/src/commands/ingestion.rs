//! Manual ingestion trigger

use std::time::Instant;

use routewatch_domain::{IngestionReport, Result};
use tracing::info;

use crate::utils::logging::log_command_result;
use crate::AppContext;

/// Run one ingestion pass now.
///
/// Waits for a scheduled run in progress instead of overlapping it. Works
/// whether or not background jobs were started.
pub async fn run_ingestion_now(ctx: &AppContext) -> Result<IngestionReport> {
    let command_name = "ingestion::run_ingestion_now";
    let start = Instant::now();

    let result = {
        let scheduler = ctx.ingestion_scheduler.read().await;
        scheduler.run_now().await
    };

    if let Ok(report) = &result {
        info!(
            command = command_name,
            fetched = report.fetched,
            persisted = report.persisted,
            skipped = report.skipped,
            "Manual ingestion finished"
        );
    }

    log_command_result(command_name, start, &result);
    result
}
