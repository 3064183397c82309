use std::time::{Duration, Instant};

use routewatch_domain::{LoggingConfig, Result, RouteWatchError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a subscriber is
/// already installed or the filter directive does not parse.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|err| {
            RouteWatchError::Config(format!("invalid log level '{}': {err}", config.level))
        })?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json { builder.json().try_init() } else { builder.compact().try_init() };

    installed.map_err(|err| {
        RouteWatchError::Internal(format!("failed to install tracing subscriber: {err}"))
    })
}

/// Log the outcome of a command execution with structured fields.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(
    command: &str,
    elapsed: Duration,
    success: bool,
    error_type: Option<&str>,
) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, error_type, "command_execution_failure");
    }
}

/// Log a command's `result` measured from `start`.
pub fn log_command_result<T>(command: &str, start: Instant, result: &Result<T>) {
    let error_type = result.as_ref().err().map(RouteWatchError::label);
    log_command_execution(command, start.elapsed(), result.is_ok(), error_type);
}
