//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use routewatch_domain::RouteWatchError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RouteWatchError);

impl From<InfraError> for RouteWatchError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RouteWatchError> for InfraError {
    fn from(value: RouteWatchError) -> Self {
        InfraError(value)
    }
}

trait IntoRouteWatchError {
    fn into_routewatch(self) -> RouteWatchError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → RouteWatchError */
/* -------------------------------------------------------------------------- */

impl IntoRouteWatchError for SqlError {
    fn into_routewatch(self) -> RouteWatchError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => RouteWatchError::Database("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        RouteWatchError::Database("database is locked".into())
                    }
                    ErrorCode::DiskFull => RouteWatchError::Database("database disk is full".into()),
                    ErrorCode::ReadOnly => {
                        RouteWatchError::Database("database is read-only".into())
                    }
                    ErrorCode::CannotOpen => {
                        RouteWatchError::Database(format!("unable to open database file: {message}"))
                    }
                    ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt => {
                        RouteWatchError::Database(format!("database file is unusable: {message}"))
                    }
                    _ => RouteWatchError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                RouteWatchError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                RouteWatchError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                RouteWatchError::Database(format!("invalid column type for '{name}': {ty}"))
            }
            RE::InvalidPath(path) => RouteWatchError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => RouteWatchError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_routewatch())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → RouteWatchError */
/* -------------------------------------------------------------------------- */

impl IntoRouteWatchError for r2d2::Error {
    fn into_routewatch(self) -> RouteWatchError {
        RouteWatchError::Database(format!("connection pool unavailable: {self}"))
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(value.into_routewatch())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RouteWatchError */
/* -------------------------------------------------------------------------- */

impl IntoRouteWatchError for HttpError {
    fn into_routewatch(self) -> RouteWatchError {
        if self.is_timeout() {
            return RouteWatchError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return RouteWatchError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return RouteWatchError::Network(format!("malformed HTTP response body: {self}"));
        }

        if self.is_builder() {
            return RouteWatchError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            return RouteWatchError::Network(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        RouteWatchError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_routewatch())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio::task::JoinError → RouteWatchError */
/* -------------------------------------------------------------------------- */

impl From<tokio::task::JoinError> for InfraError {
    fn from(value: tokio::task::JoinError) -> Self {
        InfraError(RouteWatchError::Internal(format!("blocking task failed: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
