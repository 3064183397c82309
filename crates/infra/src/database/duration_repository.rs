//! Flight duration history repository backed by SQLite
//!
//! Rows are append-only. Inserts are serialized by SQLite's writer lock;
//! reads run on their own pooled connections and see the last committed
//! state at statement start.

use std::sync::Arc;

use async_trait::async_trait;
use routewatch_core::DurationHistoryRepository;
use routewatch_domain::{DurationRecord, NewDurationRecord, Result as DomainResult};
use rusqlite::{params, Connection, Row};
use tokio::task;
use tracing::debug;

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

pub struct SqliteDurationHistoryRepository {
    db: Arc<DbManager>,
}

impl SqliteDurationHistoryRepository {
    /// Repository over an already migrated database.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn with_connection<T, F>(&self, op: F) -> DomainResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<T> {
            let conn = db.get_connection()?;
            op(&conn).map_err(map_sql_error)
        })
        .await
        .map_err(InfraError::from)?
    }
}

#[async_trait]
impl DurationHistoryRepository for SqliteDurationHistoryRepository {
    async fn insert(&self, record: NewDurationRecord) -> DomainResult<DurationRecord> {
        let saved = self
            .with_connection(move |conn| {
                let id = insert_record(conn, &record)?;
                Ok(record.with_id(id))
            })
            .await?;

        debug!(id = saved.id, route = %saved.route(), "duration record inserted");
        Ok(saved)
    }

    async fn average_since(
        &self,
        departure_iata: &str,
        arrival_iata: &str,
        since: i64,
    ) -> DomainResult<Option<f64>> {
        let departure_iata = departure_iata.to_string();
        let arrival_iata = arrival_iata.to_string();

        self.with_connection(move |conn| {
            conn.query_row(
                "SELECT AVG(duration_minutes) FROM flight_records
                 WHERE departure_iata = ?1 AND arrival_iata = ?2 AND recorded_at >= ?3",
                params![departure_iata, arrival_iata, since],
                |row| row.get::<_, Option<f64>>(0),
            )
        })
        .await
    }

    async fn history_by_route(
        &self,
        departure_iata: &str,
        arrival_iata: &str,
    ) -> DomainResult<Vec<DurationRecord>> {
        let departure_iata = departure_iata.to_string();
        let arrival_iata = arrival_iata.to_string();

        self.with_connection(move |conn| query_route_history(conn, &departure_iata, &arrival_iata))
            .await
    }
}

fn insert_record(conn: &Connection, record: &NewDurationRecord) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO flight_records (
            flight_code, departure_iata, arrival_iata, duration_minutes, recorded_at
         ) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            record.flight_code,
            record.departure_iata,
            record.arrival_iata,
            record.duration_minutes,
            record.recorded_at,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

fn query_route_history(
    conn: &Connection,
    departure_iata: &str,
    arrival_iata: &str,
) -> rusqlite::Result<Vec<DurationRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, flight_code, departure_iata, arrival_iata, duration_minutes, recorded_at
         FROM flight_records
         WHERE departure_iata = ?1 AND arrival_iata = ?2
         ORDER BY recorded_at DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![departure_iata, arrival_iata], map_record_row)?;
    rows.collect()
}

fn map_record_row(row: &Row<'_>) -> rusqlite::Result<DurationRecord> {
    Ok(DurationRecord {
        id: row.get(0)?,
        flight_code: row.get(1)?,
        departure_iata: row.get(2)?,
        arrival_iata: row.get(3)?,
        duration_minutes: row.get(4)?,
        recorded_at: row.get(5)?,
    })
}
