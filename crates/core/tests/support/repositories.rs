//! In-memory `DurationHistoryRepository` mirroring the SQLite semantics.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use routewatch_core::DurationHistoryRepository;
use routewatch_domain::{DurationRecord, NewDurationRecord, Result, RouteWatchError};

#[derive(Default)]
pub struct InMemoryHistoryRepository {
    records: Mutex<Vec<DurationRecord>>,
    /// Inserts allowed before every further insert fails.
    fail_after: Option<usize>,
    inserts: AtomicUsize,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(inserts: usize) -> Self {
        Self { fail_after: Some(inserts), ..Self::default() }
    }

    pub fn seeded(records: Vec<NewDurationRecord>) -> Self {
        let repo = Self::default();
        {
            let mut stored = repo.records.lock();
            for record in records {
                let id = stored.len() as i64 + 1;
                stored.push(record.with_id(id));
            }
        }
        repo
    }

    pub fn records(&self) -> Vec<DurationRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }
}

#[async_trait]
impl DurationHistoryRepository for InMemoryHistoryRepository {
    async fn insert(&self, record: NewDurationRecord) -> Result<DurationRecord> {
        let attempt = self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| attempt >= limit) {
            return Err(RouteWatchError::Database("disk I/O error".to_string()));
        }

        let mut records = self.records.lock();
        let saved = record.with_id(records.len() as i64 + 1);
        records.push(saved.clone());
        Ok(saved)
    }

    async fn average_since(
        &self,
        departure_iata: &str,
        arrival_iata: &str,
        since: i64,
    ) -> Result<Option<f64>> {
        let records = self.records.lock();
        let durations: Vec<i64> = records
            .iter()
            .filter(|r| {
                r.departure_iata == departure_iata
                    && r.arrival_iata == arrival_iata
                    && r.recorded_at >= since
            })
            .map(|r| r.duration_minutes)
            .collect();

        if durations.is_empty() {
            return Ok(None);
        }
        Ok(Some(durations.iter().sum::<i64>() as f64 / durations.len() as f64))
    }

    async fn history_by_route(
        &self,
        departure_iata: &str,
        arrival_iata: &str,
    ) -> Result<Vec<DurationRecord>> {
        let mut matching: Vec<DurationRecord> = self
            .records
            .lock()
            .iter()
            .filter(|r| r.departure_iata == departure_iata && r.arrival_iata == arrival_iata)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at).then(b.id.cmp(&a.id)));
        Ok(matching)
    }
}
