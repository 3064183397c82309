//! Shared helpers for `routewatch-infra` integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use routewatch_infra::database::{DbManager, SqliteDurationHistoryRepository};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub path: PathBuf,
    temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a migrated database in a fresh temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let path = temp_dir.path().join("history.db");
        let manager = open(&path);

        Self { manager, path, temp_dir }
    }

    pub fn repository(&self) -> SqliteDurationHistoryRepository {
        SqliteDurationHistoryRepository::new(Arc::clone(&self.manager))
    }

    /// Drop the pool and open the same file again, as a restarted process
    /// would.
    pub fn reopen(self) -> Self {
        let Self { manager, path, temp_dir } = self;
        drop(manager);

        Self { manager: open(&path), path, temp_dir }
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &std::path::Path) -> Arc<DbManager> {
    let manager = DbManager::new(path, 4).expect("db manager should be created");
    manager.run_migrations().expect("migrations should run");
    Arc::new(manager)
}

/// Flight payload in the remote source's JSON shape.
pub fn flight_json(code: &str, departure: &str, arrival: &str) -> Value {
    json!({
        "flight_status": "scheduled",
        "flight": { "iata": code },
        "departure": { "iata": "LAX", "airport": "Los Angeles International", "scheduled": departure },
        "arrival": { "iata": "JFK", "airport": "John F Kennedy International", "scheduled": arrival },
        "airline": { "name": "American Airlines" }
    })
}
