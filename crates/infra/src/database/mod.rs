//! SQLite-backed history store

pub mod duration_repository;
pub mod manager;
pub mod pool;

pub use duration_repository::SqliteDurationHistoryRepository;
pub use manager::DbManager;
pub use pool::{SqliteConnection, SqlitePool, SqlitePoolConfig};
