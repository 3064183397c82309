//! Scheduling infrastructure for background ingestion
//!
//! - Recurring ingestion on a fixed interval plus an optional start-up run
//! - Network gate so runs are skipped while the flight API is unreachable
//! - Explicit lifecycle management (start/stop) with tracked join handles

pub mod error;
pub mod ingestion_scheduler;
pub mod network;

pub use error::{SchedulerError, SchedulerResult};
pub use ingestion_scheduler::{
    IngestionJob, IngestionScheduler, IngestionSchedulerConfig, SchedulerStats,
};
pub use network::{AlwaysAvailable, NetworkGate, TcpReachability};
