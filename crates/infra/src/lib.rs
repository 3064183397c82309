//! # RouteWatch Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite history store (r2d2 pool, schema, repository)
//! - HTTP client and the remote flight source adapter
//! - Background ingestion scheduling
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `routewatch-core`
//! - Contains all "impure" code (I/O, network, timers)

pub mod config;
pub mod database;
pub mod errors;
pub mod flights;
pub mod http;
pub mod scheduling;

pub use database::{DbManager, SqliteDurationHistoryRepository};
pub use errors::InfraError;
pub use flights::AviationStackClient;
pub use http::HttpClient;
pub use scheduling::{
    IngestionJob, IngestionScheduler, IngestionSchedulerConfig, NetworkGate, SchedulerError,
    TcpReachability,
};
