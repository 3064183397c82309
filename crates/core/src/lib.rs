//! # RouteWatch Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for the remote flight source and the history store
//! - The duration normalizer
//! - Use cases: periodic ingestion, real-time tracking, route queries and
//!   history reads
//!
//! ## Architecture Principles
//! - Only depends on `routewatch-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod flights;
pub mod history;
pub mod routes;
pub mod tracking;
pub mod utils;

pub use flights::ports::FlightSource;
pub use history::normalizer::{normalize_duration, NormalizeError};
pub use history::ports::DurationHistoryRepository;
pub use history::{HistoryService, IngestionService};
pub use routes::RouteQueryService;
pub use tracking::FlightTracker;
