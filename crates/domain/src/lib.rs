//! # RouteWatch Domain
//!
//! Business domain types and models for RouteWatch.
//!
//! This crate contains:
//! - Flight snapshots as delivered by the remote flight source
//! - Persisted duration records and route keys
//! - Tracker state and route query results
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other RouteWatch crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
