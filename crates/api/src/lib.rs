//! # RouteWatch App
//!
//! Application layer - context wiring, commands and the binary entry point.
//!
//! This crate contains:
//! - Commands consumed by a presentation layer
//! - Application context (dependency injection)
//! - Tracing setup and the `routewatch` binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
