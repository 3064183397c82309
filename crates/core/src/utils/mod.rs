//! Small helpers shared by the core services

pub mod clock;
pub mod stats;
