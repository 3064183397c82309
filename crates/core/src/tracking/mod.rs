//! Real-time single-flight tracking

pub mod tracker;

pub use tracker::FlightTracker;
