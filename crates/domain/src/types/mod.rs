//! Domain types and models

pub mod flight;
pub mod history;
pub mod routes;
pub mod tracking;

pub use flight::{AircraftInfo, AirlineInfo, AirportInfo, FlightIdentity, FlightSnapshot, LivePosition};
pub use history::{DurationRecord, IngestionReport, NewDurationRecord, RouteKey};
pub use routes::{RouteFlight, RouteSummary};
pub use tracking::TrackerState;
