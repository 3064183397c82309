//! Shared test helpers for `routewatch-core` integration tests.
//!
//! Scripted flight sources, an in-memory history store and snapshot
//! fixtures so each test can focus on behaviour instead of boilerplate.
#![allow(dead_code)]

pub mod repositories;
pub mod sources;

use std::sync::Arc;

use routewatch_core::utils::clock::Clock;
use routewatch_domain::{AirlineInfo, AirportInfo, FlightIdentity, FlightSnapshot};

/// Snapshot with scheduled departure/arrival times and airport codes.
pub fn snapshot(
    flight_code: &str,
    departure_iata: &str,
    arrival_iata: &str,
    departure_time: &str,
    arrival_time: &str,
) -> FlightSnapshot {
    FlightSnapshot {
        flight: FlightIdentity { iata: Some(flight_code.to_string()), ..FlightIdentity::default() },
        status: Some("active".to_string()),
        departure: Some(AirportInfo {
            airport: Some(format!("{departure_iata} International")),
            iata: Some(departure_iata.to_string()),
            scheduled: Some(departure_time.to_string()),
            ..AirportInfo::default()
        }),
        arrival: Some(AirportInfo {
            airport: Some(format!("{arrival_iata} International")),
            iata: Some(arrival_iata.to_string()),
            scheduled: Some(arrival_time.to_string()),
            ..AirportInfo::default()
        }),
        airline: Some(AirlineInfo { name: Some("Test Air".to_string()), ..AirlineInfo::default() }),
        aircraft: None,
        live: None,
    }
}

/// LAX -> JFK snapshot lasting `minutes` from 2024-01-01T08:00:00.
pub fn lax_jfk(flight_code: &str, minutes: i64) -> FlightSnapshot {
    let departure = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|day| day.and_hms_opt(8, 0, 0))
        .unwrap();
    let arrival = departure + chrono::Duration::minutes(minutes);

    snapshot(
        flight_code,
        "LAX",
        "JFK",
        &departure.format("%Y-%m-%dT%H:%M:%S").to_string(),
        &arrival.format("%Y-%m-%dT%H:%M:%S").to_string(),
    )
}

/// Snapshot whose departure time cannot be parsed.
pub fn garbled(flight_code: &str) -> FlightSnapshot {
    snapshot(flight_code, "LAX", "JFK", "yesterday morning", "2024-01-01T12:00:00")
}

/// Clock pinned to `now`.
pub fn fixed_clock(now: i64) -> Clock {
    Arc::new(move || now)
}
