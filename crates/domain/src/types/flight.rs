//! Flight snapshots as delivered by the remote flight source
//!
//! Field names follow the source payload so the infra adapter can decode
//! responses straight into these types. Everything except the identity block
//! is optional because the source omits sections freely.

use serde::{Deserialize, Serialize};

/// A single point-in-time flight data response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightSnapshot {
    #[serde(default)]
    pub flight: FlightIdentity,
    #[serde(default)]
    pub live: Option<LivePosition>,
    #[serde(rename = "flight_status", default)]
    pub status: Option<String>,
    #[serde(default)]
    pub departure: Option<AirportInfo>,
    #[serde(default)]
    pub arrival: Option<AirportInfo>,
    #[serde(default)]
    pub airline: Option<AirlineInfo>,
    #[serde(default)]
    pub aircraft: Option<AircraftInfo>,
}

impl FlightSnapshot {
    /// Flight IATA code, if the source provided one.
    pub fn flight_code(&self) -> Option<&str> {
        self.flight.iata.as_deref()
    }

    pub fn airline_name(&self) -> Option<&str> {
        self.airline.as_ref().and_then(|a| a.name.as_deref())
    }

    pub fn aircraft_registration(&self) -> Option<&str> {
        self.aircraft.as_ref().and_then(|a| a.registration.as_deref())
    }

    pub fn departure_iata(&self) -> Option<&str> {
        self.departure.as_ref().and_then(|d| d.iata.as_deref())
    }

    pub fn arrival_iata(&self) -> Option<&str> {
        self.arrival.as_ref().and_then(|a| a.iata.as_deref())
    }
}

/// Flight identity codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightIdentity {
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub icao: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

/// Live position of an airborne flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LivePosition {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(rename = "direction", default)]
    pub heading: Option<f64>,
    #[serde(rename = "speed_horizontal", default)]
    pub ground_speed: Option<f64>,
    #[serde(rename = "is_ground", default)]
    pub on_ground: Option<bool>,
}

/// Departure or arrival side of a flight.
///
/// `actual` is preferred over `scheduled` whenever it is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportInfo {
    #[serde(default)]
    pub airport: Option<String>,
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub icao: Option<String>,
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default)]
    pub gate: Option<String>,
    #[serde(default)]
    pub delay: Option<i32>,
    #[serde(default)]
    pub scheduled: Option<String>,
    #[serde(default)]
    pub actual: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub icao: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftInfo {
    #[serde(default)]
    pub registration: Option<String>,
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub icao: Option<String>,
}
