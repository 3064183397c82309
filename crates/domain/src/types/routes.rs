//! On-demand route query results

use serde::{Deserialize, Serialize};

use crate::constants::{MSG_NO_FLIGHT_DATA, MSG_NO_VALID_FLIGHT_DATA};
use crate::types::history::RouteKey;

/// One flight on a queried route whose duration could be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFlight {
    pub flight_code: String,
    pub airline_name: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub duration_minutes: i64,
}

/// Result of an ephemeral route query. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub route: RouteKey,
    pub flights: Vec<RouteFlight>,
    /// Mean duration over `flights`; absent when there are none.
    pub average_minutes: Option<f64>,
    /// Snapshots returned by the source after the fetch limit.
    pub fetched: usize,
    /// Snapshots dropped because their duration was not computable.
    pub skipped: usize,
}

impl RouteSummary {
    pub fn has_valid_data(&self) -> bool {
        !self.flights.is_empty()
    }

    /// User-facing explanation when no flight survived.
    ///
    /// An empty fetch and an all-unnormalizable batch are both "no valid
    /// data", but the message tells them apart.
    pub fn empty_reason(&self) -> Option<&'static str> {
        if self.has_valid_data() {
            None
        } else if self.fetched == 0 {
            Some(MSG_NO_FLIGHT_DATA)
        } else {
            Some(MSG_NO_VALID_FLIGHT_DATA)
        }
    }
}
