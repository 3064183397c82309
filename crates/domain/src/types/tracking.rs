//! Real-time tracker state

use serde::{Deserialize, Serialize};

use crate::types::flight::FlightSnapshot;

/// Observable state of one real-time tracker.
///
/// Published as a single value so readers always see the snapshot and the
/// error of the same poll together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerState {
    /// Flight bound by the most recent `start`.
    pub flight_code: Option<String>,
    pub running: bool,
    pub last_snapshot: Option<FlightSnapshot>,
    pub last_error: Option<String>,
    /// Completion time of the latest poll, Unix epoch milliseconds.
    pub last_polled_at: Option<i64>,
    /// Polls completed in the current session.
    pub poll_count: u64,
}

impl TrackerState {
    pub fn is_tracking(&self) -> bool {
        self.running
    }
}
