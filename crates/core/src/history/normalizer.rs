//! Duration normalizer
//!
//! Turns a snapshot's departure/arrival timestamps into whole minutes. Pure
//! and side-effect free; callable concurrently without coordination.
//!
//! Each side prefers `actual` and falls back to `scheduled`. Timestamps use
//! the fixed `YYYY-MM-DDTHH:MM:SS` layout on a naive clock; anything after
//! the seconds field (offsets, fractions) is ignored.

use chrono::NaiveDateTime;
use routewatch_domain::constants::TIMESTAMP_FORMAT;
use routewatch_domain::{AirportInfo, FlightSnapshot};
use thiserror::Error;

/// Which end of the flight a timestamp belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightSide {
    Departure,
    Arrival,
}

impl std::fmt::Display for FlightSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Departure => write!(f, "departure"),
            Self::Arrival => write!(f, "arrival"),
        }
    }
}

/// Why a snapshot's duration is not computable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("{side} timestamp missing")]
    MissingTimestamp { side: FlightSide },

    #[error("{side} timestamp '{value}' is not in YYYY-MM-DDTHH:MM:SS form")]
    Unparseable { side: FlightSide, value: String },
}

/// Pick the timestamp for one side: `actual` when present, else `scheduled`.
pub fn select_timestamp(info: Option<&AirportInfo>) -> Option<&str> {
    info.and_then(|info| info.actual.as_deref().or(info.scheduled.as_deref()))
}

/// Parse the fixed-format prefix of a source timestamp.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_and_remainder(value, TIMESTAMP_FORMAT).ok().map(|(parsed, _rest)| parsed)
}

/// Arrival minus departure in whole minutes, truncated toward zero.
///
/// Zero and negative durations are valid results; no plausibility check is
/// applied.
pub fn normalize_duration(
    departure: Option<&AirportInfo>,
    arrival: Option<&AirportInfo>,
) -> Result<i64, NormalizeError> {
    let departed_at = resolve(departure, FlightSide::Departure)?;
    let arrived_at = resolve(arrival, FlightSide::Arrival)?;

    Ok((arrived_at - departed_at).num_minutes())
}

/// [`normalize_duration`] applied to a whole snapshot.
pub fn normalize_snapshot(snapshot: &FlightSnapshot) -> Result<i64, NormalizeError> {
    normalize_duration(snapshot.departure.as_ref(), snapshot.arrival.as_ref())
}

fn resolve(info: Option<&AirportInfo>, side: FlightSide) -> Result<NaiveDateTime, NormalizeError> {
    let raw = select_timestamp(info).ok_or(NormalizeError::MissingTimestamp { side })?;
    parse_timestamp(raw).ok_or_else(|| NormalizeError::Unparseable { side, value: raw.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side(scheduled: Option<&str>, actual: Option<&str>) -> AirportInfo {
        AirportInfo {
            scheduled: scheduled.map(str::to_string),
            actual: actual.map(str::to_string),
            ..AirportInfo::default()
        }
    }

    #[test]
    fn computes_minutes_between_scheduled_times() {
        let dep = side(Some("2024-01-01T10:00:00"), None);
        let arr = side(Some("2024-01-01T12:30:00"), None);

        assert_eq!(normalize_duration(Some(&dep), Some(&arr)), Ok(150));
    }

    #[test]
    fn prefers_actual_over_scheduled_per_side() {
        let dep = side(Some("2024-01-01T10:00:00"), Some("2024-01-01T10:20:00"));
        let arr = side(Some("2024-01-01T12:30:00"), None);

        assert_eq!(normalize_duration(Some(&dep), Some(&arr)), Ok(130));
    }

    #[test]
    fn truncates_partial_minutes_toward_zero() {
        let dep = side(Some("2024-01-01T10:00:00"), None);
        let forward = side(Some("2024-01-01T10:01:59"), None);
        let backward = side(Some("2024-01-01T09:58:01"), None);

        assert_eq!(normalize_duration(Some(&dep), Some(&forward)), Ok(1));
        assert_eq!(normalize_duration(Some(&dep), Some(&backward)), Ok(-1));
    }

    #[test]
    fn keeps_zero_negative_and_multi_day_durations() {
        let dep = side(Some("2024-01-02T10:00:00"), None);

        let same = side(Some("2024-01-02T10:00:00"), None);
        let earlier = side(Some("2024-01-02T08:00:00"), None);
        let days_later = side(Some("2024-01-05T10:00:00"), None);

        assert_eq!(normalize_duration(Some(&dep), Some(&same)), Ok(0));
        assert_eq!(normalize_duration(Some(&dep), Some(&earlier)), Ok(-120));
        assert_eq!(normalize_duration(Some(&dep), Some(&days_later)), Ok(4320));
    }

    #[test]
    fn ignores_offset_suffix_after_seconds() {
        let dep = side(Some("2024-01-01T10:00:00+00:00"), None);
        let arr = side(Some("2024-01-01T12:30:00+05:00"), None);

        assert_eq!(normalize_duration(Some(&dep), Some(&arr)), Ok(150));
    }

    #[test]
    fn missing_side_is_not_computable() {
        let dep = side(Some("2024-01-01T10:00:00"), None);

        assert_eq!(
            normalize_duration(Some(&dep), None),
            Err(NormalizeError::MissingTimestamp { side: FlightSide::Arrival })
        );
        assert_eq!(
            normalize_duration(Some(&side(None, None)), Some(&dep)),
            Err(NormalizeError::MissingTimestamp { side: FlightSide::Departure })
        );
    }

    #[test]
    fn unparseable_timestamps_are_not_computable() {
        let dep = side(Some("01/01/2024 10:00"), None);
        let arr = side(Some("2024-01-01T12:30:00"), None);

        let err = normalize_duration(Some(&dep), Some(&arr)).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::Unparseable {
                side: FlightSide::Departure,
                value: "01/01/2024 10:00".to_string()
            }
        );

        let dep = side(Some("2024-01-01T10:00:00"), None);
        let arr = side(None, Some(""));
        assert!(matches!(
            normalize_duration(Some(&dep), Some(&arr)),
            Err(NormalizeError::Unparseable { side: FlightSide::Arrival, .. })
        ));
    }

    #[test]
    fn normalize_snapshot_reads_both_sides() {
        let snapshot = FlightSnapshot {
            departure: Some(side(Some("2024-03-10T23:30:00"), None)),
            arrival: Some(side(None, Some("2024-03-11T01:15:00"))),
            ..FlightSnapshot::default()
        };

        assert_eq!(normalize_snapshot(&snapshot), Ok(105));
    }
}
