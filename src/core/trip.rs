//! Trip and duty-log data structures.
//!
//! This module defines the wire types exchanged with the trip service and
//! the duty-status model the log sheets are drawn from.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Driver duty status for one log interval.
///
/// Closed enumeration; the serialized tags match the service wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyStatus {
    /// Off duty (top lane of the log sheet)
    OffDuty,
    /// On duty, not driving (middle lane)
    OnDuty,
    /// Driving (bottom lane)
    Driving,
}

impl DutyStatus {
    /// All statuses in log-sheet lane order, top to bottom.
    ///
    /// The order matches the paper driver's daily log and must not change.
    pub const ALL: [DutyStatus; 3] = [DutyStatus::OffDuty, DutyStatus::OnDuty, DutyStatus::Driving];

    /// Display label, as used in the legend.
    pub fn label(self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::OnDuty => "On Duty",
            DutyStatus::Driving => "Driving",
        }
    }

    /// Uppercase label for the lane gutter of the log sheet.
    pub fn lane_label(self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "OFF DUTY",
            DutyStatus::OnDuty => "ON DUTY",
            DutyStatus::Driving => "DRIVING",
        }
    }
}

/// One continuous block of driver activity within a single calendar day.
///
/// Intervals never span midnight; the service pre-splits them per day.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DutyInterval {
    /// Log record identifier
    pub id: u64,
    /// Identifier of the trip this log belongs to
    pub trip: u64,
    /// Calendar day the interval belongs to
    pub date: NaiveDate,
    /// Time of day the interval starts
    pub start_time: NaiveTime,
    /// Time of day the interval ends (not before `start_time`)
    pub end_time: NaiveTime,
    /// Duty status during the interval
    pub status: DutyStatus,
    /// Where the activity took place (display only)
    pub location: String,
    /// Free-form notes (display only)
    #[serde(default)]
    pub remarks: Option<String>,
}

impl DutyInterval {
    /// Start of the interval in fractional hours since midnight.
    pub fn start_hour(&self) -> f32 {
        fractional_hours(self.start_time)
    }

    /// End of the interval in fractional hours since midnight.
    pub fn end_hour(&self) -> f32 {
        fractional_hours(self.end_time)
    }
}

/// Time of day as fractional hours, from hours and minutes.
///
/// Seconds are carried on the wire but do not affect sheet layout.
pub fn fractional_hours(t: NaiveTime) -> f32 {
    t.hour() as f32 + t.minute() as f32 / 60.0
}

/// Trip parameters collected from the form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Hours already used in the current 70-hour/8-day cycle
    pub current_cycle_used: f64,
}

/// Maximum hours in the 70-hour/8-day cycle.
pub const MAX_CYCLE_HOURS: f64 = 70.0;

impl TripDetails {
    /// Copy of the details with cycle hours clamped to the legal range.
    pub fn clamped(mut self) -> Self {
        self.current_cycle_used = self.current_cycle_used.clamp(0.0, MAX_CYCLE_HOURS);
        self
    }
}

/// Trip resource as stored by the service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trip {
    pub id: u64,
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_used: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// A named waypoint on the computed route. Coordinates are `[lon, lat]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoutePoint {
    pub name: String,
    pub coordinates: [f64; 2],
}

/// A required fuel stop along the route.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FuelStop {
    pub coordinates: [f64; 2],
    pub distance_miles: f64,
    pub estimated_hours: f64,
}

/// Route line geometry (GeoJSON-style).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<[f64; 2]>,
}

/// Computed route with distance, duration, and fuel stops.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteData {
    pub from: RoutePoint,
    pub pickup: RoutePoint,
    pub dropoff: RoutePoint,
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub geometry: RouteGeometry,
    pub fuel_stops: Vec<FuelStop>,
}

/// Complete response for a planned trip: resource, route, and duty logs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripResponse {
    pub id: u64,
    pub trip: Trip,
    pub route: RouteData,
    #[serde(default)]
    pub logs: Vec<DutyInterval>,
}

/// Partition duty logs into per-day groups, ordered by calendar date.
///
/// Each log sheet is drawn for exactly one day, in the order the logs
/// appear within that day.
pub fn group_by_date(logs: &[DutyInterval]) -> Vec<(NaiveDate, Vec<DutyInterval>)> {
    let mut days: std::collections::BTreeMap<NaiveDate, Vec<DutyInterval>> =
        std::collections::BTreeMap::new();
    for log in logs {
        days.entry(log.date).or_default().push(log.clone());
    }
    days.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn interval(date: &str, start: NaiveTime, end: NaiveTime, status: DutyStatus) -> DutyInterval {
        DutyInterval {
            id: 1,
            trip: 1,
            date: date.parse().unwrap(),
            start_time: start,
            end_time: end,
            status,
            location: "Chicago, IL".to_string(),
            remarks: None,
        }
    }

    #[test]
    fn test_status_wire_tags() {
        assert_eq!(
            serde_json::to_string(&DutyStatus::OffDuty).unwrap(),
            "\"OFF_DUTY\""
        );
        assert_eq!(
            serde_json::to_string(&DutyStatus::OnDuty).unwrap(),
            "\"ON_DUTY\""
        );
        assert_eq!(
            serde_json::to_string(&DutyStatus::Driving).unwrap(),
            "\"DRIVING\""
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result: Result<DutyStatus, _> = serde_json::from_str("\"SLEEPER_BERTH\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_fractional_hours() {
        assert_eq!(fractional_hours(time(0, 0)), 0.0);
        assert_eq!(fractional_hours(time(6, 30)), 6.5);
        assert_eq!(fractional_hours(time(23, 45)), 23.75);
        // Seconds do not contribute
        assert_eq!(
            fractional_hours(NaiveTime::from_hms_opt(12, 0, 59).unwrap()),
            12.0
        );
    }

    #[test]
    fn test_interval_deserialization() {
        let json = r#"{
            "id": 7,
            "trip": 3,
            "date": "2025-11-02",
            "start_time": "06:00:00",
            "end_time": "14:30:00",
            "status": "DRIVING",
            "location": "Milwaukee, WI",
            "remarks": "I-94 N"
        }"#;
        let log: DutyInterval = serde_json::from_str(json).unwrap();
        assert_eq!(log.status, DutyStatus::Driving);
        assert_eq!(log.start_hour(), 6.0);
        assert_eq!(log.end_hour(), 14.5);
        assert_eq!(log.remarks.as_deref(), Some("I-94 N"));
    }

    #[test]
    fn test_cycle_hours_clamped() {
        let details = TripDetails {
            current_location: "Chicago, IL".to_string(),
            pickup_location: "Milwaukee, WI".to_string(),
            dropoff_location: "Green Bay, WI".to_string(),
            current_cycle_used: 82.5,
        };
        assert_eq!(details.clone().clamped().current_cycle_used, 70.0);

        let details = TripDetails {
            current_cycle_used: -3.0,
            ..details
        };
        assert_eq!(details.clamped().current_cycle_used, 0.0);
    }

    #[test]
    fn test_group_by_date_sorted() {
        let logs = vec![
            interval("2025-11-03", time(0, 0), time(8, 0), DutyStatus::OffDuty),
            interval("2025-11-02", time(6, 0), time(14, 0), DutyStatus::Driving),
            interval("2025-11-02", time(14, 0), time(15, 0), DutyStatus::OnDuty),
        ];
        let days = group_by_date(&logs);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].0, "2025-11-02".parse().unwrap());
        assert_eq!(days[0].1.len(), 2);
        assert_eq!(days[1].0, "2025-11-03".parse().unwrap());
        assert_eq!(days[1].1.len(), 1);
        // Within a day, input order is preserved
        assert_eq!(days[0].1[0].status, DutyStatus::Driving);
        assert_eq!(days[0].1[1].status, DutyStatus::OnDuty);
    }

    #[test]
    fn test_lane_order_fixed() {
        assert_eq!(
            DutyStatus::ALL,
            [DutyStatus::OffDuty, DutyStatus::OnDuty, DutyStatus::Driving]
        );
    }
}
