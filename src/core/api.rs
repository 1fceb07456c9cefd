//! HTTP client for the trip planning service.
//!
//! The service exposes two operations, always used in sequence: create a
//! trip resource from the form details, then generate the route and the
//! HOS duty logs for it. Calls are blocking and are run off the UI
//! thread by the application.

use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

use super::trip::{DutyInterval, TripDetails, TripResponse};

/// Default base URL of the trip service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Request timeout for each call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the trip service boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service could not be reached
    #[error("Could not reach the trip service: {0}")]
    Transport(String),

    /// The service rejected the request
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Message extracted from the service's error body
        message: String,
    },

    /// The response body was not a valid trip payload
    #[error("Invalid response from the trip service: {0}")]
    InvalidResponse(String),

    /// A generated duty log violates the per-day interval contract
    #[error("Invalid duty log on {date}: end {end} precedes start {start}")]
    InvalidInterval {
        date: chrono::NaiveDate,
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    },
}

/// Blocking client for the trip service.
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Create a trip resource from the form details.
    pub fn create_trip(&self, details: &TripDetails) -> Result<TripResponse, ApiError> {
        self.post(&self.endpoint("trips/create/"), Some(details))
    }

    /// Generate the route and duty logs for an existing trip.
    pub fn generate_logs(&self, trip_id: u64) -> Result<TripResponse, ApiError> {
        self.post::<TripDetails>(
            &self.endpoint(&format!("trips/{}/generate-logs/", trip_id)),
            None,
        )
    }

    /// Run the full planning flow: create the trip, then generate its
    /// logs. The two calls are strictly sequential; the caller only ever
    /// sees the combined, validated result.
    pub fn plan_trip(&self, details: &TripDetails) -> Result<TripResponse, ApiError> {
        let details = details.clone().clamped();
        let trip = self.create_trip(&details)?;
        info!("created trip {}", trip.id);
        let response = self.generate_logs(trip.id)?;
        validate_logs(&response.logs)?;
        info!(
            "generated {} duty logs for trip {}",
            response.logs.len(),
            response.id
        );
        Ok(response)
    }

    fn post<B: serde::Serialize>(
        &self,
        url: &str,
        body: Option<&B>,
    ) -> Result<TripResponse, ApiError> {
        let request = self
            .agent
            .post(url)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                let message = extract_service_message(&body)
                    .unwrap_or_else(|| format!("The trip service returned status {}", status));
                warn!("trip service rejected {}: {} ({})", url, status, message);
                return Err(ApiError::Rejected { status, message });
            }
            Err(ureq::Error::Transport(transport)) => {
                warn!("trip service unreachable at {}: {}", url, transport);
                return Err(ApiError::Transport(transport.to_string()));
            }
        };

        let body = response
            .into_string()
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

/// Pull a human-readable message out of a service error body.
///
/// The service reports failures as JSON with a `message` or `detail`
/// field, in that order of preference.
fn extract_service_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["message", "detail"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }
    None
}

/// Check every generated log against the per-day interval contract.
///
/// The rendering core trusts its input, so end-before-start logs are
/// rejected here at the boundary instead.
pub fn validate_logs(logs: &[DutyInterval]) -> Result<(), ApiError> {
    for log in logs {
        if log.end_time < log.start_time {
            return Err(ApiError::InvalidInterval {
                date: log.date,
                start: log.start_time,
                end: log.end_time,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::trip::DutyStatus;
    use chrono::NaiveTime;

    fn log(start: (u32, u32), end: (u32, u32)) -> DutyInterval {
        DutyInterval {
            id: 1,
            trip: 1,
            date: "2025-11-02".parse().unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            status: DutyStatus::Driving,
            location: String::new(),
            remarks: None,
        }
    }

    #[test]
    fn test_endpoint_joining() {
        let client = ApiClient::new("http://localhost:8000/api/");
        assert_eq!(
            client.endpoint("trips/create/"),
            "http://localhost:8000/api/trips/create/"
        );
        assert_eq!(
            client.endpoint("/trips/7/generate-logs/"),
            "http://localhost:8000/api/trips/7/generate-logs/"
        );
    }

    #[test]
    fn test_extract_service_message() {
        assert_eq!(
            extract_service_message(r#"{"message": "No route found"}"#),
            Some("No route found".to_string())
        );
        assert_eq!(
            extract_service_message(r#"{"detail": "Not found."}"#),
            Some("Not found.".to_string())
        );
        // message wins over detail
        assert_eq!(
            extract_service_message(r#"{"detail": "d", "message": "m"}"#),
            Some("m".to_string())
        );
        assert_eq!(extract_service_message("<html>502</html>"), None);
        assert_eq!(extract_service_message(r#"{"message": 42}"#), None);
    }

    #[test]
    fn test_validate_logs_accepts_ordered_intervals() {
        let logs = vec![log((0, 0), (6, 0)), log((6, 0), (6, 0))];
        assert!(validate_logs(&logs).is_ok());
    }

    #[test]
    fn test_validate_logs_rejects_end_before_start() {
        let logs = vec![log((0, 0), (6, 0)), log((14, 0), (9, 30))];
        let err = validate_logs(&logs).unwrap_err();
        match err {
            ApiError::InvalidInterval { start, end, .. } => {
                assert_eq!(start, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
                assert_eq!(end, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
            }
            other => panic!("expected InvalidInterval, got {:?}", other),
        }
    }

    #[test]
    fn test_trip_response_deserialization() {
        let json = r#"{
            "id": 12,
            "trip": {
                "id": 12,
                "current_location": "Chicago, IL",
                "pickup_location": "Milwaukee, WI",
                "dropoff_location": "Green Bay, WI",
                "current_cycle_used": 12.5,
                "created_at": "2025-11-02T08:00:00Z",
                "updated_at": "2025-11-02T08:00:05Z"
            },
            "route": {
                "from": {"name": "Chicago, IL", "coordinates": [-87.62, 41.88]},
                "pickup": {"name": "Milwaukee, WI", "coordinates": [-87.91, 43.04]},
                "dropoff": {"name": "Green Bay, WI", "coordinates": [-88.02, 44.51]},
                "distance_miles": 208.4,
                "duration_hours": 3.9,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-87.62, 41.88], [-87.91, 43.04], [-88.02, 44.51]]
                },
                "fuel_stops": [
                    {"coordinates": [-87.9, 42.4], "distance_miles": 104.0, "estimated_hours": 2.0}
                ]
            },
            "logs": [
                {
                    "id": 1, "trip": 12, "date": "2025-11-02",
                    "start_time": "00:00:00", "end_time": "06:00:00",
                    "status": "OFF_DUTY", "location": "Chicago, IL"
                }
            ]
        }"#;
        let response: TripResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, 12);
        assert_eq!(response.route.fuel_stops.len(), 1);
        assert_eq!(response.route.geometry.kind, "LineString");
        assert_eq!(response.logs[0].status, DutyStatus::OffDuty);
        assert!(validate_logs(&response.logs).is_ok());
    }
}
