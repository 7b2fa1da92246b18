use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Short campsite summary embedded in a booking once a site is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampsiteSummary {
    pub name: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }
}

/// One campsite free for a queried date range. Fetched per query and
/// discarded with the dialog; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampsiteCandidate {
    pub campsite_id: String,
    pub campsite_name: String,
    pub device_status: DeviceStatus,
    #[serde(default)]
    pub current_booking: Option<CurrentBooking>,
    #[serde(default)]
    pub next_available: Option<NaiveDate>,
}

/// Occupancy note attached to a candidate that frees up later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentBooking {
    pub end_date: NaiveDate,
    pub user_name: String,
}

/// Server-reported overlapping booking that blocks a requested assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConflict {
    pub booking_id: String,
    pub campsite_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub user_name: String,
}

/// Server-reported alternative offered when the requested assignment is
/// blocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampsiteSuggestion {
    pub campsite_id: String,
    pub available_from: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_parses_with_occupancy() {
        let json = r#"{
            "campsiteId": "C2",
            "campsiteName": "Riverside 2",
            "deviceStatus": "offline",
            "currentBooking": {"endDate": "2024-06-03", "userName": "Alice"},
            "nextAvailable": "2024-06-04"
        }"#;
        let candidate: CampsiteCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.device_status, DeviceStatus::Offline);
        let current = candidate.current_booking.unwrap();
        assert_eq!(current.user_name, "Alice");
        assert_eq!(
            candidate.next_available,
            Some(NaiveDate::from_ymd_opt(2024, 6, 4).unwrap())
        );
    }

    #[test]
    fn test_candidate_parses_without_occupancy() {
        let json = r#"{"campsiteId": "C1", "campsiteName": "Meadow 1", "deviceStatus": "online"}"#;
        let candidate: CampsiteCandidate = serde_json::from_str(json).unwrap();
        assert!(candidate.current_booking.is_none());
        assert!(candidate.next_available.is_none());
    }

    #[test]
    fn test_conflict_parses_wire_shape() {
        let json = r#"{
            "bookingId": "B9",
            "campsiteId": "C1",
            "startDate": "2024-06-02",
            "endDate": "2024-06-04",
            "userName": "Jane Doe"
        }"#;
        let conflict: BookingConflict = serde_json::from_str(json).unwrap();
        assert_eq!(conflict.user_name, "Jane Doe");
        assert_eq!(
            conflict.start_date,
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
        );
    }
}
