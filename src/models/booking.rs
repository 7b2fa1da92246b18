use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::campsite::CampsiteSummary;

/// A customer's request to occupy a campsite for a date range, as returned
/// by the admin API. `campsite_id` stays unset until an operator approves
/// the booking and assigns a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub requested_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub status: BookingStatus,
    #[serde(default)]
    pub campsite_id: Option<String>,
    #[serde(default)]
    pub campsite: Option<CampsiteSummary>,
    pub total_price: f64,
    pub payment_method: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Notice,
    Approved,
    Active,
    Completed,
    Cancelled,
    Rejected,
    /// Any status string the backend sends that we do not recognize.
    /// Rendered with a neutral label and no permitted actions; a booking
    /// must never fail to parse because of its status.
    #[serde(other)]
    Unknown,
}

/// Operator actions that can be requested against a booking. Transitions
/// themselves are server-authoritative; this only names what the UI may ask
/// for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    /// Requires a campsite chosen from an availability query.
    Approve,
    /// Requires a non-empty reason (audit trail).
    Reject,
    /// Requires a non-empty reason (audit trail).
    Cancel,
}

impl BookingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingAction::Approve => "approve",
            BookingAction::Reject => "reject",
            BookingAction::Cancel => "cancel",
        }
    }
}

/// Display metadata and the permitted-action set for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMeta {
    pub label: &'static str,
    pub actions: &'static [BookingAction],
}

const AWAITING_DECISION: &[BookingAction] = &[BookingAction::Approve, BookingAction::Reject];
const CANCELLABLE: &[BookingAction] = &[BookingAction::Cancel];
const TERMINAL: &[BookingAction] = &[];

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Notice => "notice",
            BookingStatus::Approved => "approved",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Unknown => "unknown",
        }
    }

    /// Wire-name lookup for operator input; `None` for anything outside
    /// the closed enumeration.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "notice" => Some(BookingStatus::Notice),
            "approved" => Some(BookingStatus::Approved),
            "active" => Some(BookingStatus::Active),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "rejected" => Some(BookingStatus::Rejected),
            _ => None,
        }
    }

    /// Pure mapping from status to display label and permitted actions.
    pub fn classify(&self) -> StatusMeta {
        match self {
            BookingStatus::Pending => StatusMeta {
                label: "Pending",
                actions: AWAITING_DECISION,
            },
            BookingStatus::Notice => StatusMeta {
                label: "Notice",
                actions: AWAITING_DECISION,
            },
            BookingStatus::Approved => StatusMeta {
                label: "Approved",
                actions: CANCELLABLE,
            },
            BookingStatus::Active => StatusMeta {
                label: "Active",
                actions: CANCELLABLE,
            },
            BookingStatus::Completed => StatusMeta {
                label: "Completed",
                actions: TERMINAL,
            },
            BookingStatus::Cancelled => StatusMeta {
                label: "Cancelled",
                actions: TERMINAL,
            },
            BookingStatus::Rejected => StatusMeta {
                label: "Rejected",
                actions: TERMINAL,
            },
            BookingStatus::Unknown => StatusMeta {
                label: "Unknown",
                actions: TERMINAL,
            },
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.classify().actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_awaiting_statuses_allow_approve_and_reject() {
        for status in [BookingStatus::Pending, BookingStatus::Notice] {
            let meta = status.classify();
            assert_eq!(
                meta.actions,
                &[BookingAction::Approve, BookingAction::Reject]
            );
        }
    }

    #[test]
    fn test_running_statuses_allow_cancel_only() {
        for status in [BookingStatus::Approved, BookingStatus::Active] {
            assert_eq!(status.classify().actions, &[BookingAction::Cancel]);
        }
    }

    #[test]
    fn test_terminal_statuses_have_no_actions() {
        for status in [
            BookingStatus::Completed,
            BookingStatus::Cancelled,
            BookingStatus::Rejected,
        ] {
            assert!(status.classify().actions.is_empty());
            assert!(status.is_terminal());
        }
    }

    #[test]
    fn test_unknown_status_deserializes_with_neutral_fallback() {
        let status: BookingStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, BookingStatus::Unknown);
        assert_eq!(status.classify().label, "Unknown");
        assert!(status.classify().actions.is_empty());
    }

    #[test]
    fn test_status_round_trips_wire_names() {
        for (status, wire) in [
            (BookingStatus::Pending, "\"pending\""),
            (BookingStatus::Notice, "\"notice\""),
            (BookingStatus::Approved, "\"approved\""),
            (BookingStatus::Active, "\"active\""),
            (BookingStatus::Completed, "\"completed\""),
            (BookingStatus::Cancelled, "\"cancelled\""),
            (BookingStatus::Rejected, "\"rejected\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            assert_eq!(serde_json::from_str::<BookingStatus>(wire).unwrap(), status);
        }
    }

    #[test]
    fn test_parse_rejects_values_outside_enumeration() {
        assert_eq!(BookingStatus::parse("active"), Some(BookingStatus::Active));
        assert_eq!(BookingStatus::parse("archived"), None);
        assert_eq!(BookingStatus::parse(""), None);
    }

    #[test]
    fn test_booking_parses_minimal_payload() {
        let json = r#"{
            "bookingId": "B1",
            "startDate": "2024-06-01",
            "endDate": "2024-06-05",
            "requestedAt": "2024-05-20T09:30:00Z",
            "lastUpdated": "2024-05-20T09:30:00Z",
            "status": "pending",
            "totalPrice": 240.0,
            "paymentMethod": "card",
            "userId": "U1",
            "userName": "Jane Doe",
            "userEmail": "jane@example.com"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.booking_id, "B1");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.campsite_id.is_none());
        assert!(booking.admin_notes.is_none());
    }

    #[test]
    fn test_booking_rejects_missing_required_field() {
        // No bookingId: malformed payloads fail at the boundary instead of
        // propagating empty fields into the UI.
        let json = r#"{
            "startDate": "2024-06-01",
            "endDate": "2024-06-05",
            "requestedAt": "2024-05-20T09:30:00Z",
            "lastUpdated": "2024-05-20T09:30:00Z",
            "status": "pending",
            "totalPrice": 240.0,
            "paymentMethod": "card",
            "userId": "U1",
            "userName": "Jane Doe",
            "userEmail": "jane@example.com"
        }"#;
        assert!(serde_json::from_str::<Booking>(json).is_err());
    }
}
