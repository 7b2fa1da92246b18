use crate::errors::ApiError;
use crate::models::{Booking, CampsiteCandidate};

/// One roster row: id, stay range, customer, status label, permitted
/// actions.
pub fn booking_line(booking: &Booking) -> String {
    let meta = booking.status.classify();
    let actions = if meta.actions.is_empty() {
        "none".to_string()
    } else {
        meta.actions
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let site = booking.campsite_id.as_deref().unwrap_or("UNASSIGNED");
    format!(
        "{}  {}..{}  {}  [{}]  site: {}  actions: {}",
        booking.booking_id,
        booking.start_date,
        booking.end_date,
        booking.user_name,
        meta.label,
        site,
        actions
    )
}

pub fn candidate_line(candidate: &CampsiteCandidate) -> String {
    let mut line = format!(
        "{}  {}  device {}",
        candidate.campsite_id,
        candidate.campsite_name,
        candidate.device_status.as_str()
    );
    if let Some(current) = &candidate.current_booking {
        line.push_str(&format!(
            "  (occupied by {} until {})",
            current.user_name, current.end_date
        ));
    }
    if let Some(next) = &candidate.next_available {
        line.push_str(&format!("  next available {next}"));
    }
    line
}

/// Full failure report for the operator: the message, then every conflict
/// and every suggestion the server attached. Neither list is ever
/// truncated or dropped.
pub fn failure_report(err: &ApiError) -> String {
    let mut out = format!("error: {err}");
    for conflict in err.conflicts() {
        out.push_str(&format!(
            "\n  conflict: {} booked by {} from {} to {} (booking {})",
            conflict.campsite_id,
            conflict.user_name,
            conflict.start_date,
            conflict.end_date,
            conflict.booking_id
        ));
    }
    for suggestion in err.suggestions() {
        out.push_str(&format!(
            "\n  suggestion: {} is available from {}",
            suggestion.campsite_id, suggestion.available_from
        ));
    }
    if err.is_retryable() {
        out.push_str("\n  (try again)");
    }
    out
}
