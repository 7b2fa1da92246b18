use crate::models::{Booking, BookingStatus};

/// The in-memory booking list a view works against. Nothing here is
/// durable: a full refresh replaces the whole list (last write wins) and a
/// successful dispatch patches the single affected record in place.
#[derive(Debug, Default)]
pub struct BookingRoster {
    bookings: Vec<Booking>,
}

impl BookingRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn get(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.booking_id == booking_id)
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Full refresh. Callers racing two refreshes get whichever response
    /// lands last.
    pub fn replace_all(&mut self, bookings: Vec<Booking>) {
        self.bookings = bookings;
    }

    /// Replace the record matching `updated.booking_id`. Returns false and
    /// changes nothing when the id is not in the list.
    pub fn patch(&mut self, updated: Booking) -> bool {
        match self
            .bookings
            .iter_mut()
            .find(|b| b.booking_id == updated.booking_id)
        {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Status-only patch, for dispatches where the backend does not echo
    /// the updated booking back.
    pub fn patch_status(&mut self, booking_id: &str, status: BookingStatus) -> bool {
        match self
            .bookings
            .iter_mut()
            .find(|b| b.booking_id == booking_id)
        {
            Some(slot) => {
                slot.status = status;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn booking(id: &str, status: BookingStatus) -> Booking {
        let stamp = Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap();
        Booking {
            booking_id: id.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
            requested_at: stamp,
            last_updated: stamp,
            status,
            campsite_id: None,
            campsite: None,
            total_price: 240.0,
            payment_method: "card".to_string(),
            user_id: "U1".to_string(),
            user_name: "Jane Doe".to_string(),
            user_email: "jane@example.com".to_string(),
            contact_phone: None,
            admin_notes: None,
            notes: None,
        }
    }

    #[test]
    fn test_patch_replaces_matching_record() {
        let mut roster = BookingRoster::new();
        roster.replace_all(vec![
            booking("B1", BookingStatus::Pending),
            booking("B2", BookingStatus::Active),
        ]);

        let mut approved = booking("B1", BookingStatus::Approved);
        approved.campsite_id = Some("C1".to_string());
        assert!(roster.patch(approved));

        let b1 = roster.get("B1").unwrap();
        assert_eq!(b1.status, BookingStatus::Approved);
        assert_eq!(b1.campsite_id.as_deref(), Some("C1"));
        assert_eq!(roster.get("B2").unwrap().status, BookingStatus::Active);
    }

    #[test]
    fn test_patch_unknown_id_changes_nothing() {
        let mut roster = BookingRoster::new();
        roster.replace_all(vec![booking("B1", BookingStatus::Pending)]);
        let before = roster.bookings().to_vec();

        assert!(!roster.patch(booking("B9", BookingStatus::Approved)));
        assert_eq!(roster.bookings(), before.as_slice());
    }

    #[test]
    fn test_replace_all_is_last_write_wins() {
        let mut roster = BookingRoster::new();
        roster.replace_all(vec![booking("B1", BookingStatus::Pending)]);
        roster.replace_all(vec![booking("B2", BookingStatus::Active)]);

        assert!(roster.get("B1").is_none());
        assert!(roster.get("B2").is_some());
    }

    #[test]
    fn test_patch_status_only() {
        let mut roster = BookingRoster::new();
        roster.replace_all(vec![booking("B1", BookingStatus::Approved)]);

        assert!(roster.patch_status("B1", BookingStatus::Cancelled));
        assert_eq!(roster.get("B1").unwrap().status, BookingStatus::Cancelled);
        assert!(!roster.patch_status("B9", BookingStatus::Cancelled));
    }
}
