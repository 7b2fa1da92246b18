pub mod booking;
pub mod campsite;

pub use booking::{Booking, BookingAction, BookingStatus, StatusMeta};
pub use campsite::{
    BookingConflict, CampsiteCandidate, CampsiteSuggestion, CampsiteSummary, CurrentBooking,
    DeviceStatus,
};
