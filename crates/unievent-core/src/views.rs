//! Read-only views over the session and the catalog

use chrono::NaiveDate;
use serde::Serialize;

use unievent_catalog::{Event, EventCatalog};
use unievent_session::Booking;

/// Upcoming events suggested after a booking
pub const RECOMMENDATION_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingHistoryEntry {
    pub booking: Booking,
    pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking: Booking,
    pub event: Event,
    pub upcoming_events: Vec<Event>,
}

/// Bookings joined with their events; bookings for unknown events are skipped
pub fn booking_history(bookings: Vec<Booking>, catalog: &EventCatalog) -> Vec<BookingHistoryEntry> {
    bookings
        .into_iter()
        .filter_map(|booking| {
            let event = catalog.get(&booking.event_id)?.clone();
            Some(BookingHistoryEntry { booking, event })
        })
        .collect()
}

pub fn booking_confirmation(
    booking: Option<Booking>,
    catalog: &EventCatalog,
    today: NaiveDate,
) -> Option<BookingConfirmation> {
    let booking = booking?;
    let event = catalog.get(&booking.event_id)?.clone();
    let upcoming_events = catalog
        .upcoming_excluding(&event.id, today, RECOMMENDATION_LIMIT)
        .into_iter()
        .cloned()
        .collect();

    Some(BookingConfirmation {
        booking,
        event,
        upcoming_events,
    })
}
