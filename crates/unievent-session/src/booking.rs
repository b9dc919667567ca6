//! Booking data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unievent_remote::{BookingRow, BookingStatus, NewBooking};

use crate::error::SessionError;
use crate::user::is_valid_registration_number;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Client-generated, derived from the submission time
    pub id: String,
    pub event_id: String,
    /// Registration number of the student who made the booking
    pub user_id: String,
    /// One entry per ticket
    pub registration_numbers: Vec<String>,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub ticket_count: u32,
}

impl Booking {
    /// Map a remote row, filling a missing owner with the registration number
    /// the row was fetched for
    pub fn from_row(row: BookingRow, registration_number: &str) -> Self {
        Self {
            id: row.id,
            event_id: row.event_id,
            user_id: row
                .user_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| registration_number.to_string()),
            registration_numbers: row.registration_numbers,
            booking_date: row.booking_date,
            status: row.status,
            ticket_count: row.ticket_count,
        }
    }

    /// Remote insert payload; an empty `user_id` falls back to `owner`
    pub fn to_new_booking(&self, owner: Option<&str>) -> NewBooking {
        let user_id = if self.user_id.is_empty() {
            owner.unwrap_or_default().to_string()
        } else {
            self.user_id.clone()
        };

        NewBooking {
            id: self.id.clone(),
            event_id: self.event_id.clone(),
            user_id,
            registration_numbers: self.registration_numbers.clone(),
            booking_date: self.booking_date,
            status: self.status,
            ticket_count: self.ticket_count,
        }
    }

    /// One well-formed registration number per ticket, at least one ticket
    pub fn validate(&self) -> Result<()> {
        if self.ticket_count == 0 || self.ticket_count as usize != self.registration_numbers.len()
        {
            return Err(SessionError::TicketCountMismatch {
                ticket_count: self.ticket_count,
                registration_numbers: self.registration_numbers.len(),
            });
        }

        if let Some(bad) = self
            .registration_numbers
            .iter()
            .find(|r| !is_valid_registration_number(r))
        {
            return Err(SessionError::InvalidRegistrationNumber(bad.clone()));
        }

        Ok(())
    }
}
