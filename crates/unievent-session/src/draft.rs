//! Booking form state
//!
//! Collects one registration number per ticket and turns the form into a
//! confirmed [`Booking`] once every slot is filled in correctly.

use chrono::{DateTime, Utc};
use unievent_remote::BookingStatus;

use crate::booking::Booking;
use crate::error::SessionError;
use crate::user::is_valid_registration_number;
use crate::Result;

pub const MAX_TICKETS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    event_id: String,
    owner: String,
    registration_numbers: Vec<String>,
}

impl BookingDraft {
    /// Start with a single ticket held by the owner
    pub fn new(event_id: impl Into<String>, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        Self {
            event_id: event_id.into(),
            registration_numbers: vec![owner.clone()],
            owner,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn ticket_count(&self) -> usize {
        self.registration_numbers.len()
    }

    pub fn registration_numbers(&self) -> &[String] {
        &self.registration_numbers
    }

    /// Grow with empty slots or drop trailing ones
    pub fn set_ticket_count(&mut self, count: usize) -> Result<()> {
        if !(1..=MAX_TICKETS).contains(&count) {
            return Err(SessionError::TicketCount {
                requested: count,
                max: MAX_TICKETS,
            });
        }

        self.registration_numbers.resize(count, String::new());
        Ok(())
    }

    pub fn set_registration_number(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let slot = self
            .registration_numbers
            .get_mut(index)
            .ok_or(SessionError::SlotOutOfRange(index))?;
        *slot = value.into();
        Ok(())
    }

    /// Validate every slot and build the booking, identified by the
    /// millisecond timestamp of `now`
    pub fn submit(&self, now: DateTime<Utc>) -> Result<Booking> {
        if let Some(index) = self
            .registration_numbers
            .iter()
            .position(|r| r.trim().is_empty())
        {
            return Err(SessionError::MissingRegistrationNumber(index));
        }

        let registration_numbers: Vec<String> = self
            .registration_numbers
            .iter()
            .map(|r| r.trim().to_string())
            .collect();

        if let Some(bad) = registration_numbers
            .iter()
            .find(|r| !is_valid_registration_number(r))
        {
            return Err(SessionError::InvalidRegistrationNumber(bad.clone()));
        }

        let booking = Booking {
            id: now.timestamp_millis().to_string(),
            event_id: self.event_id.clone(),
            user_id: self.owner.clone(),
            ticket_count: registration_numbers.len() as u32,
            registration_numbers,
            booking_date: now,
            status: BookingStatus::Confirmed,
        };
        booking.validate()?;

        Ok(booking)
    }
}
