//! Row shapes of the remote `users` and `bookings` tables

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub registration_number: String,
    pub name: String,
    pub email: String,
    pub department: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for `users`; `id` and `created_at` are assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub registration_number: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Pending => "pending",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRow {
    pub id: String,
    pub event_id: String,
    /// Older rows were written without an owner
    #[serde(default)]
    pub user_id: Option<String>,
    pub registration_numbers: Vec<String>,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub ticket_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for `bookings`; the id is generated client-side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub registration_numbers: Vec<String>,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub ticket_count: u32,
}
