//! Record store contract

use async_trait::async_trait;

use crate::rows::{BookingRow, NewBooking, NewUser, UserRow};
use crate::Result;

/// Access to the remote `users` and `bookings` tables.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup on `users` by registration number.
    async fn find_user(&self, registration_number: &str) -> Result<Option<UserRow>>;

    /// Insert a user and return the stored row.
    async fn insert_user(&self, user: NewUser) -> Result<UserRow>;

    /// Bookings whose `registration_numbers` contains the given value, newest first.
    async fn bookings_for_registration(&self, registration_number: &str)
        -> Result<Vec<BookingRow>>;

    async fn insert_booking(&self, booking: NewBooking) -> Result<()>;
}
