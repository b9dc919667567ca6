//! In-process record store
//!
//! Mirrors the semantics of the remote tables closely enough for tests and
//! offline runs: unique registration numbers, store-assigned ids and
//! timestamps, newest-first booking reads. Failures can be switched on to
//! exercise the session layer's error paths.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::error::RemoteError;
use crate::rows::{BookingRow, NewBooking, NewUser, UserRow};
use crate::store::RecordStore;
use crate::Result;

pub struct MemoryStore {
    users: RwLock<Vec<UserRow>>,
    /// Insertion order, which is also `created_at` order
    bookings: RwLock<Vec<BookingRow>>,
    fail_user_inserts: AtomicBool,
    fail_booking_queries: AtomicBool,
    fail_booking_inserts: AtomicBool,
    booking_query_delay: Mutex<Option<Duration>>,
    user_inserts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            bookings: RwLock::new(Vec::new()),
            fail_user_inserts: AtomicBool::new(false),
            fail_booking_queries: AtomicBool::new(false),
            fail_booking_inserts: AtomicBool::new(false),
            booking_query_delay: Mutex::new(None),
            user_inserts: AtomicUsize::new(0),
        }
    }

    /// Seed a user row directly, bypassing the insert counter.
    pub fn with_user(self, user: NewUser) -> Self {
        self.users.write().push(UserRow {
            id: Uuid::new_v4().to_string(),
            registration_number: user.registration_number,
            name: user.name,
            email: user.email,
            department: user.department,
            created_at: Some(Utc::now()),
        });
        self
    }

    /// Seed a booking row directly.
    pub fn with_booking(self, booking: NewBooking) -> Self {
        self.bookings.write().push(booking_row(booking));
        self
    }

    pub fn set_fail_user_inserts(&self, fail: bool) {
        self.fail_user_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_booking_queries(&self, fail: bool) {
        self.fail_booking_queries.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_booking_inserts(&self, fail: bool) {
        self.fail_booking_inserts.store(fail, Ordering::SeqCst);
    }

    /// Hold every booking query for `delay` before answering.
    pub fn set_booking_query_delay(&self, delay: Option<Duration>) {
        *self.booking_query_delay.lock() = delay;
    }

    /// Number of successful `insert_user` calls
    pub fn user_inserts(&self) -> usize {
        self.user_inserts.load(Ordering::SeqCst)
    }

    pub fn users(&self) -> Vec<UserRow> {
        self.users.read().clone()
    }

    pub fn bookings(&self) -> Vec<BookingRow> {
        self.bookings.read().clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn booking_row(booking: NewBooking) -> BookingRow {
    BookingRow {
        id: booking.id,
        event_id: booking.event_id,
        user_id: Some(booking.user_id),
        registration_numbers: booking.registration_numbers,
        booking_date: booking.booking_date,
        status: booking.status,
        ticket_count: booking.ticket_count,
        created_at: Some(Utc::now()),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_user(&self, registration_number: &str) -> Result<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.registration_number == registration_number)
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRow> {
        if self.fail_user_inserts.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("users insert rejected".to_string()));
        }

        let mut users = self.users.write();
        if users
            .iter()
            .any(|u| u.registration_number == user.registration_number)
        {
            return Err(RemoteError::Conflict(user.registration_number));
        }

        let row = UserRow {
            id: Uuid::new_v4().to_string(),
            registration_number: user.registration_number,
            name: user.name,
            email: user.email,
            department: user.department,
            created_at: Some(Utc::now()),
        };
        users.push(row.clone());
        self.user_inserts.fetch_add(1, Ordering::SeqCst);

        debug!(registration_number = %row.registration_number, "Inserted user");

        Ok(row)
    }

    async fn bookings_for_registration(
        &self,
        registration_number: &str,
    ) -> Result<Vec<BookingRow>> {
        let delay = *self.booking_query_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_booking_queries.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("bookings query rejected".to_string()));
        }

        Ok(self
            .bookings
            .read()
            .iter()
            .rev()
            .filter(|b| {
                b.registration_numbers
                    .iter()
                    .any(|r| r == registration_number)
            })
            .cloned()
            .collect())
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<()> {
        if self.fail_booking_inserts.load(Ordering::SeqCst) {
            return Err(RemoteError::Unavailable("bookings insert rejected".to_string()));
        }

        let mut bookings = self.bookings.write();
        if bookings.iter().any(|b| b.id == booking.id) {
            return Err(RemoteError::Conflict(booking.id));
        }
        bookings.push(booking_row(booking));

        Ok(())
    }
}
