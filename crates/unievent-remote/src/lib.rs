//! UniEvent Remote Store
//!
//! The authoritative `users` and `bookings` tables live in a managed
//! Postgres behind a PostgREST endpoint. This crate holds the row shapes,
//! the [`RecordStore`] contract the session layer talks to, an HTTP
//! implementation and an in-memory one.

mod error;
mod memory;
mod rest;
mod rows;
mod store;

pub use error::RemoteError;
pub use memory::MemoryStore;
pub use rest::RestStore;
pub use rows::{BookingRow, BookingStatus, NewBooking, NewUser, UserRow};
pub use store::RecordStore;

pub type Result<T> = std::result::Result<T, RemoteError>;
