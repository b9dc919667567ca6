//! UniEvent Storage Layer
//!
//! SQLite-backed key/value entries that hold the device-local copy of the
//! signed-in user and their bookings. Every entry is a serialized blob that
//! is overwritten wholesale on each write.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
