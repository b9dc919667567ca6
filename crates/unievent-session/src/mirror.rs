//! Device-local copy of the session
//!
//! Two entries, each a JSON blob overwritten wholesale: the signed-in user
//! and their booking list.

use serde::de::DeserializeOwned;
use unievent_storage::Database;

use crate::booking::Booking;
use crate::user::User;
use crate::Result;

pub const USER_KEY: &str = "lpu-user";
pub const BOOKINGS_KEY: &str = "lpu-bookings";

#[derive(Clone)]
pub struct LocalMirror {
    db: Database,
}

impl LocalMirror {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn load_user(&self) -> Result<Option<User>> {
        self.load(USER_KEY)
    }

    pub fn store_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.db.set_entry(USER_KEY, &json)?;
        Ok(())
    }

    pub fn load_bookings(&self) -> Result<Vec<Booking>> {
        Ok(self.load(BOOKINGS_KEY)?.unwrap_or_default())
    }

    pub fn store_bookings(&self, bookings: &[Booking]) -> Result<()> {
        let json = serde_json::to_string(bookings)?;
        self.db.set_entry(BOOKINGS_KEY, &json)?;
        Ok(())
    }

    /// Delete both entries
    pub fn clear(&self) -> Result<()> {
        self.db.remove_entry(USER_KEY)?;
        self.db.remove_entry(BOOKINGS_KEY)?;
        Ok(())
    }

    /// Raw blob, for inspection
    pub fn raw_entry(&self, key: &str) -> Result<Option<String>> {
        Ok(self.db.get_entry(key)?)
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(json) = self.db.get_entry(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Ignoring unreadable local entry");
                Ok(None)
            }
        }
    }
}
