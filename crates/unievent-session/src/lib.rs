//! UniEvent Session Management
//!
//! The session manager owns the signed-in student and their booking list:
//! - Every mutation goes through [`SessionManager`]; callers only read snapshots
//! - The local mirror is rewritten on every mutation and cleared on logout
//! - Booking writes are optimistic: the local list never waits on the remote store
//! - A booking load started by one login can never overwrite a later session

mod booking;
mod draft;
mod error;
mod manager;
mod mirror;
mod state;
mod user;

pub use booking::Booking;
pub use draft::{BookingDraft, MAX_TICKETS};
pub use error::SessionError;
pub use manager::SessionManager;
pub use mirror::{LocalMirror, BOOKINGS_KEY, USER_KEY};
pub use state::SessionState;
pub use unievent_remote::BookingStatus;
pub use user::{is_valid_registration_number, LoginCredentials, User};

pub type Result<T> = std::result::Result<T, SessionError>;
